use thiserror::Error;

#[derive(Error, Debug)]
pub enum MappingLoadingError {
    #[error("cannot read mapping from file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("malformed mapping file: {0}")]
    Deserialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum MappingSavingError {
    #[error("cannot write mapping into file: {0}")]
    WriteFile(#[from] std::io::Error),
    #[error("can't serialize mapping: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A corpus document could not be read at all.
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("document `{id}` is unavailable: {source}")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },
}

/// Gold and system outputs can't be compared word by word.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("the gold and system outputs must have the same number of words: {gold} vs {system}")]
pub struct AlignmentMismatch {
    pub gold: usize,
    pub system: usize,
}
