use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info, warn};

use crate::corpus::{Document, DocumentSource};
use crate::mapping::FrequencyMap;
use crate::tokenizer::{normalize, strip_diacritics};

/// Builder for new frequency mappings.
///
/// Feed it raw Czech text with correct diacritics, then turn it into a
/// [`FrequencyMap`]. See [crate documentation](index.html) for examples.
#[derive(Debug, Default)]
pub struct MappingBuilder {
    mapping: FrequencyMap,
    words_seen: usize,
    documents_seen: usize,
}

/// What happened to the documents requested from a [`DocumentSource`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CorpusReport {
    pub ingested: Vec<String>,
    pub skipped: Vec<String>,
}

impl MappingBuilder {
    /// Create a new mapping builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of whitespace-separated words processed so far, including the
    /// ones that carried no diacritics.
    pub fn words_seen(&self) -> usize {
        self.words_seen
    }

    pub fn documents_seen(&self) -> usize {
        self.documents_seen
    }

    /// Record one word.
    ///
    /// Words without any accented letter are ignored.
    pub fn add_word(&mut self, word: &str) -> &mut Self {
        self.words_seen += 1;

        if let Some(normalized) = normalize(word) {
            let stripped = strip_diacritics(&normalized);
            self.mapping.add(&stripped, &normalized);
        }

        self
    }

    /// Record every word of a document.
    pub fn add_text(&mut self, text: &str) -> &mut Self {
        for word in text.split_whitespace() {
            self.add_word(word);
        }
        self.documents_seen += 1;

        self
    }

    /// Add multiple documents from an iterator.
    pub fn add_texts_from_iter<I>(&mut self, iter: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for text in iter {
            self.add_text(text.as_ref());
        }

        self
    }

    /// Add the contents of a file as one document.
    pub fn add_text_from_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<&mut Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let before = self.words_seen;
        self.add_text(&text);
        debug!("{}: {} words", path.display(), self.words_seen - before);

        Ok(self)
    }

    /// Fetch documents by identifier and add the ones that can be read.
    ///
    /// An ambiguous identifier is retried once with the first option offered.
    /// Documents that are missing, stay ambiguous or fail to load are logged
    /// and skipped.
    pub fn add_documents_from_source<S, I>(&mut self, source: &S, ids: I) -> CorpusReport
    where
        S: DocumentSource + ?Sized,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut report = CorpusReport::default();

        for id in ids {
            let id = id.as_ref();
            match fetch_resolving_ambiguity(source, id) {
                Some(text) => {
                    let before = self.words_seen;
                    self.add_text(&text);
                    debug!("{}: {} words", id, self.words_seen - before);
                    report.ingested.push(id.to_owned());
                }
                None => report.skipped.push(id.to_owned()),
            }
        }

        info!(
            "ingested {} documents, skipped {}, {} words processed so far",
            report.ingested.len(),
            report.skipped.len(),
            self.words_seen
        );

        report
    }

    /// Build a mapping from all gathered statistics.
    pub fn into_mapping(self) -> FrequencyMap {
        info!(
            "mapping built from {} documents and {} words: {} stripped forms, {} spellings",
            self.documents_seen,
            self.words_seen,
            self.mapping.len(),
            self.mapping.candidate_count()
        );

        self.mapping
    }
}

fn fetch_resolving_ambiguity<S>(source: &S, id: &str) -> Option<String>
where
    S: DocumentSource + ?Sized,
{
    let options = match source.fetch(id) {
        Ok(Document::Found(text)) => return Some(text),
        Ok(Document::Ambiguous(options)) => options,
        Ok(Document::NotFound) => {
            warn!("document `{}` not found, skipping", id);
            return None;
        }
        Err(err) => {
            warn!("{}, skipping", err);
            return None;
        }
    };

    let first = match options.first() {
        Some(first) => first,
        None => {
            warn!("document `{}` is ambiguous but offers no options, skipping", id);
            return None;
        }
    };

    debug!("document `{}` is ambiguous, trying `{}`", id, first);
    match source.fetch(first) {
        Ok(Document::Found(text)) => Some(text),
        Ok(_) => {
            warn!("document `{}` could not be resolved through `{}`, skipping", id, first);
            None
        }
        Err(err) => {
            warn!("{}, skipping", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::errors::CorpusError;

    #[derive(Default)]
    struct MemorySource {
        documents: HashMap<String, Document>,
        broken: Vec<String>,
    }

    impl MemorySource {
        fn with(mut self, id: &str, document: Document) -> Self {
            self.documents.insert(id.to_owned(), document);
            self
        }
    }

    impl DocumentSource for MemorySource {
        fn fetch(&self, id: &str) -> Result<Document, CorpusError> {
            if self.broken.iter().any(|broken| broken == id) {
                return Err(CorpusError::Io {
                    id: id.to_owned(),
                    source: io::Error::new(io::ErrorKind::Other, "connection reset"),
                });
            }
            Ok(self.documents.get(id).cloned().unwrap_or(Document::NotFound))
        }
    }

    fn found(text: &str) -> Document {
        Document::Found(text.to_owned())
    }

    #[test]
    fn counts_normalized_words_under_stripped_form() {
        let mut builder = MappingBuilder::new();
        builder.add_text("Práce, práce a (PRÁCE). Prače!");
        let mapping = builder.into_mapping();

        assert_eq!(mapping.count("pr*ce", "práce"), 3);
        assert_eq!(mapping.count("pra*e", "prače"), 1);
        assert!(!mapping.contains("a"));
    }

    #[test]
    fn words_without_diacritics_are_counted_but_not_mapped() {
        let mut builder = MappingBuilder::new();
        builder.add_text("jen ascii slova ... a čas");
        assert_eq!(builder.words_seen(), 6);
        assert_eq!(builder.documents_seen(), 1);

        let mapping = builder.into_mapping();
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn every_spelling_strips_to_its_key() {
        let mapping = FrequencyMap::build(vec![
            "Žluťoučký kůň úpěl ďábelské ódy.",
            "Příliš žluťoučký kůň, řekla čeština.",
        ]);

        for (stripped, candidates) in mapping.iter() {
            for accented in candidates.keys() {
                assert_eq!(strip_diacritics(accented), stripped);
            }
        }
    }

    #[test]
    fn document_order_does_not_change_counts() {
        let documents = vec!["čas řas čas", "řas řas kůň", "Kůň čas."];
        let forward = FrequencyMap::build(documents.iter());
        let backward = FrequencyMap::build(documents.iter().rev());

        // equality compares counts only, not insertion order
        assert_eq!(forward, backward);
        for (stripped, candidates) in forward.iter() {
            for (accented, &count) in candidates {
                assert_eq!(backward.count(stripped, accented), count);
            }
        }
    }

    #[test]
    fn ties_follow_document_order() {
        let forward = FrequencyMap::build(vec!["řas", "čas"]);
        let backward = FrequencyMap::build(vec!["čas", "řas"]);

        assert_eq!(forward, backward);
        assert_eq!(forward.most_frequent("*as"), Some("řas"));
        assert_eq!(backward.most_frequent("*as"), Some("čas"));
        assert_eq!(forward.restore_word("*as"), "řas");
        assert_eq!(backward.restore_word("*as"), "čas");
    }

    #[test]
    fn clear_winner_does_not_depend_on_document_order() {
        let documents = vec!["řas čas", "čas"];
        let forward = FrequencyMap::build(documents.iter());
        let backward = FrequencyMap::build(documents.iter().rev());

        assert_eq!(forward.most_frequent("*as"), Some("čas"));
        assert_eq!(backward.most_frequent("*as"), Some("čas"));
    }

    #[test]
    fn partial_mappings_merge_into_full_build() {
        let documents = vec!["čas řas čas", "řas řas kůň", "Kůň čas."];
        let full = FrequencyMap::build(documents.iter());

        let mut merged = FrequencyMap::build(&documents[1..]);
        merged.merge(FrequencyMap::build(&documents[..1]));

        assert_eq!(merged, full);
    }

    #[test]
    fn merge_order_decides_ties() {
        let mut merged = FrequencyMap::build(vec!["čas"]);
        merged.merge(FrequencyMap::build(vec!["řas"]));
        assert_eq!(merged.most_frequent("*as"), Some("čas"));

        let mut merged = FrequencyMap::build(vec!["řas"]);
        merged.merge(FrequencyMap::build(vec!["čas"]));
        assert_eq!(merged.most_frequent("*as"), Some("řas"));
    }

    #[test]
    fn text_file_is_one_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("babicka.txt");
        fs::write(&path, "Babička měla\nmnoho vnoučat.").unwrap();

        let mut builder = MappingBuilder::new();
        builder.add_text_from_file(&path).unwrap();
        assert_eq!(builder.documents_seen(), 1);
        assert_eq!(builder.words_seen(), 4);

        let mapping = builder.into_mapping();
        assert_eq!(mapping.count("babi*ka", "babička"), 1);
        assert_eq!(mapping.count("m*la", "měla"), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut builder = MappingBuilder::new();
        assert!(builder.add_text_from_file(dir.path().join("nope.txt")).is_err());
    }

    #[test]
    fn source_failures_skip_documents() {
        let source = MemorySource {
            broken: vec!["broken".to_owned()],
            ..MemorySource::default()
        }
        .with("praha", found("Hlavní město."))
        .with("brno", found("Moravské město."));

        let mut builder = MappingBuilder::new();
        let report = builder.add_documents_from_source(&source, &["praha", "missing", "broken", "brno"]);

        assert_eq!(report.ingested, vec!["praha", "brno"]);
        assert_eq!(report.skipped, vec!["missing", "broken"]);
        assert_eq!(builder.documents_seen(), 2);
        assert_eq!(builder.into_mapping().count("m*sto", "město"), 2);
    }

    #[test]
    fn ambiguous_document_resolves_to_first_option() {
        let source = MemorySource::default()
            .with("merkur", Document::Ambiguous(vec!["merkur-planeta".to_owned(), "merkur-buh".to_owned()]))
            .with("merkur-planeta", found("Nejmenší planeta."))
            .with("merkur-buh", found("Římský bůh."));

        let mut builder = MappingBuilder::new();
        let report = builder.add_documents_from_source(&source, vec!["merkur"]);

        assert_eq!(report.ingested, vec!["merkur"]);
        let mapping = builder.into_mapping();
        assert_eq!(mapping.count("nejmen**", "nejmenší"), 1);
        assert!(!mapping.contains("b*h"));
    }

    #[test]
    fn ambiguity_is_retried_only_once() {
        let source = MemorySource::default()
            .with("a", Document::Ambiguous(vec!["b".to_owned()]))
            .with("b", Document::Ambiguous(vec!["c".to_owned()]))
            .with("c", found("čas"))
            .with("empty", Document::Ambiguous(vec![]));

        let mut builder = MappingBuilder::new();
        let report = builder.add_documents_from_source(&source, &["a", "empty"]);

        assert!(report.ingested.is_empty());
        assert_eq!(report.skipped, vec!["a", "empty"]);
        assert!(builder.into_mapping().is_empty());
    }
}
