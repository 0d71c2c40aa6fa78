//! Access to the documents a mapping is learned from.
//!
//! Where documents come from is up to the caller: anything that can turn a
//! document identifier into text implements [`DocumentSource`]. The crate only
//! ships [`DirectorySource`], which reads plain-text files from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::CorpusError;

/// Result of looking up one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Found(String),
    /// The identifier matches several documents; these are their identifiers.
    Ambiguous(Vec<String>),
    NotFound,
}

pub trait DocumentSource {
    fn fetch(&self, id: &str) -> Result<Document, CorpusError>;
}

impl<T: DocumentSource + ?Sized> DocumentSource for &T {
    fn fetch(&self, id: &str) -> Result<Document, CorpusError> {
        (**self).fetch(id)
    }
}

/// Documents stored as `<id>.txt` files in a single directory.
///
/// An identifier without an exact match is ambiguous when it is a prefix of
/// other file names, so `babicka` offers `babicka-1` and `babicka-2`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Identifiers of every document in the directory, sorted.
    pub fn ids(&self) -> io::Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if let Some(id) = document_id(&path) {
                ids.push(id.to_owned());
            }
        }
        ids.sort();

        Ok(ids)
    }

    fn path_of(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.txt", id))
    }
}

impl DocumentSource for DirectorySource {
    fn fetch(&self, id: &str) -> Result<Document, CorpusError> {
        let unavailable = |source| CorpusError::Io {
            id: id.to_owned(),
            source,
        };

        match fs::read_to_string(self.path_of(id)) {
            Ok(text) => return Ok(Document::Found(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(unavailable(err)),
        }

        let options: Vec<_> = self
            .ids()
            .map_err(unavailable)?
            .into_iter()
            .filter(|other| other.starts_with(id))
            .collect();

        if options.is_empty() {
            Ok(Document::NotFound)
        } else {
            Ok(Document::Ambiguous(options))
        }
    }
}

fn document_id(path: &Path) -> Option<&str> {
    if !path.is_file() || path.extension()? != "txt" {
        return None;
    }
    path.file_stem()?.to_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("babicka-1.txt"), "První díl.").unwrap();
        fs::write(dir.path().join("babicka-2.txt"), "Druhý díl.").unwrap();
        fs::write(dir.path().join("promeny.txt"), "Řehoř Samsa.").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();
        dir
    }

    #[test]
    fn ids_lists_text_files_only() {
        let dir = corpus();
        let source = DirectorySource::new(dir.path());
        assert_eq!(source.ids().unwrap(), vec!["babicka-1", "babicka-2", "promeny"]);
    }

    #[test]
    fn root_is_the_given_directory() {
        let dir = corpus();
        let source = DirectorySource::new(dir.path());
        assert_eq!(source.root(), dir.path());
    }

    #[test]
    fn exact_id_is_found() {
        let dir = corpus();
        let source = DirectorySource::new(dir.path());
        assert_eq!(
            source.fetch("promeny").unwrap(),
            Document::Found("Řehoř Samsa.".to_owned())
        );
    }

    #[test]
    fn prefix_is_ambiguous() {
        let dir = corpus();
        let source = DirectorySource::new(dir.path());
        assert_eq!(
            source.fetch("babicka").unwrap(),
            Document::Ambiguous(vec!["babicka-1".to_owned(), "babicka-2".to_owned()])
        );
    }

    #[test]
    fn unknown_id_is_not_found() {
        let dir = corpus();
        let source = DirectorySource::new(dir.path());
        assert_eq!(source.fetch("zbabelci").unwrap(), Document::NotFound);
    }

    #[test]
    fn missing_directory_is_unavailable() {
        let dir = corpus();
        let source = DirectorySource::new(dir.path().join("nowhere"));
        assert!(matches!(source.fetch("promeny"), Err(CorpusError::Io { .. })));
    }
}
