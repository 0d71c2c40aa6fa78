//! Restore diacritics in Czech text that lost them, using word frequencies
//! learned from a corpus of correctly written Czech.
//!
//! Each word is looked up on its own: the accented spelling seen most often in
//! the corpus wins. There is no context, grammar or morphology involved.
//!
//! # Building a mapping
//!
//! ```rust
//! use diacritics::MappingBuilder;
//!
//! let mut builder = MappingBuilder::new();
//! builder.add_text("Práce šlechtí. Bez práce nejsou koláče.");
//! let mapping = builder.into_mapping();
//!
//! assert_eq!(mapping.count("pr*ce", "práce"), 2);
//! ```
//!
//! Words are lowercased, stripped of punctuation, and every accented letter is
//! replaced with `*` to form the lookup key, so `"Práce,"` is counted as
//! `"práce"` under `"pr*ce"`. Words without accented letters are not stored.
//!
//! # Restoring text
//!
//! Text to restore is expected to have its accented letters mangled into pairs
//! of non-ASCII bytes. Each pair is masked with `*` before lookup:
//!
//! ```rust
//! use diacritics::FrequencyMap;
//!
//! let mapping = FrequencyMap::build(vec!["Mluvím česky, čeština je krásná."]);
//!
//! assert_eq!(mapping.restore_text("Toto je čeština."), "Toto je čeština.");
//! assert_eq!(mapping.restore_word("*e*tina."), "čeština.");
//! assert_eq!(mapping.restore_word("Zebra?"), "Zebra?");
//! ```
//!
//! # Saving and loading
//!
//! ```rust,no_run
//! use diacritics::FrequencyMap;
//!
//! let mapping = FrequencyMap::build(vec!["Příliš žluťoučký kůň"]);
//! mapping.save_to_file("mapping.json").unwrap();
//!
//! let loaded = FrequencyMap::load_from_file("mapping.json").unwrap();
//! assert_eq!(loaded, mapping);
//! ```
//!
//! # Scoring
//!
//! ```rust
//! use diacritics::scorer::{accuracy, Evaluation};
//!
//! assert_eq!(accuracy("Toto je čeština.", "Toto je cestina."), Ok(2.0 / 3.0));
//! assert!(accuracy("jedno slovo", "jedno").is_err());
//!
//! let report = Evaluation::compare("Toto je cestina.", "Toto je čeština.", "Toto je čeština.");
//! println!("{}", report);
//! ```

pub mod corpus;
mod errors;
mod mapping;
mod restorer;
pub mod scorer;
mod tokenizer;
mod trainer;
mod utils;

pub use crate::corpus::{DirectorySource, Document, DocumentSource};
pub use crate::errors::{AlignmentMismatch, CorpusError, MappingLoadingError, MappingSavingError};
pub use crate::mapping::{CandidateCounts, FrequencyMap};
pub use crate::restorer::RestoreOptions;
pub use crate::tokenizer::{
    contains_diacritic, mark_non_ascii, normalize, strip_diacritics, DIACRITICS, PLACEHOLDER,
};
pub use crate::trainer::{CorpusReport, MappingBuilder};
