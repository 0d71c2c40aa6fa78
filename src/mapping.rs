use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{MappingLoadingError, MappingSavingError};
use crate::trainer::MappingBuilder;

/// Accented spellings of one stripped word and how often each was seen,
/// in the order they were first seen.
pub type CandidateCounts = IndexMap<String, u32>;

/// Frequency mapping from stripped words to their accented spellings.
///
/// Keys are lowercase words with every accented letter replaced by
/// [`PLACEHOLDER`](crate::tokenizer::PLACEHOLDER); each value counts the
/// accented spellings that strip down to that key.
///
/// See [crate documentation](index.html) for examples.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(transparent)]
pub struct FrequencyMap {
    pub(crate) entries: IndexMap<String, CandidateCounts>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from an iterator of raw documents.
    pub fn build<I>(documents: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut builder = MappingBuilder::new();
        builder.add_texts_from_iter(documents);
        builder.into_mapping()
    }

    /// Save this mapping into a file with the given filename.
    /// The format is a JSON object of JSON objects.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), MappingSavingError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush()?;

        Ok(())
    }

    /// Load a previously saved mapping from a file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, MappingLoadingError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), MappingSavingError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, MappingLoadingError> {
        let mapping = serde_json::from_reader(reader)?;
        Ok(mapping)
    }

    /// Number of distinct stripped words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct accented spellings across all stripped words.
    pub fn candidate_count(&self) -> usize {
        self.entries.values().map(IndexMap::len).sum()
    }

    pub fn contains(&self, stripped: &str) -> bool {
        self.entries.contains_key(stripped)
    }

    pub fn candidates(&self, stripped: &str) -> Option<&CandidateCounts> {
        self.entries.get(stripped)
    }

    pub fn count(&self, stripped: &str, accented: &str) -> u32 {
        self.entries
            .get(stripped)
            .and_then(|candidates| candidates.get(accented))
            .copied()
            .unwrap_or(0)
    }

    /// The most frequent accented spelling of `stripped`.
    ///
    /// Ties go to the spelling that was recorded first, so with equal counts
    /// the result follows the order documents were added in.
    pub fn most_frequent(&self, stripped: &str) -> Option<&str> {
        let candidates = self.entries.get(stripped)?;
        let mut best: Option<(&String, u32)> = None;

        for (candidate, &count) in candidates {
            match best {
                Some((_, best_count)) if best_count >= count => {}
                _ => best = Some((candidate, count)),
            }
        }

        best.map(|(candidate, _)| candidate.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CandidateCounts)> + '_ {
        self.entries
            .iter()
            .map(|(stripped, candidates)| (stripped.as_str(), candidates))
    }

    /// Add all counts from `other` to this mapping.
    ///
    /// Counts are summed, so the totals don't depend on merge order. Spellings
    /// new to this mapping are appended after the ones it already has, so
    /// which spelling wins a tie does depend on it.
    pub fn merge(&mut self, other: FrequencyMap) {
        for (stripped, candidates) in other.entries {
            let own = self.entries.entry(stripped).or_insert_with(CandidateCounts::new);
            for (accented, count) in candidates {
                let total = own.entry(accented).or_insert(0);
                *total = total.saturating_add(count);
            }
        }
    }

    pub(crate) fn add(&mut self, stripped: &str, accented: &str) {
        // avoid allocating keys for words we've already seen
        if let Some(candidates) = self.entries.get_mut(stripped) {
            if let Some(count) = candidates.get_mut(accented) {
                *count = count.saturating_add(1);
            } else {
                candidates.insert(accented.to_owned(), 1);
            }
            return;
        }

        let mut candidates = CandidateCounts::new();
        candidates.insert(accented.to_owned(), 1);
        self.entries.insert(stripped.to_owned(), candidates);
    }
}

impl<S, A> std::iter::FromIterator<(S, Vec<(A, u32)>)> for FrequencyMap
where
    S: Into<String>,
    A: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, Vec<(A, u32)>)>>(iter: I) -> Self {
        let entries: IndexMap<String, CandidateCounts> = iter
            .into_iter()
            .map(|(stripped, candidates)| {
                let candidates: CandidateCounts = candidates
                    .into_iter()
                    .map(|(accented, count)| (accented.into(), count))
                    .collect();
                (stripped.into(), candidates)
            })
            .collect();

        Self { entries }
    }
}
