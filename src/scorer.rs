//! Scoring restored text against the correct original.
//!
//! [`accuracy`] is the headline number. The string similarity measures are
//! only descriptive and never fail.

use std::fmt;

use log::warn;

use crate::errors::AlignmentMismatch;

/// Fraction of whitespace-separated words that match the gold text exactly,
/// position by position.
///
/// Both texts must have the same number of words. Two empty texts are a
/// perfect match.
pub fn accuracy(gold: &str, system: &str) -> Result<f64, AlignmentMismatch> {
    let gold: Vec<_> = gold.split_whitespace().collect();
    let system: Vec<_> = system.split_whitespace().collect();

    if gold.len() != system.len() {
        return Err(AlignmentMismatch {
            gold: gold.len(),
            system: system.len(),
        });
    }

    if gold.is_empty() {
        return Ok(1.0);
    }

    let correct = gold.iter().zip(&system).filter(|(g, s)| g == s).count();
    Ok(correct as f64 / gold.len() as f64)
}

/// Number of single-character insertions, deletions and substitutions needed
/// to turn `a` into `b`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Jaro similarity in `[0, 1]`; `0` when either string is empty.
pub fn jaro(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::jaro(a, b)
}

/// Jaro similarity boosted for a common prefix of up to four characters.
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::jaro_winkler(a, b)
}

/// A metric measured on the input and on the restored output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison<T> {
    pub before: T,
    pub after: T,
}

/// All metrics for one restoration run, compared to the gold text.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub levenshtein: Comparison<usize>,
    pub jaro: Comparison<f64>,
    pub jaro_winkler: Comparison<f64>,
    /// `None` when the texts couldn't be aligned word by word.
    pub accuracy: Comparison<Option<f64>>,
}

impl Evaluation {
    pub fn compare(corrupted: &str, restored: &str, gold: &str) -> Self {
        let aligned = |system: &str| match accuracy(gold, system) {
            Ok(accuracy) => Some(accuracy),
            Err(err) => {
                warn!("accuracy not computed: {}", err);
                None
            }
        };

        Self {
            levenshtein: Comparison {
                before: levenshtein(corrupted, gold),
                after: levenshtein(restored, gold),
            },
            jaro: Comparison {
                before: jaro(corrupted, gold),
                after: jaro(restored, gold),
            },
            jaro_winkler: Comparison {
                before: jaro_winkler(corrupted, gold),
                after: jaro_winkler(restored, gold),
            },
            accuracy: Comparison {
                before: aligned(corrupted),
                after: aligned(restored),
            },
        }
    }

    fn rows(&self) -> [[String; 3]; 4] {
        let score = |value: f64| format!("{:.3}", value);
        let optional = |value: Option<f64>| value.map_or_else(|| "n/a".to_owned(), score);

        [
            [
                "Levenshtein distance".to_owned(),
                self.levenshtein.before.to_string(),
                self.levenshtein.after.to_string(),
            ],
            [
                "Jaro similarity".to_owned(),
                score(self.jaro.before),
                score(self.jaro.after),
            ],
            [
                "Jaro-Winkler similarity".to_owned(),
                score(self.jaro_winkler.before),
                score(self.jaro_winkler.after),
            ],
            [
                "Accuracy".to_owned(),
                optional(self.accuracy.before),
                optional(self.accuracy.after),
            ],
        ]
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const HEADER: [&str; 3] = ["Metric", "Before", "After"];
        let rows = self.rows();

        let mut widths = [0; 3];
        for (column, width) in widths.iter_mut().enumerate() {
            *width = rows
                .iter()
                .map(|row| row[column].chars().count())
                .chain(std::iter::once(HEADER[column].len()))
                .max()
                .unwrap_or(0);
        }

        let separator = widths
            .iter()
            .map(|width| "-".repeat(width + 2))
            .collect::<Vec<_>>()
            .join("+");
        let separator = format!("+{}+", separator);

        writeln!(f, "{}", separator)?;
        write_row(f, &widths, HEADER)?;
        writeln!(f, "{}", separator)?;
        for row in &rows {
            write_row(f, &widths, [&row[0], &row[1], &row[2]])?;
        }
        write!(f, "{}", separator)
    }
}

fn write_row(f: &mut fmt::Formatter, widths: &[usize; 3], cells: [&str; 3]) -> fmt::Result {
    writeln!(
        f,
        "| {:<w0$} | {:>w1$} | {:>w2$} |",
        cells[0],
        cells[1],
        cells[2],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2]
    )
}
