use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::bytes::Regex;

/// Accented Czech letters that carry the information we want to restore.
pub const DIACRITICS: [char; 15] = [
    'á', 'é', 'ě', 'í', 'ó', 'ú', 'ů', 'ý', 'č', 'ď', 'ň', 'ř', 'š', 'ť', 'ž',
];

/// Stands in for any accented letter in stripped words and corrupted text.
pub const PLACEHOLDER: char = '*';

const NORMALIZE_TRIM: &[char] = &['.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '"', '\''];
const RESTORE_TRIM: &[char] = &[',', '.', '!', '?', '(', ')', '[', ']', ':'];

lazy_static! {
    static ref NON_ASCII_PAIR: Regex = Regex::new(r"(?-u)[\x80-\xFF][\x80-\xFF]").unwrap();
}

pub fn is_diacritic(c: char) -> bool {
    DIACRITICS.contains(&c)
}

pub fn contains_diacritic(word: &str) -> bool {
    word.chars().any(is_diacritic)
}

/// Lowercase a word and trim punctuation around it.
///
/// Returns `None` when nothing is left or when the word has no accented letter,
/// since such words tell us nothing about where diacritics belong.
pub fn normalize(word: &str) -> Option<String> {
    let lowercase = word.to_lowercase();
    let trimmed = lowercase.trim_matches(NORMALIZE_TRIM);

    if trimmed.is_empty() || !contains_diacritic(trimmed) {
        return None;
    }

    Some(trimmed.to_owned())
}

/// Replace every accented letter with [`PLACEHOLDER`].
///
/// Different letters collapse into the same marker, so `"čas"` and `"řas"`
/// both become `"*as"`.
pub fn strip_diacritics(word: &str) -> Cow<str> {
    if !contains_diacritic(word) {
        return Cow::Borrowed(word);
    }

    Cow::Owned(
        word.chars()
            .map(|c| if is_diacritic(c) { PLACEHOLDER } else { c })
            .collect(),
    )
}

/// Replace each pair of consecutive non-ASCII bytes with [`PLACEHOLDER`].
///
/// Every accented Czech letter is two bytes long in UTF-8, so in Czech text
/// this masks each of them with a single marker. Bytes left unpaired (from
/// three- or four-byte characters) become U+FFFD.
pub fn mark_non_ascii(text: &str) -> Cow<str> {
    match NON_ASCII_PAIR.replace_all(text.as_bytes(), &b"*"[..]) {
        Cow::Borrowed(_) => Cow::Borrowed(text),
        Cow::Owned(bytes) => match String::from_utf8(bytes) {
            Ok(marked) => Cow::Owned(marked),
            Err(err) => Cow::Owned(String::from_utf8_lossy(err.as_bytes()).into_owned()),
        },
    }
}

/// Punctuation found around a word, remembered so it can be put back after
/// the word itself is replaced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Affixes {
    pub ellipsis: bool,
    pub dot: bool,
    pub comma: bool,
    pub question_mark: bool,
    pub exclamation_mark: bool,
    pub colon: bool,
    pub square_bracket_right: bool,
    pub square_bracket_left: bool,
    pub round_bracket_right: bool,
    pub round_bracket_left: bool,
}

impl Affixes {
    pub fn of(word: &str) -> Self {
        let ellipsis = word.ends_with("...");
        Self {
            ellipsis,
            dot: word.ends_with('.') && !ellipsis,
            comma: word.ends_with(','),
            question_mark: word.ends_with('?'),
            exclamation_mark: word.ends_with('!'),
            colon: word.ends_with(':'),
            square_bracket_right: word.ends_with(']'),
            square_bracket_left: word.starts_with('['),
            round_bracket_right: word.ends_with(')'),
            round_bracket_left: word.starts_with('('),
        }
    }

    /// Wrap `word` in the recorded punctuation.
    ///
    /// A trailing ellipsis is only written back when `keep_ellipsis` is set.
    pub fn apply(&self, word: &str, keep_ellipsis: bool) -> String {
        let mut result = String::with_capacity(word.len() + 6);

        if self.round_bracket_left {
            result.push('(');
        }
        if self.square_bracket_left {
            result.push('[');
        }

        result.push_str(word);

        if self.ellipsis && keep_ellipsis {
            result.push_str("...");
        }
        if self.dot {
            result.push('.');
        }
        if self.comma {
            result.push(',');
        }
        if self.question_mark {
            result.push('?');
        }
        if self.exclamation_mark {
            result.push('!');
        }
        if self.colon {
            result.push(':');
        }
        if self.square_bracket_right {
            result.push(']');
        }
        if self.round_bracket_right {
            result.push(')');
        }

        result
    }
}

/// A whitespace-delimited piece of text split into its punctuation and the
/// word inside it.
#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub original: &'a str,
    pub cleared: &'a str,
    pub affixes: Affixes,
}

impl<'a> Token<'a> {
    pub fn new(original: &'a str) -> Self {
        Self {
            original,
            cleared: original.trim_matches(RESTORE_TRIM),
            affixes: Affixes::of(original),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cleared.is_empty()
    }

    pub fn is_marked(&self) -> bool {
        self.original.contains(PLACEHOLDER)
    }

    pub fn lookup_key(&self) -> String {
        self.cleared.to_lowercase()
    }
}

pub fn tokenize(text: &str) -> impl Iterator<Item = Token<'_>> + Clone + '_ {
    text.split_whitespace().map(Token::new)
}
