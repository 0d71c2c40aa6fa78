use crate::mapping::FrequencyMap;
use crate::tokenizer::{mark_non_ascii, tokenize, Token};
use crate::utils::{capitalize, join_with_spaces, starts_with_uppercase};

/// Knobs for restoration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RestoreOptions {
    /// Write a trailing `...` back after restoring a word. Off by default,
    /// which drops it.
    pub keep_ellipsis: bool,
}

impl FrequencyMap {
    /// Restore diacritics in a single whitespace-free token.
    ///
    /// Tokens whose stripped form isn't in the mapping come back unchanged.
    pub fn restore_word(&self, word: &str) -> String {
        self.restore_word_with(word, &RestoreOptions::default())
    }

    pub fn restore_word_with(&self, word: &str, options: &RestoreOptions) -> String {
        self.restore_token(&Token::new(word), options)
    }

    /// Restore diacritics in a text whose accented letters were mangled into
    /// pairs of non-ASCII bytes.
    ///
    /// Tokens are joined by single spaces, so line breaks and runs of spaces
    /// from the input are not kept. A marked token that isn't in the mapping
    /// comes back masked: its accented letters, and any other two-byte
    /// characters such as `«`, stay as `*`.
    pub fn restore_text(&self, text: &str) -> String {
        self.restore_text_with(text, &RestoreOptions::default())
    }

    pub fn restore_text_with(&self, text: &str, options: &RestoreOptions) -> String {
        let marked = mark_non_ascii(text);
        let restored: Vec<_> = tokenize(&marked)
            .map(|token| {
                if token.is_marked() {
                    self.restore_token(&token, options)
                } else {
                    token.original.to_owned()
                }
            })
            .collect();

        join_with_spaces(restored.iter())
    }

    fn restore_token(&self, token: &Token, options: &RestoreOptions) -> String {
        if token.is_empty() {
            return token.original.to_owned();
        }

        let restored = match self.most_frequent(&token.lookup_key()) {
            Some(restored) => restored,
            None => return token.original.to_owned(),
        };

        let cased = if starts_with_uppercase(token.cleared) {
            capitalize(restored)
        } else {
            restored.to_owned()
        };

        token.affixes.apply(&cased, options.keep_ellipsis)
    }
}
