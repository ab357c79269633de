use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::traits::TermMatcher;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\S+").unwrap();
}

/// Lower-cases a whitespace-delimited word and strips everything but word characters.
pub fn normalize_token(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lower-cased, punctuation-stripped, whitespace-separated tokens of `text`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(normalize_token)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Fixed word-list matcher.
///
/// A token is offending when it contains a prohibited term as a substring and
/// contains none of the allow-listed words (so `putin` survives a `puto` entry).
#[derive(Debug, Clone)]
pub struct WordListMatcher {
    prohibited: Vec<String>,
    allowed: Vec<String>,
    mask: char,
}

impl WordListMatcher {
    pub fn new(prohibited: &[String], allowed: &[String]) -> Self {
        let lower = |terms: &[String]| -> Vec<String> {
            terms
                .iter()
                .map(|term| term.trim().to_lowercase())
                .filter(|term| !term.is_empty())
                .collect()
        };

        Self {
            prohibited: lower(prohibited),
            allowed: lower(allowed),
            mask: '*',
        }
    }

    fn token_is_offending(&self, token: &str) -> bool {
        self.prohibited.iter().any(|term| token.contains(term.as_str()))
            && !self.allowed.iter().any(|allowed| token.contains(allowed.as_str()))
    }
}

impl TermMatcher for WordListMatcher {
    fn is_profane(&self, text: &str) -> anyhow::Result<bool> {
        Ok(tokenize(text)
            .iter()
            .any(|token| self.token_is_offending(token)))
    }

    fn clean(&self, text: &str) -> anyhow::Result<String> {
        let cleaned = WORD.replace_all(text, |caps: &Captures| {
            let word = &caps[0];
            if self.token_is_offending(&normalize_token(word)) {
                std::iter::repeat_n(self.mask, word.chars().count()).collect::<String>()
            } else {
                word.to_string()
            }
        });
        Ok(cleaned.into_owned())
    }
}
