//! Tokenizer — turns free text into normalized keyword tokens.
//!
//! A token is a maximal run of ASCII letters (after lowercasing) of length ≥ 2 that is not a stopword.
//! Digits, punctuation, whitespace and non-ASCII letters all act as separators.

use std::collections::HashSet;

use crate::matching::stopwords::StopwordSet;

const MIN_TOKEN_LEN: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stopwords: StopwordSet,
}

impl Tokenizer {
    pub fn new(stopwords: StopwordSet) -> Self {
        Self { stopwords }
    }

    /// Tokens in left-to-right order, duplicates preserved.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut tokens = Vec::new();
        let mut current = String::new();

        for ch in lowered.chars() {
            if ch.is_ascii_alphabetic() {
                current.push(ch);
            } else if !current.is_empty() {
                self.push_token(&mut tokens, std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            self.push_token(&mut tokens, current);
        }

        tokens
    }

    /// Unique tokens of `text`.
    pub fn token_set(&self, text: &str) -> HashSet<String> {
        self.tokenize(text).into_iter().collect()
    }

    fn push_token(&self, tokens: &mut Vec<String>, word: String) {
        // ASCII-only, so byte length equals char count
        if word.len() >= MIN_TOKEN_LEN && !self.stopwords.contains(&word) {
            tokens.push(word);
        }
    }
}
