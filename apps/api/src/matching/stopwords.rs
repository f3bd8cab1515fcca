//! Stopword sets used by the tokenizer.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

/// Words dropped from every token stream unless a custom list is configured.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "to", "of", "in", "on", "for", "with", "at", "by", "is", "are",
    "was", "were", "be", "this", "that", "as", "it", "from", "will", "you", "your", "our", "we",
    "they", "them", "their", "i", "me", "my",
];

/// A lowercase set of words excluded from tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::from_words(DEFAULT_STOPWORDS.iter().copied())
    }
}

impl StopwordSet {
    /// Builds a set from arbitrary words. Entries are trimmed and lowercased; blanks are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Parses a newline-delimited list. Lines starting with `#` are comments.
    pub fn parse(contents: &str) -> Self {
        Self::from_words(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    /// Loads a newline-delimited stopword file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stopword file '{}'", path.display()))?;
        Ok(Self::parse(&contents))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}
