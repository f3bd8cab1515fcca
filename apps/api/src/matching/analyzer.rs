//! Match Analyzer — scores a resume against a job description by keyword overlap.
//!
//! Algorithm:
//! 1. Tokenize both texts and deduplicate into token sets.
//! 2. Empty job set → score 0 with empty lists (no division by zero).
//! 3. overlap = job ∩ resume, missing = job − resume.
//! 4. score = round(100 × |overlap| / |job|), exact integer arithmetic.
//! 5. Rank job tokens by frequency (stable, ties keep first-seen order) and keep the top N.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::matching::stopwords::StopwordSet;
use crate::matching::tokenizer::Tokenizer;

/// Number of job keywords reported by default.
pub const DEFAULT_TOP_N: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// How a fractional percentage is rounded to an integer score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreRounding {
    /// Ties go to the even neighbour (66.5 → 66, 67.5 → 68).
    #[default]
    HalfEven,
    /// Ties go up (66.5 → 67).
    HalfUp,
}

impl FromStr for ScoreRounding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "half-even" | "half_even" | "even" => Ok(Self::HalfEven),
            "half-up" | "half_up" | "up" => Ok(Self::HalfUp),
            other => Err(format!(
                "unknown rounding mode '{other}' (expected 'half-even' or 'half-up')"
            )),
        }
    }
}

impl ScoreRounding {
    /// Rounds `100 × numerator / denominator` to an integer percentage.
    /// `denominator` must be non-zero.
    pub fn percent(self, numerator: usize, denominator: usize) -> u32 {
        let scaled = numerator * 100;
        let quotient = scaled / denominator;
        let twice_remainder = (scaled % denominator) * 2;

        let round_up = match twice_remainder.cmp(&denominator) {
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Equal => match self {
                Self::HalfUp => true,
                Self::HalfEven => quotient % 2 == 1,
            },
        };

        (quotient + usize::from(round_up)) as u32
    }
}

/// Tunables for the analyzer. Defaults reproduce the classic behaviour.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub stopwords: StopwordSet,
    pub top_n: usize,
    pub rounding: ScoreRounding,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            stopwords: StopwordSet::default(),
            top_n: DEFAULT_TOP_N,
            rounding: ScoreRounding::default(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// A ranked keyword with its occurrence count in the job description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Ordered keyword → count mapping. Serializes as a JSON object in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordRanking(Vec<KeywordCount>);

impl KeywordRanking {
    #[cfg(test)]
    pub fn entries(&self) -> &[KeywordCount] {
        &self.0
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|k| k.keyword.as_str())
    }
}

impl Serialize for KeywordRanking {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.keyword, &entry.count)?;
        }
        map.end()
    }
}

/// Result of one analysis. Computed fresh per request and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub score: u32, // 0 – 100
    pub overlap: Vec<String>,
    pub missing: Vec<String>,
    pub top_job_keywords: KeywordRanking,
}

// ────────────────────────────────────────────────────────────────────────────
// Frequency table
// ────────────────────────────────────────────────────────────────────────────

/// Token counts that remember first-seen order, so equal counts rank stably.
#[derive(Debug, Default)]
struct FrequencyTable {
    order: Vec<KeywordCount>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    fn from_tokens(tokens: Vec<String>) -> Self {
        let mut table = Self::default();
        for token in tokens {
            match table.index.get(&token) {
                Some(&slot) => table.order[slot].count += 1,
                None => {
                    table.index.insert(token.clone(), table.order.len());
                    table.order.push(KeywordCount {
                        keyword: token,
                        count: 1,
                    });
                }
            }
        }
        table
    }

    fn top(self, n: usize) -> KeywordRanking {
        let mut ranked = self.order;
        // sort_by is stable: ties stay in first-seen order
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        KeywordRanking(ranked)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Analyzer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct MatchAnalyzer {
    tokenizer: Tokenizer,
    top_n: usize,
    rounding: ScoreRounding,
}

impl Default for MatchAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl MatchAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            tokenizer: Tokenizer::new(config.stopwords),
            top_n: config.top_n,
            rounding: config.rounding,
        }
    }

    /// Compares `resume_text` against `job_text`. Total over all inputs.
    pub fn analyze(&self, resume_text: &str, job_text: &str) -> MatchResult {
        let job_tokens = self.tokenizer.tokenize(job_text);
        let job_set: HashSet<String> = job_tokens.iter().cloned().collect();
        if job_set.is_empty() {
            return MatchResult::default();
        }
        let resume_set = self.tokenizer.token_set(resume_text);

        let (mut overlap, mut missing): (Vec<String>, Vec<String>) = job_set
            .iter()
            .cloned()
            .partition(|token| resume_set.contains(token));
        overlap.sort();
        missing.sort();

        let score = self.rounding.percent(overlap.len(), job_set.len());
        let top_job_keywords = FrequencyTable::from_tokens(job_tokens).top(self.top_n);

        MatchResult {
            score,
            overlap,
            missing,
            top_job_keywords,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
