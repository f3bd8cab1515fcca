//! Presentation view of a `MatchResult`: gauge value plus keyword chips.
//!
//! Capping is a display concern only; the underlying `MatchResult` always carries the full lists.

use serde::Serialize;

use crate::matching::analyzer::MatchResult;

/// Maximum number of missing keywords rendered as chips.
pub const MISSING_CHIP_LIMIT: usize = 15;

pub const GOOD_MATCH_MESSAGE: &str = "Good match!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchDisplay {
    /// Gauge value, 0 – 100.
    pub score: u32,
    /// Top job keywords in rank order.
    pub keyword_chips: Vec<String>,
    pub missing_chips: Vec<String>,
    /// Missing keywords beyond the chip limit.
    pub hidden_missing: usize,
    pub message: Option<String>,
}

impl MatchDisplay {
    pub fn from_result(result: &MatchResult) -> Self {
        let missing_chips: Vec<String> = result
            .missing
            .iter()
            .take(MISSING_CHIP_LIMIT)
            .cloned()
            .collect();

        Self {
            score: result.score,
            keyword_chips: result
                .top_job_keywords
                .keywords()
                .map(String::from)
                .collect(),
            hidden_missing: result.missing.len() - missing_chips.len(),
            message: result
                .missing
                .is_empty()
                .then(|| GOOD_MATCH_MESSAGE.to_string()),
            missing_chips,
        }
    }
}
