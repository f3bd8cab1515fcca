use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::matching::analyzer::{AnalyzerConfig, ScoreRounding, DEFAULT_TOP_N};
use crate::matching::stopwords::StopwordSet;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub match_top_keywords: usize,
    pub match_score_rounding: ScoreRounding,
    pub match_stopwords_path: Option<PathBuf>,
    pub session_capacity: usize,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            match_top_keywords: parse_env("MATCH_TOP_KEYWORDS", DEFAULT_TOP_N)?,
            match_score_rounding: match std::env::var("MATCH_SCORE_ROUNDING") {
                Ok(raw) => raw
                    .parse()
                    .map_err(|e: String| anyhow!("MATCH_SCORE_ROUNDING is invalid: {e}"))?,
                Err(_) => ScoreRounding::default(),
            },
            match_stopwords_path: std::env::var("MATCH_STOPWORDS_PATH").ok().map(PathBuf::from),
            session_capacity: parse_env("SESSION_CAPACITY", 1024)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }

    /// Builds the analyzer settings, reading the stopword file when one is configured.
    pub fn analyzer_config(&self) -> Result<AnalyzerConfig> {
        let stopwords = match &self.match_stopwords_path {
            Some(path) => StopwordSet::load(path)?,
            None => StopwordSet::default(),
        };
        Ok(AnalyzerConfig {
            stopwords,
            top_n: self.match_top_keywords,
            rounding: self.match_score_rounding,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        groq_api_key: "test-key".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        match_top_keywords: DEFAULT_TOP_N,
        match_score_rounding: ScoreRounding::HalfEven,
        match_stopwords_path: None,
        session_capacity: 16,
        max_upload_bytes: 1024 * 1024,
    }
}
