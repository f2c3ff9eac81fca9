//! Runtime configuration utilities for symptom-match.

use std::{env, path::PathBuf, str::FromStr};

use crate::matcher::RankOptions;

const DEFAULT_DATA_PATH: &str = "health_conditions_dataset.xlsx";
const DEFAULT_SYMPTOM_COLUMN: &str = "symptoms";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Condition dataset: spreadsheet, CSV or Parquet.
    pub data_path: PathBuf,
    /// Column holding the free-text symptom description.
    pub symptom_column: String,
    /// Bind address for the HTTP server.
    pub host: String,
    /// Bind port for the HTTP server.
    pub port: u16,
    /// Ranked entries kept before thresholding.
    pub top_k: usize,
    /// Minimum similarity (exclusive) for a match to be returned.
    pub min_score: f64,
}

impl Default for Settings {
    fn default() -> Self {
        let rank = RankOptions::default();
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            symptom_column: DEFAULT_SYMPTOM_COLUMN.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            top_k: rank.top_k,
            min_score: rank.min_score,
        }
    }
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    ///
    /// Values that fail to parse fall back to their defaults.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        let data_path = env::var("DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);
        let symptom_column = env::var("SYMPTOM_COLUMN").unwrap_or(defaults.symptom_column);
        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = parsed_var("PORT").unwrap_or(defaults.port);
        let top_k = parsed_var("TOP_K").unwrap_or(defaults.top_k);
        let min_score = parsed_var::<f64>("MIN_SCORE")
            .filter(|v| v.is_finite())
            .unwrap_or(defaults.min_score);

        Self {
            data_path,
            symptom_column,
            host,
            port,
            top_k,
            min_score,
        }
    }

    pub fn rank_options(&self) -> RankOptions {
        RankOptions {
            top_k: self.top_k,
            min_score: self.min_score,
        }
    }
}

fn parsed_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
