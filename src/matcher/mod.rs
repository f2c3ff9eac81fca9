//! Catalogue index and similarity matching.
//!
//! [`Readiness`] is resolved once at startup: either a fully built
//! [`CatalogueIndex`] or the reason indexing failed. Neither is mutated
//! afterwards, so request handlers share it behind an `Arc` without locks.

pub mod rank;

use thiserror::Error;
use tracing::{error, info, instrument};

pub use rank::{top_matches, RankOptions};

use crate::{
    config::Settings,
    data::{catalogue, CatalogueError, ConditionEntry},
    nlp::{cosine_similarity, TermVector, Vocabulary},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("catalogue is unavailable")]
    Unavailable,
    #[error("symptom input is empty")]
    EmptyQuery,
}

/// Catalogue entries with their vocabulary and TF-IDF vectors.
#[derive(Debug, Clone)]
pub struct CatalogueIndex {
    entries: Vec<ConditionEntry>,
    vocabulary: Vocabulary,
    vectors: Vec<TermVector>,
}

/// A catalogue entry paired with its similarity to a query.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub position: usize,
    pub entry: &'a ConditionEntry,
    pub score: f64,
}

impl CatalogueIndex {
    /// Fit the vocabulary over all symptom texts and vectorise every entry.
    pub fn build(entries: Vec<ConditionEntry>) -> Self {
        let texts: Vec<&str> = entries.iter().map(|e| e.symptoms.as_str()).collect();
        let vocabulary = Vocabulary::fit(&texts);
        let vectors = texts.iter().map(|text| vocabulary.vectorize(text)).collect();
        Self {
            entries,
            vocabulary,
            vectors,
        }
    }

    /// Load the configured dataset and index it.
    pub fn load(settings: &Settings) -> Result<Self, CatalogueError> {
        let entries = catalogue::load(&settings.data_path, &settings.symptom_column)?;
        Ok(Self::build(entries))
    }

    pub fn entries(&self) -> &[ConditionEntry] {
        &self.entries
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vectors(&self) -> &[TermVector] {
        &self.vectors
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Similarity of `query` against every entry, in load order.
    pub fn scores(&self, query: &str) -> Vec<f64> {
        let query_vector = self.vocabulary.vectorize(query);
        self.vectors
            .iter()
            .map(|vector| cosine_similarity(&query_vector, vector))
            .collect()
    }

    /// Rank catalogue entries against `query`.
    ///
    /// Blank input is rejected; otherwise at most `options.top_k` results
    /// are returned, each scoring above `options.min_score`.
    pub fn query(
        &self,
        query: &str,
        options: &RankOptions,
    ) -> Result<Vec<MatchResult<'_>>, MatchError> {
        if query.trim().is_empty() {
            return Err(MatchError::EmptyQuery);
        }
        let scores = self.scores(query);
        let results = top_matches(&scores, options)
            .into_iter()
            .map(|(position, score)| MatchResult {
                position,
                entry: &self.entries[position],
                score,
            })
            .collect();
        Ok(results)
    }
}

/// Startup outcome shared by every request.
#[derive(Debug)]
pub enum Readiness {
    Ready(CatalogueIndex),
    Degraded { reason: String },
}

impl Readiness {
    /// Load and index the configured dataset, logging the outcome.
    ///
    /// Load failures never propagate; they produce [`Readiness::Degraded`].
    #[instrument(skip(settings), fields(path = %settings.data_path.display()))]
    pub fn initialise(settings: &Settings) -> Self {
        let readiness = Self::from_result(CatalogueIndex::load(settings));
        match &readiness {
            Readiness::Ready(index) => info!(
                entries = index.len(),
                vocabulary = index.vocabulary().len(),
                "catalogue indexed"
            ),
            Readiness::Degraded { reason } => {
                error!(%reason, "catalogue load failed; matching requests will be rejected")
            }
        }
        readiness
    }

    pub fn from_result(result: Result<CatalogueIndex, CatalogueError>) -> Self {
        match result {
            Ok(index) => Readiness::Ready(index),
            Err(err) => Readiness::Degraded {
                reason: err.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready(_))
    }

    pub fn index(&self) -> Result<&CatalogueIndex, MatchError> {
        match self {
            Readiness::Ready(index) => Ok(index),
            Readiness::Degraded { .. } => Err(MatchError::Unavailable),
        }
    }

    /// Status word shown by the service banner.
    pub fn status(&self) -> &'static str {
        if self.is_ready() {
            "running"
        } else {
            "data load failed"
        }
    }
}
