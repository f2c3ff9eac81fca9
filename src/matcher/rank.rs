//! Top-k selection over similarity scores.

use std::cmp::Ordering;

/// Ranking knobs applied after scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankOptions {
    /// Entries kept after sorting, before thresholding.
    pub top_k: usize,
    /// Scores must be strictly greater than this to be returned.
    pub min_score: f64,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_score: 0.05,
        }
    }
}

/// Rank `scores` (indexed by catalogue position) and return `(position, score)` pairs.
///
/// Sorting is stable so equal scores keep load order. The list is cut to
/// `top_k` first and only then filtered by `min_score`.
pub fn top_matches(scores: &[f64], options: &RankOptions) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(options.top_k);
    ranked.retain(|(_, score)| *score > options.min_score);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_descending() {
        let ranked = top_matches(&[0.2, 0.9, 0.5], &RankOptions::default());
        assert_eq!(ranked, vec![(1, 0.9), (2, 0.5), (0, 0.2)]);
    }

    #[test]
    fn ties_keep_load_order() {
        let ranked = top_matches(&[0.3, 0.7, 0.3, 0.7], &RankOptions::default());
        let order: Vec<usize> = ranked.iter().map(|(idx, _)| *idx).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn truncates_before_filtering() {
        let scores = [0.9, 0.8, 0.7, 0.6, 0.5, 0.4];
        let ranked = top_matches(&scores, &RankOptions::default());
        assert_eq!(ranked.len(), 5);
        assert!(ranked.iter().all(|(idx, _)| *idx != 5));

        let options = RankOptions {
            top_k: 2,
            min_score: 0.85,
        };
        assert_eq!(top_matches(&scores, &options), vec![(0, 0.9)]);
    }

    #[test]
    fn threshold_is_strict() {
        let ranked = top_matches(&[0.05, 0.0, 0.050001], &RankOptions::default());
        assert_eq!(ranked, vec![(2, 0.050001)]);
    }

    #[test]
    fn empty_scores_yield_nothing() {
        assert!(top_matches(&[], &RankOptions::default()).is_empty());
    }
}
