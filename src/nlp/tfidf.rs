//! TF-IDF vocabulary and sparse term vectors.
//!
//! A [`Vocabulary`] is fitted once over the catalogue symptom texts. Every
//! vector compared afterwards, catalogue or query, is produced by the same
//! vocabulary through [`Vocabulary::vectorize`].

use std::collections::{BTreeMap, HashMap, HashSet};

use indexmap::IndexMap;

use super::tokenize::tokenize;

/// Fixed term positions with their smoothed inverse document frequencies.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// term -> idf; insertion order is the term position.
    terms: IndexMap<String, f64>,
}

impl Vocabulary {
    /// Fit the vocabulary over `documents`.
    ///
    /// Terms are positioned in lexicographic order and weighted with
    /// `ln((1 + n) / (1 + df)) + 1`.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let n = documents.len();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let unique: HashSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut sorted: Vec<(String, usize)> = doc_freq.into_iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));

        let terms = sorted
            .into_iter()
            .map(|(term, df)| (term, smoothed_idf(n, df)))
            .collect();
        Self { terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn position(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    #[cfg(test)]
    pub(crate) fn idf(&self, term: &str) -> Option<f64> {
        self.terms.get(term).copied()
    }

    #[cfg(test)]
    pub(crate) fn term_at(&self, position: usize) -> Option<&str> {
        self.terms.get_index(position).map(|(term, _)| term.as_str())
    }

    /// Build the L2-normalised TF-IDF vector of `text`.
    ///
    /// Terms outside the vocabulary are ignored; text without any known term
    /// yields the zero vector.
    pub fn vectorize(&self, text: &str) -> TermVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in tokenize(text) {
            if let Some(position) = self.terms.get_index_of(term.as_str()) {
                *counts.entry(position).or_insert(0.0) += 1.0;
            }
        }

        let mut weights: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(position, tf)| (position, tf * self.terms[position]))
            .collect();
        let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut weights {
                *weight /= norm;
            }
        }
        TermVector { weights }
    }
}

fn smoothed_idf(documents: usize, doc_freq: usize) -> f64 {
    ((1.0 + documents as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
}

/// Sparse vector of `(position, weight)` pairs sorted by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    weights: Vec<(usize, f64)>,
}

impl TermVector {
    pub fn is_zero(&self) -> bool {
        self.weights.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn nnz(&self) -> usize {
        self.weights.len()
    }

    #[cfg(test)]
    pub(crate) fn weight(&self, position: usize) -> f64 {
        self.weights
            .binary_search_by_key(&position, |(p, _)| *p)
            .map(|idx| self.weights[idx].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 {
        self.weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &TermVector) -> f64 {
        let (mut i, mut j, mut acc) = (0, 0, 0.0);
        while i < self.weights.len() && j < other.weights.len() {
            let (pa, wa) = self.weights[i];
            let (pb, wb) = other.weights[j];
            match pa.cmp(&pb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        acc
    }
}

/// Cosine similarity, 0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        a.dot(b) / (norm_a * norm_b)
    }
}
