//! Text processing: tokenization and TF-IDF weighting.

pub mod tfidf;
pub mod tokenize;

pub use tfidf::{cosine_similarity, TermVector, Vocabulary};
pub use tokenize::tokenize;
