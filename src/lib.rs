//! Symptom matching over a health condition catalogue.
//!
//! The catalogue is indexed once with TF-IDF weighting
//! ([`matcher::CatalogueIndex`]) and queried by cosine similarity, either
//! through the axum service in [`api`] or the `query` sub-command.

pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod matcher;
pub mod nlp;
