//! Request errors and their JSON rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::matcher::MatchError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Server is running but failed to load the necessary health data.")]
    Unavailable,
    #[error("Please provide 'symptoms' in JSON body")]
    MissingSymptoms,
    #[error("Symptom input cannot be empty.")]
    EmptySymptoms,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MissingSymptoms | ApiError::EmptySymptoms => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<MatchError> for ApiError {
    fn from(value: MatchError) -> Self {
        match value {
            MatchError::Unavailable => ApiError::Unavailable,
            MatchError::EmptyQuery => ApiError::EmptySymptoms,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
