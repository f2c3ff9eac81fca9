//! HTTP route handlers for Axum.

use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::api::{
    error::ApiError,
    types::{HomeResponse, PredictResponse},
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

pub async fn home(State(state): State<AppState>) -> Json<HomeResponse> {
    Json(HomeResponse::new(state.readiness.status()))
}

/// Availability is checked before the body is inspected.
#[instrument(skip_all)]
pub async fn predict(State(state): State<AppState>, body: Bytes) -> ApiResult<PredictResponse> {
    let index = state.readiness.index()?;
    let symptoms = extract_symptoms(&body)?;
    let matches = index.query(&symptoms, &state.options)?;
    debug!(results = matches.len(), "ranked catalogue");
    Ok(Json(PredictResponse::new(symptoms, matches)))
}

/// Pull `symptoms` out of a loosely-formed JSON body.
///
/// Anything other than an object carrying a string (or null) `symptoms`
/// counts as missing; null and blank strings count as empty.
pub fn extract_symptoms(body: &[u8]) -> Result<String, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ApiError::MissingSymptoms)?;
    let field = value
        .as_object()
        .and_then(|object| object.get("symptoms"))
        .ok_or(ApiError::MissingSymptoms)?;
    match field {
        Value::Null => Err(ApiError::EmptySymptoms),
        Value::String(s) if s.trim().is_empty() => Err(ApiError::EmptySymptoms),
        Value::String(s) => Ok(s.clone()),
        _ => Err(ApiError::MissingSymptoms),
    }
}
