//! Shared DTOs for JSON responses.

use serde::Serialize;

use crate::matcher::MatchResult;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConditionDto {
    pub health_condition: String,
    pub doctor_specialist: String,
    pub diet_recommendations: String,
    pub foods_to_avoid: String,
    pub diet_routine: String,
    pub matched_symptoms: String,
    pub similarity_score: f64,
}

impl From<MatchResult<'_>> for ConditionDto {
    fn from(value: MatchResult<'_>) -> Self {
        let entry = value.entry;
        ConditionDto {
            health_condition: entry.health_condition.clone(),
            doctor_specialist: entry.doctor_specialist.clone(),
            diet_recommendations: entry.diet_recommendations.clone(),
            foods_to_avoid: entry.foods_to_avoid.clone(),
            diet_routine: entry.diet_routine.clone(),
            matched_symptoms: entry.symptoms.clone(),
            similarity_score: value.score,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PredictResponse {
    pub input_symptoms: String,
    pub results: Vec<ConditionDto>,
}

impl PredictResponse {
    pub fn new(input_symptoms: impl Into<String>, matches: Vec<MatchResult<'_>>) -> Self {
        Self {
            input_symptoms: input_symptoms.into(),
            results: matches.into_iter().map(ConditionDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeResponse {
    pub message: String,
    pub usage: Usage,
}

#[derive(Debug, Clone, Serialize)]
pub struct Usage {
    pub endpoint: &'static str,
    pub method: &'static str,
    pub body_format: BodyFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyFormat {
    pub symptoms: &'static str,
}

impl HomeResponse {
    pub fn new(status: &str) -> Self {
        Self {
            message: format!("Health Condition API is {status} 🚀"),
            usage: Usage {
                endpoint: "/predict",
                method: "POST",
                body_format: BodyFormat { symptoms: "string" },
            },
        }
    }
}
