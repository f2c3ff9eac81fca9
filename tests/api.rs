use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use symptom_match::{
    api::{router, AppState},
    config::Settings,
    data::ConditionEntry,
    matcher::{CatalogueIndex, RankOptions, Readiness},
};
use tower::ServiceExt;

fn ready_router() -> Router {
    let entries = vec![
        ConditionEntry {
            symptoms: "fever and cough".into(),
            health_condition: "Flu".into(),
            doctor_specialist: "General Physician".into(),
            diet_recommendations: "Warm fluids".into(),
            foods_to_avoid: "Cold drinks".into(),
            diet_routine: "Small frequent meals".into(),
        },
        ConditionEntry {
            symptoms: "skin rash and itching".into(),
            health_condition: "Eczema".into(),
            ..Default::default()
        },
    ];
    let readiness = Readiness::Ready(CatalogueIndex::build(entries));
    router(AppState::new(readiness, RankOptions::default()))
}

/// Router over a catalogue whose dataset file does not exist.
fn degraded_router(dir: &tempfile::TempDir) -> Router {
    let settings = Settings {
        data_path: dir.path().join("health_conditions_dataset.xlsx"),
        ..Default::default()
    };
    let readiness = Readiness::initialise(&settings);
    assert!(!readiness.is_ready());
    router(AppState::new(readiness, settings.rank_options()))
}

async fn send(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn home_reports_running() {
    let (status, body) = send(ready_router(), Method::GET, "/", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Health Condition API is running 🚀");
    insta::assert_json_snapshot!(body["usage"], @r###"
    {
      "body_format": {
        "symptoms": "string"
      },
      "endpoint": "/predict",
      "method": "POST"
    }
    "###);
}

#[tokio::test]
async fn predict_returns_ranked_conditions() {
    let (status, body) = send(
        ready_router(),
        Method::POST,
        "/predict",
        r#"{"symptoms": "I have a fever and cough"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input_symptoms"], "I have a fever and cough");
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    let top = &results[0];
    assert_eq!(top["health_condition"], "Flu");
    assert_eq!(top["doctor_specialist"], "General Physician");
    assert_eq!(top["diet_recommendations"], "Warm fluids");
    assert_eq!(top["foods_to_avoid"], "Cold drinks");
    assert_eq!(top["diet_routine"], "Small frequent meals");
    assert_eq!(top["matched_symptoms"], "fever and cough");
    assert!(top["similarity_score"].as_f64().unwrap() > 0.99);
}

#[tokio::test]
async fn predict_without_matches_is_empty_list() {
    let (status, body) = send(
        ready_router(),
        Method::POST,
        "/predict",
        r#"{"symptoms": "broken toe"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], Value::Array(Vec::new()));
}

#[tokio::test]
async fn predict_requires_symptoms_field() {
    for payload in ["{}", "", "[1, 2]"] {
        let (status, body) = send(ready_router(), Method::POST, "/predict", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please provide 'symptoms' in JSON body");
    }
}

#[tokio::test]
async fn predict_rejects_blank_symptoms() {
    let (status, body) = send(
        ready_router(),
        Method::POST,
        "/predict",
        r#"{"symptoms": "   "}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Symptom input cannot be empty.");
}

#[tokio::test]
async fn missing_dataset_degrades_service() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(degraded_router(&dir), Method::GET, "/", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Health Condition API is data load failed 🚀");

    for payload in [r#"{"symptoms": "fever"}"#, "{}", r#"{"symptoms": ""}"#] {
        let (status, body) = send(degraded_router(&dir), Method::POST, "/predict", payload).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Server is running but failed to load the necessary health data."
        );
    }
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::ORIGIN, "http://example.com")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"symptoms": "fever"}"#))
        .unwrap();
    let response = ready_router().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
