//! # API REST
//!
//! REST API implementation for Symptomatic.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for request/response types and `symptomatic-core` for prediction.

#![warn(rust_2018_idioms)]

use api_shared::{ErrorRes, HealthRes, HealthService, PredictReq, PredictRes, Prediction, SymptomsRes};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use symptomatic_core::{PredictionService, PredictorError};
use symptomatic_types::{Severity, SymptomText};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Detail returned with `400` when the description is empty.
pub const EMPTY_TEXT_DETAIL: &str = "No symptom description provided";

/// Detail returned with `500`; the cause is only logged.
pub const INTERNAL_ERROR_DETAIL: &str = "Internal error";

type ApiError = (StatusCode, Json<ErrorRes>);

fn internal_error(err: PredictorError) -> ApiError {
    tracing::error!("Predict error: {:?}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorRes::new(INTERNAL_ERROR_DETAIL)),
    )
}

/// Application state shared across REST API handlers
///
/// Holds the immutable prediction service built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub service: PredictionService,
}

#[derive(OpenApi)]
#[openapi(
    paths(read_root, list_symptoms, predict),
    components(schemas(
        HealthRes,
        SymptomsRes,
        PredictReq,
        PredictRes,
        Prediction,
        ErrorRes,
        Severity
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/api/symptoms", get(list_symptoms))
        .route("/api/predict", post(predict))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Liveness message", body = HealthRes)
    )
)]
/// Root liveness endpoint
#[axum::debug_handler]
async fn read_root(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/symptoms",
    responses(
        (status = 200, description = "Recognised symptoms", body = SymptomsRes)
    )
)]
/// List the symptoms the model recognises
///
/// Names are returned in human-readable form (underscores replaced by spaces), in the order the
/// model uses for its feature vector.
#[axum::debug_handler]
async fn list_symptoms(State(state): State<AppState>) -> Json<SymptomsRes> {
    Json(SymptomsRes {
        symptoms: state.service.symptoms().to_vec(),
    })
}

#[utoipa::path(
    post,
    path = "/api/predict",
    request_body = PredictReq,
    responses(
        (status = 200, description = "Ranked predictions", body = PredictRes),
        (status = 400, description = "Empty symptom description", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Predict diseases from a free-text symptom description
///
/// # Returns
/// * `Ok(Json<PredictRes>)` - Up to three diseases, most probable first, plus the symptoms
///   recognised in the text. When nothing is recognised both lists are empty and `message`
///   explains why.
///
/// # Errors
/// Returns `400 Bad Request` if the text is the empty string, and
/// `500 Internal Server Error` if the model cannot produce a prediction.
#[axum::debug_handler]
async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictReq>,
) -> Result<Json<PredictRes>, ApiError> {
    let text = SymptomText::new(&req.text)
        .map_err(|_| (StatusCode::BAD_REQUEST, Json(ErrorRes::new(EMPTY_TEXT_DETAIL))))?;

    let outcome = state.service.predict(&text).map_err(internal_error)?;
    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;
    use symptomatic_core::constants::NO_SYMPTOMS_MESSAGE;
    use symptomatic_core::dataset::Dataset;
    use symptomatic_core::trainer::train;
    use symptomatic_core::{DiseaseCatalogue, DiseasePredictor, TrainingParams};
    use tower::ServiceExt;

    const CSV: &str = "fever,cough,headache,runny_nose,nausea,Disease
1,1,1,0,0,Influenza
1,1,0,0,0,Influenza
1,0,1,0,0,Influenza
0,1,0,1,0,Common Cold
0,1,1,1,0,Common Cold
0,0,0,1,0,Common Cold
0,0,1,0,1,Migraine
0,0,1,0,1,Migraine
0,0,1,0,0,Migraine
1,0,0,0,1,Gastroenteritis
0,0,0,0,1,Gastroenteritis
1,0,1,0,1,Gastroenteritis
";

    fn app() -> Router {
        let dataset = Dataset::from_csv_reader(CSV.as_bytes()).unwrap();
        let params = TrainingParams {
            n_estimators: 10,
            ..TrainingParams::default()
        };
        let (model, _) = train(&dataset, &params).unwrap();
        let predictor = DiseasePredictor::new(model, DiseaseCatalogue::builtin()).unwrap();
        router(AppState {
            service: PredictionService::new(predictor),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn predict_request(text: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::json!({ "text": text }).to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_root_message() {
        let (status, body) = send(app(), get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Disease Prediction API is running");
    }

    #[tokio::test]
    async fn test_symptoms_are_readable_and_stable() {
        let app = app();
        let (status, first) = send(app.clone(), get_request("/api/symptoms")).await;
        let (_, second) = send(app, get_request("/api/symptoms")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            first["symptoms"],
            serde_json::json!(["fever", "cough", "headache", "runny nose", "nausea"])
        );
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_predict_headache_and_fever() {
        let (status, body) = send(app(), predict_request("I have a headache and fever")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symptoms_found"], serde_json::json!(["fever", "headache"]));
        let predictions = body["predictions"].as_array().unwrap();
        assert!(!predictions.is_empty());
        assert!(predictions.len() <= 3);

        let probabilities: Vec<f64> = predictions
            .iter()
            .map(|p| p["probability"].as_f64().unwrap())
            .collect();
        assert!(probabilities.iter().all(|p| (0.0..=1.0).contains(p)));
        assert!(probabilities.windows(2).all(|w| w[0] >= w[1]));
        assert!(predictions.iter().all(|p| p["severity"].is_string()
            && p["description"].is_string()
            && p["advice"].is_string()));
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn test_predict_empty_text_is_bad_request() {
        let (status, body) = send(app(), predict_request("")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], EMPTY_TEXT_DETAIL);
    }

    #[tokio::test]
    async fn test_predict_whitespace_text_finds_nothing() {
        let (status, body) = send(app(), predict_request("   ")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "predictions": [],
                "symptoms_found": [],
                "message": NO_SYMPTOMS_MESSAGE
            })
        );
    }

    #[tokio::test]
    async fn test_prediction_failure_is_internal_error() {
        let response =
            internal_error(PredictorError::MissingMetadata("Scurvy".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        // The cause stays in the log, not the response.
        assert_eq!(body, serde_json::json!({ "detail": INTERNAL_ERROR_DETAIL }));
    }

    #[tokio::test]
    async fn test_predict_unrecognised_text() {
        let (status, body) = send(app(), predict_request("qwerty unrelated nonsense")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "predictions": [],
                "symptoms_found": [],
                "message": NO_SYMPTOMS_MESSAGE
            })
        );
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let (status, body) = send(app(), get_request("/api-docs/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"].get("/api/predict").is_some());
    }
}
