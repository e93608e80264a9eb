//! HTTP routes and handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use spamguard_core::{ClassificationRequest, ClassificationResult, Error};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);
    let body_limit = RequestBodyLimitLayer::new(state.config.max_body_bytes);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/predict", post(predict))
        .fallback(fallback)
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Permissive CORS unless an origin list is configured
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "SpamGuard Email Spam Classifier API",
        "status": "active",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "predict": "/predict",
            "metrics": "/metrics",
        }
    }))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.is_ready() {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                model_loaded: true,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable",
                model_loaded: false,
            }),
        )
    }
}

async fn metrics(State(state): State<AppState>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

/// Classify one email
async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<ClassificationRequest>, JsonRejection>,
) -> Result<Json<ClassificationResult>, AppError> {
    metrics::counter!("spamguard_requests_total").increment(1);

    let request_id = Uuid::new_v4();
    let span = info_span!("predict", %request_id);

    let result = span.in_scope(|| -> Result<ClassificationResult, AppError> {
        let Json(request) = payload?;
        classify(&state, &request)
    });

    if let Err(e) = &result {
        metrics::counter!("spamguard_errors_total", "kind" => e.kind()).increment(1);
    }
    result.map(Json)
}

fn classify(
    state: &AppState,
    request: &ClassificationRequest,
) -> Result<ClassificationResult, AppError> {
    request.validate()?;

    let prediction = state
        .normalizer
        .classify(&request.email_text)
        .map_err(|e| {
            if matches!(e, Error::ServiceUnavailable) {
                warn!("Rejected request: model not loaded");
            } else {
                error!("Prediction error: {}", e);
            }
            e
        })?;
    let result = prediction.result;

    metrics::counter!(
        "spamguard_predictions_total",
        "label" => result.label.as_str(),
        "confidence_source" => result.confidence_source.as_str()
    )
    .increment(1);
    metrics::histogram!("spamguard_prediction_latency_us").record(prediction.latency_us as f64);
    if !prediction.mapping.is_mapped() {
        metrics::counter!("spamguard_unmapped_labels_total").increment(1);
    }

    info!(
        "Prediction: {}, Confidence: {:.2} ({})",
        result.label,
        result.confidence,
        result.confidence_source.as_str()
    );

    Ok(result)
}

async fn fallback() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found" })))
}

/// Error handling
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Rejection(#[from] JsonRejection),

    #[error(transparent)]
    Core(#[from] Error),
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            Self::Rejection(_) => "bad_request",
            Self::Core(e) => e.kind(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Rejection(rejection) => (rejection.status(), rejection.body_text()),
            AppError::Core(Error::InvalidInput(msg)) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Core(Error::ServiceUnavailable) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Model not loaded".to_string())
            }
            AppError::Core(Error::PredictionFailed(cause)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Prediction failed: {}", cause),
            ),
            AppError::Core(other) => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
