//! Request handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, warn};

use numerik_math::requests::{
    BisectionRequest, ErrorCalculationRequest, FiniteDifferencesRequest, NewtonForwardRequest,
    NewtonRaphsonRequest, Outcome,
};

/// Application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Iteration cap for bisection and Newton-Raphson
    pub max_iterations: u32,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Error response.
#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Unreadable bodies are reported in the same `{"error": ...}` shape as
/// method failures.
fn rejected(operation: &str, rejection: &JsonRejection) -> Response {
    warn!(operation, error = %rejection.body_text(), "rejected request body");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(rejection.body_text())),
    )
        .into_response()
}

fn respond<T: Serialize>(operation: &str, outcome: Outcome<T>) -> Response {
    match &outcome {
        Outcome::Success(_) => {
            debug!(operation, "request succeeded");
            (StatusCode::OK, Json(outcome)).into_response()
        }
        Outcome::Failure { error } => {
            warn!(operation, error = %error, "request failed");
            (StatusCode::BAD_REQUEST, Json(outcome)).into_response()
        }
    }
}

/// Bisection handler.
pub async fn bisection(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BisectionRequest>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(request)) => respond("bisection", request.run(state.max_iterations)),
        Err(rejection) => rejected("bisection", &rejection),
    }
}

/// Newton-Raphson handler.
pub async fn newton_raphson(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewtonRaphsonRequest>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(request)) => respond("newton_raphson", request.run(state.max_iterations)),
        Err(rejection) => rejected("newton_raphson", &rejection),
    }
}

/// Finite differences handler (function mode or data mode).
pub async fn finite_differences(
    payload: Result<Json<FiniteDifferencesRequest>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(request)) => respond("finite_differences", request.run()),
        Err(rejection) => rejected("finite_differences", &rejection),
    }
}

/// Error calculation handler.
pub async fn error_calculation(
    payload: Result<Json<ErrorCalculationRequest>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(request)) => respond("error_calculation", request.run()),
        Err(rejection) => rejected("error_calculation", &rejection),
    }
}

/// Newton forward-difference interpolation handler.
pub async fn newton_forward_diff(
    payload: Result<Json<NewtonForwardRequest>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(request)) => respond("newton_forward_diff", request.run()),
        Err(rejection) => rejected("newton_forward_diff", &rejection),
    }
}
