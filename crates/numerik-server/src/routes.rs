//! Route definitions.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{self, AppState};

/// Create the API router.
///
/// Every method route is served both with and without the trailing slash.
///
/// # Arguments
/// * `max_iterations` - Iteration cap for the root finders
pub fn create_router(max_iterations: u32) -> Router {
    let state = Arc::new(AppState { max_iterations });

    Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Root finding
        .route("/api/bisection/", post(handlers::bisection))
        .route("/api/bisection", post(handlers::bisection))
        .route("/api/newton-raphson/", post(handlers::newton_raphson))
        .route("/api/newton-raphson", post(handlers::newton_raphson))
        // Differentiation
        .route("/api/finite-differences/", post(handlers::finite_differences))
        .route("/api/finite-differences", post(handlers::finite_differences))
        // Error analysis
        .route("/api/error-calculation/", post(handlers::error_calculation))
        .route("/api/error-calculation", post(handlers::error_calculation))
        // Interpolation
        .route("/api/newton-forward-diff/", post(handlers::newton_forward_diff))
        .route("/api/newton-forward-diff", post(handlers::newton_forward_diff))
        .with_state(state)
}
