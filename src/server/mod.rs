//! HTTP surface of the inference service.
//!
//! One prediction route plus a liveness probe, with the loaded classifier
//! injected as shared read-only state. Cross-origin requests are permitted
//! unconditionally, mirroring the upstream deployment.

pub mod error;
pub mod routes;

pub use error::ApiError;

use crate::classifier::CatDogClassifier;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Builds the application router.
///
/// `max_body_bytes` bounds the upload size; the classifier is shared across
/// all requests and never mutated after load.
pub fn router(classifier: Arc<CatDogClassifier>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/predict/", post(routes::predict))
        .route("/health", get(routes::health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::very_permissive())
        .with_state(classifier)
}
