//! Request handlers for the prediction API.

use crate::classifier::{CatDogClassifier, Prediction};
use crate::server::error::ApiError;
use axum::extract::{Multipart, State};
use axum::Json;
use std::sync::Arc;

/// `POST /predict/` — classifies one uploaded image.
///
/// Reads the multipart field named `file` fully into memory and delegates to
/// the shared classifier. The request is handled synchronously; there is no
/// queueing or retry.
pub async fn predict(
    State(classifier): State<Arc<CatDogClassifier>>,
    mut multipart: Multipart,
) -> Result<Json<Prediction>, ApiError> {
    let mut image_data = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Upload(e.to_string()))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Upload(e.to_string()))?;
            image_data = Some(bytes);
            break;
        }
    }

    let bytes = image_data
        .filter(|b| !b.is_empty())
        .ok_or(ApiError::MissingFile)?;

    let prediction = classifier.predict(&bytes)?;
    tracing::info!(class = %prediction.class, confidence = prediction.confidence, "prediction served");
    Ok(Json(prediction))
}

/// `GET /health` — liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
