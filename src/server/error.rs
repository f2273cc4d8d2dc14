//! HTTP error mapping for the prediction API.
//!
//! The upstream deployment left failures to the framework's defaults; here
//! each error kind maps to a specific status code with a JSON body.

use crate::core::errors::{ClassifierError, ProcessingStage};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors surfaced by the HTTP layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The multipart form did not carry a non-empty `file` field.
    #[error("no file uploaded: expected a non-empty multipart field named 'file'")]
    MissingFile,

    /// The multipart body itself was malformed.
    #[error("malformed multipart upload: {0}")]
    Upload(String),

    /// A failure from the classifier.
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

impl ApiError {
    /// Status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFile | ApiError::Upload(_) => StatusCode::BAD_REQUEST,
            ApiError::Classifier(ClassifierError::ImageDecode(_))
            | ApiError::Classifier(ClassifierError::Processing {
                kind: ProcessingStage::Decode,
                ..
            }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Classifier(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "prediction request failed");
        } else {
            tracing::debug!(error = %self, "rejected prediction request");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
