//! Helpers for working directly with ONNX Runtime sessions.

use crate::core::errors::ClassifierError;
use ort::logging::LogLevel;
use ort::session::Session;
use std::path::Path;

/// Loads an ONNX Runtime session from a model artifact on disk.
///
/// ORT's own logging is capped at error level so that request-path logs stay
/// with the `tracing` subscriber.
pub fn load_session(model_path: impl AsRef<Path>) -> Result<Session, ClassifierError> {
    let path = model_path.as_ref();
    let session = Session::builder()
        .and_then(|b| b.with_log_level(LogLevel::Error))
        .and_then(|b| b.commit_from_file(path))
        .map_err(|e| {
            ClassifierError::model_load(
                path,
                "failed to create ONNX session; verify the model file exists and is readable",
                e,
            )
        })?;
    Ok(session)
}
