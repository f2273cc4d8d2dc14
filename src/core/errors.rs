//! Error types for the classification service.
//!
//! This module defines the error types that can occur while serving
//! predictions, including image decoding errors, preprocessing errors,
//! inference errors, and configuration errors, along with utility
//! constructors for creating them with appropriate context.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Enum representing different stages of the preprocessing pipeline.
///
/// This enum is used to identify which stage of the pipeline an error
/// occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Error occurred while decoding image bytes.
    Decode,
    /// Error occurred during image resizing.
    Resize,
    /// Error occurred during pixel normalization.
    Normalization,
    /// Error occurred during tensor operations.
    TensorOperation,
    /// Error occurred while post-processing the model output.
    PostProcessing,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Decode => write!(f, "decode"),
            ProcessingStage::Resize => write!(f, "resize"),
            ProcessingStage::Normalization => write!(f, "normalization"),
            ProcessingStage::TensorOperation => write!(f, "tensor operation"),
            ProcessingStage::PostProcessing => write!(f, "post-processing"),
        }
    }
}

/// Enum representing the errors that can occur in the classification service.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// The uploaded bytes could not be decoded as a supported image format.
    #[error("image decode")]
    ImageDecode(#[source] image::ImageError),

    /// Error occurred during a preprocessing stage.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of the pipeline where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The model artifact could not be loaded.
    #[error("failed to load model at '{path}': {context}")]
    ModelLoad {
        /// Path to the model artifact.
        path: PathBuf,
        /// Additional context about the failure.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

/// Convenient result alias for classifier operations.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

impl ClassifierError {
    /// Creates a `ClassifierError` for a preprocessing stage failure.
    pub fn processing(
        kind: ProcessingStage,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a `ClassifierError` for a model-loading failure.
    pub fn model_load(
        path: impl AsRef<Path>,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ModelLoad {
            path: path.as_ref().to_path_buf(),
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a `ClassifierError` for invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a `ClassifierError` for configuration errors.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Creates a `ClassifierError` for configuration errors with field context.
    pub fn config_error_with_context(field: &str, value: &str, reason: &str) -> Self {
        Self::ConfigError {
            message: format!("field '{field}' with value '{value}': {reason}"),
        }
    }
}

impl From<image::ImageError> for ClassifierError {
    fn from(error: image::ImageError) -> Self {
        Self::ImageDecode(error)
    }
}
