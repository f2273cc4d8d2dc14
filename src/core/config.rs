//! Configuration types for the classifier and the HTTP server.
//!
//! The original deployment hard-coded the model path, input resolution, and
//! decision threshold. These structs make all of that explicit so it can be
//! substituted in tests and overridden at startup.

use crate::core::errors::ClassifierError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default spatial resolution the model was trained on.
pub const DEFAULT_INPUT_SHAPE: (u32, u32) = (256, 256);

/// Default decision threshold for the positive ("Dog") class.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

fn default_input_shape() -> (u32, u32) {
    DEFAULT_INPUT_SHAPE
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

/// Configuration for the binary image classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Path to the consolidated ONNX model artifact.
    pub model_path: PathBuf,
    /// Input shape the image is resized to, as (width, height).
    #[serde(default = "default_input_shape")]
    pub input_shape: (u32, u32),
    /// Probability threshold above which the positive class is predicted.
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    /// Optional display name for the model, used in logs.
    #[serde(default)]
    pub model_name: Option<String>,
}

impl ClassifierConfig {
    /// Creates a configuration for the given model path with default
    /// resolution and threshold.
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            input_shape: DEFAULT_INPUT_SHAPE,
            threshold: DEFAULT_THRESHOLD,
            model_name: None,
        }
    }

    /// Sets the input shape as (width, height).
    pub fn with_input_shape(mut self, input_shape: (u32, u32)) -> Self {
        self.input_shape = input_shape;
        self
    }

    /// Sets the decision threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Validates the configuration.
    ///
    /// The input dimensions must be nonzero and the threshold must lie
    /// strictly inside (0, 1).
    pub fn validate(&self) -> Result<(), ClassifierError> {
        let (width, height) = self.input_shape;
        if width == 0 || height == 0 {
            return Err(ClassifierError::config_error_with_context(
                "input_shape",
                &format!("({width}, {height})"),
                "dimensions must be greater than 0",
            ));
        }

        if !self.threshold.is_finite() || self.threshold <= 0.0 || self.threshold >= 1.0 {
            return Err(ClassifierError::config_error_with_context(
                "threshold",
                &self.threshold.to_string(),
                "must lie strictly between 0 and 1",
            ));
        }

        Ok(())
    }
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_body_bytes() -> usize {
    32 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// Validates the server configuration.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.host.is_empty() {
            return Err(ClassifierError::config_error("host must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(ClassifierError::config_error(
                "max_body_bytes must be greater than 0",
            ));
        }
        Ok(())
    }
}
