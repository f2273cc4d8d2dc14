//! Offline model-artifact materialization.
//!
//! A model bundle is a directory holding the classifier's structural
//! configuration (`config.json`) and its weights graph (`model.onnx`).
//! [`MaterializeJob`] validates that the two halves agree and re-serializes
//! them as a single consolidated artifact for the inference service to load.
//!
//! This is a one-shot, human-supervised step: every failure propagates
//! immediately and nothing is retried.

use crate::core::errors::ClassifierError;
use crate::inference::OrtClassifier;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the structural configuration inside a bundle.
pub const CONFIG_FILE: &str = "config.json";

/// File name of the weights graph inside a bundle.
pub const WEIGHTS_FILE: &str = "model.onnx";

/// Structural metadata for a saved classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Human-readable model name.
    pub name: String,
    /// Expected input resolution as (width, height).
    pub input_shape: (u32, u32),
    /// Class labels in output order; a binary classifier has exactly two.
    pub labels: Vec<String>,
}

impl ModelSpec {
    /// Validates the spec against what the service can serve.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.labels.len() != 2 {
            return Err(ClassifierError::invalid_input(format!(
                "expected exactly 2 class labels for a binary classifier, got {}",
                self.labels.len()
            )));
        }
        let (width, height) = self.input_shape;
        if width == 0 || height == 0 {
            return Err(ClassifierError::config_error_with_context(
                "input_shape",
                &format!("({width}, {height})"),
                "dimensions must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// One-shot job that consolidates a model bundle into a single artifact.
#[derive(Debug, Clone)]
pub struct MaterializeJob {
    bundle_dir: PathBuf,
    output_path: PathBuf,
    keep_config: bool,
}

impl MaterializeJob {
    /// Creates a job reading from `bundle_dir` and writing to `output_path`.
    pub fn new(bundle_dir: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            bundle_dir: bundle_dir.into(),
            output_path: output_path.into(),
            keep_config: false,
        }
    }

    /// Also writes the validated config as a JSON sidecar next to the output.
    pub fn keep_config(mut self, keep: bool) -> Self {
        self.keep_config = keep;
        self
    }

    /// Reads and validates the bundle's structural configuration.
    pub fn read_spec(&self) -> Result<ModelSpec, ClassifierError> {
        let config_path = self.bundle_dir.join(CONFIG_FILE);
        let raw = std::fs::read_to_string(&config_path)?;
        let spec: ModelSpec = serde_json::from_str(&raw).map_err(|e| {
            ClassifierError::config_error(format!(
                "malformed {} in '{}': {e}",
                CONFIG_FILE,
                self.bundle_dir.display()
            ))
        })?;
        spec.validate()?;
        Ok(spec)
    }

    /// Runs the job: parse config, verify the weights load and match the
    /// declared architecture, then write the consolidated artifact.
    pub fn run(&self) -> Result<(), ClassifierError> {
        let spec = self.read_spec()?;
        let weights_path = self.bundle_dir.join(WEIGHTS_FILE);

        // Reconstructing the session proves the weights deserialize and
        // their shapes satisfy the graph.
        let engine = OrtClassifier::new(&weights_path)?;
        verify_input_shape(&spec, engine.primary_input_shape().as_deref())?;

        std::fs::copy(&weights_path, &self.output_path)?;
        if self.keep_config {
            let sidecar = self.output_path.with_extension("config.json");
            let raw = serde_json::to_string_pretty(&spec)
                .map_err(|e| ClassifierError::config_error(e.to_string()))?;
            std::fs::write(sidecar, raw)?;
        }

        tracing::info!(
            model = %spec.name,
            output = %self.output_path.display(),
            "model materialization successful"
        );
        Ok(())
    }
}

/// Checks that the declared (width, height) is compatible with the graph's
/// primary NHWC input. Dynamic dimensions are accepted.
fn verify_input_shape(spec: &ModelSpec, shape: Option<&[i64]>) -> Result<(), ClassifierError> {
    let Some(shape) = shape else {
        return Ok(());
    };
    if shape.len() != 4 {
        return Err(ClassifierError::invalid_input(format!(
            "expected a 4-dimensional NHWC input, model declares {shape:?}"
        )));
    }

    let (width, height) = spec.input_shape;
    let static_mismatch = |dim: i64, expected: u32| dim > 0 && dim != i64::from(expected);
    if static_mismatch(shape[1], height) || static_mismatch(shape[2], width) {
        return Err(ClassifierError::invalid_input(format!(
            "config declares input ({width}, {height}) but model expects {shape:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ModelSpec {
        ModelSpec {
            name: "cat-vs-dog".to_string(),
            input_shape: (256, 256),
            labels: vec!["Cat".to_string(), "Dog".to_string()],
        }
    }

    #[test]
    fn missing_bundle_dir_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let job = MaterializeJob::new(dir.path().join("absent"), dir.path().join("out.onnx"));
        assert!(matches!(job.run(), Err(ClassifierError::Io(_))));
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{not json").unwrap();
        let job = MaterializeJob::new(dir.path(), dir.path().join("out.onnx"));
        assert!(matches!(job.run(), Err(ClassifierError::ConfigError { .. })));
    }

    #[test]
    fn wrong_label_count_is_rejected() {
        let mut bad = spec();
        bad.labels.push("Bird".to_string());
        assert!(matches!(
            bad.validate(),
            Err(ClassifierError::InvalidInput { .. })
        ));
    }

    #[test]
    fn missing_weights_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let raw = serde_json::to_string(&spec()).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), raw).unwrap();
        let job = MaterializeJob::new(dir.path(), dir.path().join("out.onnx"));
        assert!(matches!(job.run(), Err(ClassifierError::ModelLoad { .. })));
    }

    #[test]
    fn input_shape_compatibility() {
        let s = spec();
        // No declared shape, dynamic dims, and exact matches all pass.
        assert!(verify_input_shape(&s, None).is_ok());
        assert!(verify_input_shape(&s, Some(&[-1, -1, -1, 3])).is_ok());
        assert!(verify_input_shape(&s, Some(&[1, 256, 256, 3])).is_ok());
        // Static mismatches and non-4D inputs fail.
        assert!(verify_input_shape(&s, Some(&[1, 224, 224, 3])).is_err());
        assert!(verify_input_shape(&s, Some(&[1, 3, 256])).is_err());
    }
}
