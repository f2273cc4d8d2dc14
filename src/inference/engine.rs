//! ONNX Runtime inference engine for the binary classifier.
//!
//! The model is loaded once and shared read-only for the process lifetime.
//! [`ForwardModel`] is the seam between preprocessing and the runtime so that
//! tests can substitute a deterministic mock for the real session.

use crate::core::errors::ClassifierError;
use crate::inference::session::load_session;
use ndarray::ArrayView4;
use ort::session::Session;
use ort::value::{TensorRef, ValueType};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Forward evaluation of a trained binary classifier.
///
/// Implementations take a normalized NHWC image tensor and return the raw
/// probability of the positive ("Dog") class in `[0, 1]`.
pub trait ForwardModel: Send + Sync {
    /// Runs the model's forward pass on a `(1, H, W, 3)` tensor.
    fn forward(&self, input: ArrayView4<'_, f32>) -> Result<f32, ClassifierError>;
}

/// ONNX Runtime backed classifier session.
///
/// Input and output tensor names are discovered from session metadata at
/// load time rather than hard-coded.
pub struct OrtClassifier {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    model_path: PathBuf,
    model_name: String,
}

impl std::fmt::Debug for OrtClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtClassifier")
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("model_path", &self.model_path)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl OrtClassifier {
    /// Loads the model artifact and discovers its tensor names.
    ///
    /// Fails if the artifact is missing or corrupt, or if the graph exposes
    /// no inputs or outputs.
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = model_path.as_ref();
        let session = load_session(path)?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| {
                ClassifierError::model_load(
                    path,
                    "model exposes no input tensors",
                    std::io::Error::new(std::io::ErrorKind::InvalidData, "empty input list"),
                )
            })?;
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| {
                ClassifierError::model_load(
                    path,
                    "model exposes no output tensors",
                    std::io::Error::new(std::io::ErrorKind::InvalidData, "empty output list"),
                )
            })?;

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown_model")
            .to_string();

        tracing::info!(
            model = %model_name,
            input = %input_name,
            output = %output_name,
            "loaded ONNX classifier session"
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            model_path: path.to_path_buf(),
            model_name,
        })
    }

    /// Returns the model path associated with this engine.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Returns the model name associated with this engine.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Attempts to retrieve the primary input tensor shape from the session.
    ///
    /// Dynamic dimensions (e.g. -1) are returned as-is.
    pub fn primary_input_shape(&self) -> Option<Vec<i64>> {
        let session_guard = self.session.lock().ok()?;
        let input = session_guard.inputs.first()?;
        match &input.input_type {
            ValueType::Tensor { shape, .. } => Some(shape.iter().copied().collect()),
            _ => None,
        }
    }
}

impl ForwardModel for OrtClassifier {
    fn forward(&self, input: ArrayView4<'_, f32>) -> Result<f32, ClassifierError> {
        let input_shape = input.shape().to_vec();

        let input_tensor = TensorRef::from_array_view(input).map_err(|e| {
            ClassifierError::processing(
                crate::core::ProcessingStage::TensorOperation,
                &format!("failed to convert input tensor with shape {input_shape:?}"),
                e,
            )
        })?;
        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let mut session_guard = self.session.lock().map_err(|_| {
            ClassifierError::invalid_input("failed to acquire model session lock")
        })?;
        let outputs = session_guard.run(inputs)?;

        let (_, output_data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                ClassifierError::processing(
                    crate::core::ProcessingStage::PostProcessing,
                    &format!(
                        "failed to extract output tensor '{}' as f32",
                        self.output_name
                    ),
                    e,
                )
            })?;

        // Binary sigmoid head: the first element is the Dog probability.
        output_data.first().copied().ok_or_else(|| {
            ClassifierError::invalid_input(format!(
                "model '{}' produced an empty output tensor",
                self.model_name
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_model_file_is_a_load_error() {
        let result = OrtClassifier::new("does_not_exist.onnx");
        assert!(matches!(result, Err(ClassifierError::ModelLoad { .. })));
    }
}
