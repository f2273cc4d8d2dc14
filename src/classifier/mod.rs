//! Cat-vs-Dog binary classifier.
//!
//! Ties together preprocessing, the forward pass, and the threshold decision
//! rule. The model is loaded once at construction and is immutable afterward;
//! the decision is a pure function of the model's scalar output.

use crate::core::{ClassifierConfig, ClassifierError};
use crate::inference::{ForwardModel, OrtClassifier};
use crate::processors::Preprocessor;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Predicted class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    /// The negative class.
    Cat,
    /// The positive class.
    Dog,
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Cat => write!(f, "Cat"),
            Label::Dog => write!(f, "Dog"),
        }
    }
}

/// A classification result returned to the caller.
///
/// `confidence` is a percentage in `[0, 100]` rounded to two decimal places,
/// expressing how far the raw scalar lies from the threshold toward the
/// predicted class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The predicted label.
    pub class: Label,
    /// Confidence percentage for the predicted label.
    pub confidence: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Maps a raw probability scalar to a labeled prediction.
///
/// Strictly greater than the threshold means Dog with confidence `p * 100`;
/// anything at or below it (including exactly the threshold) means Cat with
/// confidence `(1 - p) * 100`. Both are rounded to two decimals.
pub fn decide(probability: f32, threshold: f32) -> Prediction {
    let p = f64::from(probability);
    if probability > threshold {
        Prediction {
            class: Label::Dog,
            confidence: round2(p * 100.0),
        }
    } else {
        Prediction {
            class: Label::Cat,
            confidence: round2((1.0 - p) * 100.0),
        }
    }
}

/// Binary image classifier over a shared, read-only model.
pub struct CatDogClassifier {
    preprocessor: Preprocessor,
    model: Arc<dyn ForwardModel>,
    threshold: f32,
}

impl std::fmt::Debug for CatDogClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatDogClassifier")
            .field("preprocessor", &self.preprocessor)
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl CatDogClassifier {
    /// Loads the model named by the configuration and builds the classifier.
    ///
    /// Loading is eager: a missing or corrupt artifact fails here, before any
    /// request is accepted.
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        config.validate()?;
        let (width, height) = config.input_shape;
        let preprocessor = Preprocessor::new(width, height)?;
        let model = OrtClassifier::new(&config.model_path)?;
        Ok(Self::from_parts(preprocessor, Arc::new(model), config.threshold))
    }

    /// Builds a classifier from already-constructed parts.
    ///
    /// This is the injection point for tests that substitute a mock model.
    pub fn from_parts(
        preprocessor: Preprocessor,
        model: Arc<dyn ForwardModel>,
        threshold: f32,
    ) -> Self {
        Self {
            preprocessor,
            model,
            threshold,
        }
    }

    /// Returns the configured decision threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Classifies raw encoded image bytes.
    ///
    /// Decode failures surface as [`ClassifierError::ImageDecode`]; there is
    /// no retry and no partial result.
    pub fn predict(&self, image_bytes: &[u8]) -> Result<Prediction, ClassifierError> {
        let tensor = self.preprocessor.process(image_bytes)?;
        let probability = self.model.forward(tensor.view())?;
        Ok(decide(probability, self.threshold))
    }
}

/// Builder for [`CatDogClassifier`].
pub struct CatDogClassifierBuilder {
    model_path: Option<PathBuf>,
    input_shape: Option<(u32, u32)>,
    threshold: Option<f32>,
}

impl CatDogClassifierBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            model_path: None,
            input_shape: None,
            threshold: None,
        }
    }

    /// Sets the path to the ONNX model artifact.
    pub fn model_path(mut self, model_path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(model_path.into());
        self
    }

    /// Sets the input shape as (width, height).
    pub fn input_shape(mut self, input_shape: (u32, u32)) -> Self {
        self.input_shape = Some(input_shape);
        self
    }

    /// Sets the decision threshold.
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Validates the configuration and loads the classifier.
    pub fn build(self) -> Result<CatDogClassifier, ClassifierError> {
        let model_path = self
            .model_path
            .ok_or_else(|| ClassifierError::config_error("model_path is required"))?;

        let mut config = ClassifierConfig::new(model_path);
        if let Some(input_shape) = self.input_shape {
            config = config.with_input_shape(input_shape);
        }
        if let Some(threshold) = self.threshold {
            config = config.with_threshold(threshold);
        }

        CatDogClassifier::new(&config)
    }
}

impl Default for CatDogClassifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DEFAULT_THRESHOLD;
    use ndarray::ArrayView4;

    struct FixedScore(f32);

    impl ForwardModel for FixedScore {
        fn forward(&self, _input: ArrayView4<'_, f32>) -> Result<f32, ClassifierError> {
            Ok(self.0)
        }
    }

    #[test]
    fn above_threshold_is_dog() {
        for p in [0.5001, 0.73, 0.9, 1.0] {
            let prediction = decide(p, DEFAULT_THRESHOLD);
            assert_eq!(prediction.class, Label::Dog, "p = {p}");
            assert_eq!(prediction.confidence, round2(f64::from(p) * 100.0));
        }
    }

    #[test]
    fn at_or_below_threshold_is_cat() {
        for p in [0.0, 0.2, 0.4999, 0.5] {
            let prediction = decide(p, DEFAULT_THRESHOLD);
            assert_eq!(prediction.class, Label::Cat, "p = {p}");
            assert_eq!(
                prediction.confidence,
                round2((1.0 - f64::from(p)) * 100.0)
            );
        }
    }

    #[test]
    fn exact_threshold_is_cat() {
        let prediction = decide(0.5, 0.5);
        assert_eq!(prediction.class, Label::Cat);
        assert_eq!(prediction.confidence, 50.0);
    }

    #[test]
    fn known_scores_round_to_expected_percentages() {
        let dog = decide(0.73, 0.5);
        assert_eq!(dog.class, Label::Dog);
        assert_eq!(dog.confidence, 73.0);

        let cat = decide(0.2, 0.5);
        assert_eq!(cat.class, Label::Cat);
        assert_eq!(cat.confidence, 80.0);
    }

    #[test]
    fn prediction_serializes_to_wire_format() {
        let prediction = decide(0.73, 0.5);
        let json = serde_json::to_value(prediction).unwrap();
        assert_eq!(json, serde_json::json!({"class": "Dog", "confidence": 73.0}));
    }

    #[test]
    fn predict_runs_the_full_pipeline() {
        let classifier = CatDogClassifier::from_parts(
            Preprocessor::default(),
            Arc::new(FixedScore(0.73)),
            DEFAULT_THRESHOLD,
        );

        let img = image::RgbImage::from_pixel(32, 32, image::Rgb([10, 20, 30]));
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();

        let prediction = classifier.predict(&bytes).unwrap();
        assert_eq!(prediction.class, Label::Dog);
        assert_eq!(prediction.confidence, 73.0);
    }

    #[test]
    fn predict_surfaces_decode_errors() {
        let classifier = CatDogClassifier::from_parts(
            Preprocessor::default(),
            Arc::new(FixedScore(0.73)),
            DEFAULT_THRESHOLD,
        );
        let result = classifier.predict(b"not an image");
        assert!(matches!(result, Err(ClassifierError::ImageDecode(_))));
    }

    #[test]
    fn builder_requires_a_model_path() {
        let result = CatDogClassifierBuilder::new().build();
        assert!(matches!(result, Err(ClassifierError::ConfigError { .. })));
    }
}
