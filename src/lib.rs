//! # catdog-infer
//!
//! A minimal image-classification inference service. It loads a pre-trained
//! binary Cat-vs-Dog classifier (an ONNX artifact) once at startup and
//! exposes a single HTTP endpoint that accepts an uploaded image and returns
//! the predicted label with a confidence percentage.
//!
//! ## Pipeline
//!
//! Each request runs decode → resize to 256×256 → scale pixels into `[0, 1]`
//! → add a batch axis → forward pass → threshold at 0.5 → label + confidence.
//! The label is `"Dog"` when the model's scalar output is strictly above the
//! threshold and `"Cat"` otherwise; the confidence is the percentage mapped
//! toward the predicted class, rounded to two decimals.
//!
//! ## Modules
//!
//! * [`core`] - Error and configuration types
//! * [`processors`] - Image preprocessing
//! * [`inference`] - ONNX Runtime session handling and the forward pass
//! * [`classifier`] - The decision rule and the assembled classifier
//! * [`artifact`] - Offline model bundle materialization
//! * [`server`] - The axum HTTP surface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use catdog_infer::prelude::*;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClassifierConfig::new("models/cat-vs-dog.onnx");
//! let classifier = Arc::new(CatDogClassifier::new(&config)?);
//!
//! let app = catdog_infer::server::router(classifier, 32 * 1024 * 1024);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod classifier;
pub mod core;
pub mod inference;
pub mod processors;
pub mod server;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::classifier::{decide, CatDogClassifier, CatDogClassifierBuilder, Label, Prediction};
    pub use crate::core::{ClassifierConfig, ClassifierError, ClassifierResult, ServerConfig};
    pub use crate::processors::Preprocessor;
}
