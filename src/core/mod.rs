//! Core error and configuration types shared across the crate.

pub mod config;
pub mod errors;

pub use config::{ClassifierConfig, ServerConfig, DEFAULT_INPUT_SHAPE, DEFAULT_THRESHOLD};
pub use errors::{ClassifierError, ClassifierResult, ProcessingStage};
