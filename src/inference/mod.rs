//! Model loading and forward-pass execution via ONNX Runtime.

pub mod engine;
pub mod session;

pub use engine::{ForwardModel, OrtClassifier};
pub use session::load_session;
