//! Image processing utilities.

pub mod preprocess;

pub use preprocess::Preprocessor;
