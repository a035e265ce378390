//! Error types for the digit classification pipeline

use thiserror::Error;

/// Errors that can occur during model loading or classification
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Model file not found: {0}")]
    ModelNotFound(String),

    #[error("Failed to load ONNX model from {path}: {error}")]
    ModelLoad { path: String, error: String },

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Inference backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Invalid model output: expected {expected}, got {got}")]
    InvalidOutput { expected: String, got: String },

    #[error("Crop geometry invariant violated: {0}")]
    Geometry(String),
}

/// Result type for classification operations
pub type Result<T> = std::result::Result<T, ClassifyError>;
