//! Handwritten digit classification via ONNX Runtime
//!
//! This crate classifies a single handwritten digit drawn on a canvas. It
//! isolates the drawn strokes, normalizes their framing, and feeds the
//! normalized image to a small convolutional classifier (MNIST-style ONNX
//! model), returning the predicted digit, its confidence, and the full
//! 10-class probability distribution.
//!
//! # Features
//! - Ink bounding-box search over arbitrary-resolution canvases
//! - Padded, centered square crop with a configurable padding divisor
//! - Bilinear resampling to the classifier input resolution (28x28)
//! - Single long-lived inference session with explicit, idempotent disposal
//! - Numerically stabilized softmax; accepts raw-logit and
//!   softmax-in-graph models alike
//! - Empty canvas reported as a sentinel result, never as an error
//!
//! # Example
//! ```no_run
//! use digit_classify::{ClassifyConfig, DigitClassifier};
//! use image::open;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ClassifyConfig::default();
//! let mut classifier = DigitClassifier::new("models/mnist.onnx", config)?;
//!
//! let canvas = open("canvas.png")?.to_luma8();
//! let result = classifier.classify(&canvas)?;
//!
//! println!(
//!     "digit {} ({:.1}%)",
//!     result.prediction.digit,
//!     result.prediction.confidence * 100.0
//! );
//!
//! classifier.dispose();
//! # Ok(())
//! # }
//! ```

pub mod bbox;
pub mod config;
pub mod crop;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod resample;
pub mod scores;
pub mod tensor;

pub use bbox::{find_bounding_box, BoundingBox};
pub use config::ClassifyConfig;
pub use crop::{crop_with_padding, PaddedCrop};
pub use engine::InferenceEngine;
pub use error::{ClassifyError, Result};
pub use pipeline::{preprocess, ClassificationResult, DigitClassifier, Preprocessed};
pub use scores::{resolve, softmax, Prediction};
pub use tensor::NUM_CLASSES;
