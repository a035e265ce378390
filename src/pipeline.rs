//! Classification pipeline: raster canvas in, digit prediction out

use std::path::Path;

use image::GrayImage;
use tracing::{debug, info};

use crate::bbox;
use crate::config::ClassifyConfig;
use crate::crop;
use crate::engine::InferenceEngine;
use crate::error::Result;
use crate::resample;
use crate::scores::{self, Prediction};
use crate::tensor;

/// Result of one classification call
///
/// Constructed fresh per call; the pipeline retains no ownership after
/// return. The intermediate images are kept for diagnostic display.
#[derive(Debug)]
pub struct ClassificationResult {
    /// Predicted digit, confidence, and full distribution
    pub prediction: Prediction,
    /// The normalized model input (input_size x input_size)
    pub preview: Option<GrayImage>,
    /// The padded, centered square canvas before the final resize
    pub padded: Option<GrayImage>,
    /// The raw ink bounding-box crop (when retained by config)
    pub cropped: Option<GrayImage>,
}

impl ClassificationResult {
    fn no_content() -> Self {
        Self {
            prediction: Prediction::no_content(),
            preview: None,
            padded: None,
            cropped: None,
        }
    }
}

/// CPU-side normalization output, ready for tensor encoding
#[derive(Debug)]
pub struct Preprocessed {
    /// Model input image (input_size x input_size)
    pub preview: GrayImage,
    /// Padded, centered square canvas
    pub padded: GrayImage,
    /// Raw ink crop (when retained)
    pub cropped: Option<GrayImage>,
}

/// Normalize a canvas for classification: locate the ink, crop with padding,
/// center on a square black background, and resize to the model input size
///
/// Returns `Ok(None)` when the canvas holds no ink above the threshold.
/// The optional working-resolution resample happens before the bounding-box
/// search, so all crop coordinates are in the resampled space.
pub fn preprocess(image: &GrayImage, config: &ClassifyConfig) -> Result<Option<Preprocessed>> {
    let resampled;
    let source = match config.working_resolution {
        Some(resolution) => {
            resampled = resample::resize_bilinear(image, resolution, resolution);
            &resampled
        }
        None => image,
    };

    let Some(bounds) = bbox::find_bounding_box(source, config.ink_threshold) else {
        return Ok(None);
    };

    let padded_crop = crop::crop_with_padding(source, bounds, config)?;
    let preview =
        resample::resize_bilinear(&padded_crop.padded, config.input_size, config.input_size);

    Ok(Some(Preprocessed {
        preview,
        padded: padded_crop.padded,
        cropped: padded_crop.cropped,
    }))
}

/// Handwritten digit classifier
///
/// Owns a single long-lived inference session. `classify` calls are
/// serialized through `&mut self`; per-call tensors live only for the
/// duration of the call on every exit path.
pub struct DigitClassifier {
    engine: InferenceEngine,
    config: ClassifyConfig,
}

impl DigitClassifier {
    /// Create a classifier from an ONNX model file
    ///
    /// # Errors
    /// Returns an error if the model asset fails to load; no `classify` call
    /// is accepted before a successful load.
    pub fn new<P: AsRef<Path>>(model_path: P, config: ClassifyConfig) -> Result<Self> {
        let engine = InferenceEngine::load_from_file(model_path)?;
        Ok(Self { engine, config })
    }

    /// Create a classifier from in-memory ONNX model bytes
    ///
    /// # Errors
    /// Returns an error if the model bytes fail to load.
    pub fn from_model_bytes(model_bytes: &[u8], config: ClassifyConfig) -> Result<Self> {
        let engine = InferenceEngine::load_from_memory(model_bytes)?;
        Ok(Self { engine, config })
    }

    /// Classify the digit drawn on the canvas
    ///
    /// An empty canvas is a valid terminal outcome, not a failure: the result
    /// carries digit -1, confidence 0, and an empty distribution, and no
    /// inference is attempted.
    ///
    /// # Errors
    /// Returns an error on backend failure during the forward pass; the
    /// session remains valid for retry on the next call.
    pub fn classify(&mut self, image: &GrayImage) -> Result<ClassificationResult> {
        debug!(
            "Classifying {}x{} canvas",
            image.width(),
            image.height()
        );

        let Some(preprocessed) = preprocess(image, &self.config)? else {
            info!("No content found on canvas");
            return Ok(ClassificationResult::no_content());
        };

        // Per-call input tensor: dropped at scope exit on success and error
        // paths alike
        let input = tensor::encode(&preprocessed.preview);
        let raw_scores = self.engine.infer(&input)?;
        let prediction = scores::resolve(&raw_scores);

        info!(
            "Predicted digit {} with probability {:.4}",
            prediction.digit, prediction.confidence
        );

        Ok(ClassificationResult {
            prediction,
            preview: Some(preprocessed.preview),
            padded: Some(preprocessed.padded),
            cropped: preprocessed.cropped,
        })
    }

    /// Release the engine and its compute resources
    ///
    /// Idempotent; after disposal, `classify` fails with
    /// [`crate::ClassifyError::BackendUnavailable`].
    pub fn dispose(&mut self) {
        self.engine.dispose();
    }

    /// Whether the classifier has been disposed
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.engine.is_disposed()
    }

    /// The active pipeline configuration
    #[must_use]
    pub fn config(&self) -> &ClassifyConfig {
        &self.config
    }
}
