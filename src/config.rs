//! Configuration for the digit classification pipeline

use serde::{Deserialize, Serialize};

/// Configuration for digit classification
///
/// The padding divisor and the fixed-resolution pre-resample are tuning
/// knobs, exposed as parameters instead of hardcoding one variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyConfig {
    /// Minimum intensity (0.0-1.0) for a pixel to count as ink
    pub ink_threshold: f32,
    /// Padding divisor K: padding = max(box width, box height) / K
    /// (typical values 3-6; larger K means a tighter crop)
    pub padding_divisor: u32,
    /// Resample the canvas to this square resolution before the bounding-box
    /// search (None = search the canvas at its native resolution)
    pub working_resolution: Option<u32>,
    /// Model input resolution (MNIST-style classifiers use 28x28)
    pub input_size: u32,
    /// Whether to retain the unpadded ink crop in the result for preview
    pub keep_crop: bool,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            ink_threshold: 0.5,
            padding_divisor: 5,
            working_resolution: None,
            input_size: 28,
            keep_crop: true,
        }
    }
}

impl ClassifyConfig {
    /// Config that pre-resamples the canvas to a fixed 1000x1000 working
    /// resolution, stabilizing bounding-box granularity across canvas sizes
    #[must_use]
    pub fn stabilized() -> Self {
        Self {
            working_resolution: Some(1000),
            ..Self::default()
        }
    }

    /// Override the padding divisor
    #[must_use]
    pub fn with_padding_divisor(mut self, divisor: u32) -> Self {
        self.padding_divisor = divisor;
        self
    }

    /// Override the ink threshold
    #[must_use]
    pub fn with_ink_threshold(mut self, threshold: f32) -> Self {
        self.ink_threshold = threshold;
        self
    }
}
