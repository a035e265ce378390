//! Padded, centered square crop of the ink bounding box

use image::GrayImage;
use tracing::debug;

use crate::bbox::BoundingBox;
use crate::config::ClassifyConfig;
use crate::error::{ClassifyError, Result};

/// Output of the padded square crop
#[derive(Debug)]
pub struct PaddedCrop {
    /// Square black canvas with the padded crop centered inside it
    pub padded: GrayImage,
    /// Raw ink bounding-box pixels, no black border (when retained)
    pub cropped: Option<GrayImage>,
}

/// Crop the ink bounding box out of the canvas with padding, centered on a
/// square black background
///
/// The capture region is the box expanded by `max(width, height) /
/// padding_divisor` on all four sides and clamped to the canvas. The square
/// side length is the larger *unexpanded* box dimension plus twice the
/// padding, so the content keeps its centering headroom even when clamping
/// truncated the capture region at a canvas edge.
pub fn crop_with_padding(
    image: &GrayImage,
    bbox: BoundingBox,
    config: &ClassifyConfig,
) -> Result<PaddedCrop> {
    if config.padding_divisor == 0 {
        return Err(ClassifyError::Geometry(
            "padding divisor must be non-zero".to_string(),
        ));
    }

    let raw_width = bbox.width();
    let raw_height = bbox.height();
    let padding = i64::from(raw_width.max(raw_height) / config.padding_divisor);

    // Expand by the padding, clamping each bound to the canvas
    let x_min = (i64::from(bbox.x_min) - padding).clamp(0, i64::from(image.width()) - 1);
    let x_max = (i64::from(bbox.x_max) + padding).clamp(0, i64::from(image.width()) - 1);
    let y_min = (i64::from(bbox.y_min) - padding).clamp(0, i64::from(image.height()) - 1);
    let y_max = (i64::from(bbox.y_max) + padding).clamp(0, i64::from(image.height()) - 1);

    let width = x_max - x_min + 1;
    let height = y_max - y_min + 1;
    if width <= 0 || height <= 0 {
        // Unreachable from a valid bounding box; guard against upstream bugs
        return Err(ClassifyError::Geometry(format!(
            "non-positive crop dimensions {width}x{height} after clamping"
        )));
    }

    // Square side: pre-clamp padding over the unexpanded box
    let extended = i64::from(raw_width.max(raw_height)) + 2 * padding;
    let x_offset = (extended - width) / 2;
    let y_offset = (extended - height) / 2;

    debug!(
        "Crop geometry: box {}x{}, padding {}, captured {}x{}, canvas {}x{}",
        raw_width, raw_height, padding, width, height, extended, extended
    );

    // Copy the captured region onto a black square canvas at the offsets
    let mut padded = GrayImage::new(extended as u32, extended as u32);
    for y in 0..height {
        for x in 0..width {
            let pixel = *image.get_pixel((x_min + x) as u32, (y_min + y) as u32);
            padded.put_pixel((x_offset + x) as u32, (y_offset + y) as u32, pixel);
        }
    }

    let cropped = config.keep_crop.then(|| {
        GrayImage::from_fn(raw_width, raw_height, |x, y| {
            *image.get_pixel(bbox.x_min + x, bbox.y_min + y)
        })
    });

    Ok(PaddedCrop { padded, cropped })
}
