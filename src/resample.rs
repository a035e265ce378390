//! Bilinear resampling to fixed target resolutions

use image::imageops::{self, FilterType};
use image::GrayImage;

/// Resize an image to the target resolution with bilinear filtering
///
/// The stretch is aspect-neutral: no aspect ratio is preserved, so the caller
/// must square the content first (see [`crate::crop::crop_with_padding`])
/// before the final resize to the classifier input size.
#[must_use]
pub fn resize_bilinear(image: &GrayImage, target_width: u32, target_height: u32) -> GrayImage {
    if image.dimensions() == (target_width, target_height) {
        return image.clone();
    }
    imageops::resize(image, target_width, target_height, FilterType::Triangle)
}
