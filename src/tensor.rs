//! Conversion between grayscale rasters and model tensors

use image::GrayImage;
use ndarray::Array4;

use crate::error::{ClassifyError, Result};

/// Number of digit classes in the model output
pub const NUM_CLASSES: usize = 10;

/// Encode a single-channel image as a (1, H, W, 1) input tensor
///
/// Values are raw [0,1] pixel intensities; the model expects no mean/std
/// normalization.
#[must_use]
pub fn encode(image: &GrayImage) -> Array4<f32> {
    let (width, height) = image.dimensions();
    let mut tensor = Array4::zeros((1, height as usize, width as usize, 1));
    for (x, y, pixel) in image.enumerate_pixels() {
        tensor[[0, y as usize, x as usize, 0]] = f32::from(pixel[0]) / 255.0;
    }
    tensor
}

/// Decode a raw output tensor into the ordered 10-class score sequence
///
/// Accepts any output shape holding exactly 10 values (`[10]`, `[1, 10]`, ...);
/// anything else is an [`ClassifyError::InvalidOutput`].
pub fn decode(shape: &[i64], data: &[f32]) -> Result<Vec<f32>> {
    let elements: i64 = shape.iter().product();
    if elements as usize != NUM_CLASSES || data.len() != NUM_CLASSES {
        return Err(ClassifyError::InvalidOutput {
            expected: format!("{NUM_CLASSES} class scores"),
            got: format!("{shape:?}"),
        });
    }
    Ok(data.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_encode_shape_and_range() {
        let img = GrayImage::from_fn(28, 28, |x, y| Luma([((x + y) * 4) as u8]));
        let tensor = encode(&img);
        assert_eq!(tensor.shape(), &[1, 28, 28, 1]);
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_encode_values() {
        let mut img = GrayImage::new(28, 28);
        img.put_pixel(3, 7, Luma([255]));
        img.put_pixel(10, 0, Luma([51]));

        let tensor = encode(&img);
        // NHWC layout: index is [batch, row, col, channel]
        assert_eq!(tensor[[0, 7, 3, 0]], 1.0);
        assert!((tensor[[0, 0, 10, 0]] - 0.2).abs() < 1e-6);
        assert_eq!(tensor[[0, 0, 0, 0]], 0.0);
    }

    #[test]
    fn test_decode_flat_and_batched_shapes() {
        let data: Vec<f32> = (0..10).map(|i| i as f32).collect();

        let scores = decode(&[10], &data).unwrap();
        assert_eq!(scores.len(), 10);
        assert_eq!(scores[9], 9.0);

        let scores = decode(&[1, 10], &data).unwrap();
        assert_eq!(scores, data);
    }

    #[test]
    fn test_decode_rejects_wrong_size() {
        let data = vec![0.0f32; 4];
        let result = decode(&[1, 4], &data);
        assert!(matches!(result, Err(ClassifyError::InvalidOutput { .. })));
    }
}
