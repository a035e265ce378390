//! Ink bounding-box search over a grayscale canvas

use image::GrayImage;
use tracing::debug;

/// Axis-aligned rectangle enclosing all ink pixels, in source coordinates
///
/// Bounds are inclusive: `x_min <= x_max < width` and `y_min <= y_max < height`.
/// "No ink found" is represented by `Option::None` at the search site, never
/// by a zero-sized box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: u32,
    pub x_max: u32,
    pub y_min: u32,
    pub y_max: u32,
}

impl BoundingBox {
    /// Width of the box in pixels (inclusive bounds)
    #[must_use]
    #[inline]
    pub fn width(&self) -> u32 {
        self.x_max - self.x_min + 1
    }

    /// Height of the box in pixels (inclusive bounds)
    #[must_use]
    #[inline]
    pub fn height(&self) -> u32 {
        self.y_max - self.y_min + 1
    }
}

/// Find the bounding box of all ink pixels in the canvas
///
/// A pixel is ink when its intensity exceeds `ink_threshold` (0.0-1.0 scale;
/// strokes are bright on a dark background). Returns `None` when no pixel
/// exceeds the threshold. O(width x height) full scan, run once per
/// classification.
#[must_use]
pub fn find_bounding_box(image: &GrayImage, ink_threshold: f32) -> Option<BoundingBox> {
    let mut x_min = image.width();
    let mut x_max = 0u32;
    let mut y_min = image.height();
    let mut y_max = 0u32;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if f32::from(pixel[0]) / 255.0 > ink_threshold {
            found = true;
            if x < x_min {
                x_min = x;
            }
            if x > x_max {
                x_max = x;
            }
            if y < y_min {
                y_min = y;
            }
            if y > y_max {
                y_max = y;
            }
        }
    }

    if !found {
        debug!("No ink pixels above threshold {}", ink_threshold);
        return None;
    }

    let bbox = BoundingBox {
        x_min,
        x_max,
        y_min,
        y_max,
    };
    debug!(
        "Ink bounding box: x=[{}, {}], y=[{}, {}] ({}x{})",
        bbox.x_min,
        bbox.x_max,
        bbox.y_min,
        bbox.y_max,
        bbox.width(),
        bbox.height()
    );
    Some(bbox)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_empty_canvas_has_no_box() {
        let img = GrayImage::new(50, 50);
        assert!(find_bounding_box(&img, 0.5).is_none());
    }

    #[test]
    fn test_single_pixel_box() {
        let mut img = GrayImage::new(50, 50);
        img.put_pixel(10, 20, Luma([255]));

        let bbox = find_bounding_box(&img, 0.5).unwrap();
        assert_eq!(bbox.x_min, 10);
        assert_eq!(bbox.x_max, 10);
        assert_eq!(bbox.y_min, 20);
        assert_eq!(bbox.y_max, 20);
        assert_eq!(bbox.width(), 1);
        assert_eq!(bbox.height(), 1);
    }

    #[test]
    fn test_white_square_box() {
        let mut img = GrayImage::new(100, 100);
        for y in 40..60 {
            for x in 40..60 {
                img.put_pixel(x, y, Luma([255]));
            }
        }

        let bbox = find_bounding_box(&img, 0.5).unwrap();
        assert_eq!((bbox.x_min, bbox.x_max), (40, 59));
        assert_eq!((bbox.y_min, bbox.y_max), (40, 59));
        assert_eq!(bbox.width(), 20);
        assert_eq!(bbox.height(), 20);
    }

    #[test]
    fn test_threshold_excludes_dim_pixels() {
        let mut img = GrayImage::new(20, 20);
        // 0.5 threshold = intensity must exceed 127.5
        img.put_pixel(5, 5, Luma([127]));
        assert!(find_bounding_box(&img, 0.5).is_none());

        img.put_pixel(5, 5, Luma([128]));
        assert!(find_bounding_box(&img, 0.5).is_some());
    }

    #[test]
    fn test_scattered_ink_spans_box() {
        let mut img = GrayImage::new(300, 300);
        img.put_pixel(12, 250, Luma([200]));
        img.put_pixel(280, 30, Luma([200]));

        let bbox = find_bounding_box(&img, 0.5).unwrap();
        assert_eq!((bbox.x_min, bbox.x_max), (12, 280));
        assert_eq!((bbox.y_min, bbox.y_max), (30, 250));
    }
}
