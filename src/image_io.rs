//! Saving rendered frames as ordinary image files.

use std::path::Path;

use image::{GrayImage, Luma};
use ndarray::Array2;

use crate::error::Result;

/// Stretch a floating-point image to the full 8-bit range.
///
/// The minimum maps to 0 and the maximum to 255; a constant image maps
/// to black.
pub fn stretch_to_u8(image: &Array2<f64>) -> Array2<u8> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &value in image.iter() {
        min = min.min(value);
        max = max.max(value);
    }

    let range = max - min;
    if range <= 0.0 || !range.is_finite() {
        return Array2::zeros(image.dim());
    }
    image.mapv(|value| (((value - min) / range) * 255.0).round() as u8)
}

/// Save an 8-bit grayscale image.
pub fn save_u8_image(image: &Array2<u8>, path: impl AsRef<Path>) -> Result<()> {
    let (height, width) = image.dim();
    let mut buffer = GrayImage::new(width as u32, height as u32);
    for (x, y, pixel) in buffer.enumerate_pixels_mut() {
        *pixel = Luma([image[[y as usize, x as usize]]]);
    }
    buffer.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn stretch_spans_full_range() {
        let image = array![[0.0, 50.0], [75.0, 100.0]];
        let stretched = stretch_to_u8(&image);

        assert_eq!(stretched[[0, 0]], 0);
        assert_eq!(stretched[[0, 1]], 128);
        assert_eq!(stretched[[1, 0]], 191);
        assert_eq!(stretched[[1, 1]], 255);
    }

    #[test]
    fn stretch_is_offset_invariant() {
        let image = array![[500.0, 550.0], [575.0, 600.0]];
        let stretched = stretch_to_u8(&image);

        assert_eq!(stretched[[0, 0]], 0);
        assert_eq!(stretched[[1, 1]], 255);
    }

    #[test]
    fn constant_image_maps_to_black() {
        let image = Array2::from_elem((3, 3), 500.0);
        let stretched = stretch_to_u8(&image);
        assert!(stretched.iter().all(|&value| value == 0));
    }

    #[test]
    fn save_round_trips_through_png() {
        use tempfile::tempdir;

        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("frame.png");
        let image = array![[0u8, 128u8], [64u8, 255u8]];

        save_u8_image(&image, &path).expect("save png");
        let loaded = image::open(&path).expect("reopen png").into_luma8();
        assert_eq!(loaded.dimensions(), (2, 2));
        assert_eq!(loaded.get_pixel(0, 0).0, [0]);
        assert_eq!(loaded.get_pixel(1, 0).0, [128]);
        assert_eq!(loaded.get_pixel(0, 1).0, [64]);
        assert_eq!(loaded.get_pixel(1, 1).0, [255]);
    }
}
