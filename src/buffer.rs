//! Grayscale pixel buffer

use image::{DynamicImage, GenericImageView as _, Rgba};

use crate::metric::MetricError;

/// Single channel floating point image buffer
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GrayBuffer {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Row major pixel values
    pixels: Vec<f64>,
}

impl GrayBuffer {
    /// Reduce an image to a single channel by averaging its color channels.
    /// Single channel input maps to itself
    pub(crate) fn from_image(img: &DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|(_, _, Rgba([r, g, b, _]))| {
                (f64::from(r) + f64::from(g) + f64::from(b)) / 3.0
            })
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Get buffer dimensions
    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get pixel values
    pub(crate) fn pixels(&self) -> &[f64] {
        &self.pixels
    }

    /// Linearly rescale values to [0, 255] using this buffer's own min/max,
    /// to compensate for exposure differences between shots.
    /// Fails with [`MetricError::DegenerateInput`] if the buffer has zero
    /// variance, for which rescaling is undefined
    pub(crate) fn normalized(&self) -> Result<Self, MetricError> {
        let min = self.pixels.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .pixels
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        if range == 0.0 {
            return Err(MetricError::DegenerateInput);
        }
        let pixels = self
            .pixels
            .iter()
            .map(|v| (v - min) * 255.0 / range)
            .collect();
        Ok(Self {
            width: self.width,
            height: self.height,
            pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, RgbImage};

    use super::*;

    #[test]
    fn grayscale_averages_channels() {
        let img =
            DynamicImage::ImageRgb8(RgbImage::from_fn(1, 1, |_, _| image::Rgb([10, 20, 60])));
        let gray = GrayBuffer::from_image(&img);
        assert_eq!(gray.dimensions(), (1, 1));
        assert_eq!(gray.pixels(), &[30.0]);
    }

    #[test]
    fn grayscale_identity_for_single_channel() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_fn(2, 2, |x, y| {
            image::Luma([(x + 2 * y) as u8 * 10])
        }));
        let gray = GrayBuffer::from_image(&img);
        assert_eq!(gray.pixels(), &[0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn normalized_range_and_endpoints() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_fn(2, 2, |x, y| {
            image::Luma([[40, 120, 80, 200][(x + 2 * y) as usize]])
        }));
        let norm = GrayBuffer::from_image(&img).normalized().unwrap();
        assert!(norm.pixels().iter().all(|v| (0.0..=255.0).contains(v)));
        // original min maps to 0, original max to 255
        assert_eq!(norm.pixels()[0], 0.0);
        assert_eq!(norm.pixels()[3], 255.0);
    }

    #[test]
    fn normalized_constant_buffer_is_degenerate() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 3, image::Luma([42])));
        let err = GrayBuffer::from_image(&img).normalized().unwrap_err();
        assert!(matches!(err, MetricError::DegenerateInput));
    }
}
