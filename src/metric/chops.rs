//! RMS distance over the difference image histogram

use image::{DynamicImage, GenericImageView as _};

use crate::metric::{MetricError, channel_samples, check_dimensions, check_mode};

/// Root-mean-square of the absolute difference image, approximated from its
/// intensity histogram: per-channel 256 bin histograms are concatenated and
/// each bin weighted by the square of its intensity (bin index mod 256).
/// 0 means identical, and the divisor is the pixel count whatever the
/// channel count
pub(crate) fn distance(first: &DynamicImage, second: &DynamicImage) -> Result<f64, MetricError> {
    check_mode(first, second)?;
    check_dimensions(first, second)?;
    let channel_count = first.color().channel_count();
    let mut histogram = vec![0u64; 256 * usize::from(channel_count)];
    for ((_, _, first_px), (_, _, second_px)) in first.pixels().zip(second.pixels()) {
        let (first_samples, count) = channel_samples(first_px, channel_count);
        let (second_samples, _) = channel_samples(second_px, channel_count);
        for (channel, (a, b)) in first_samples.iter().zip(second_samples).take(count).enumerate() {
            let diff = usize::from(a.abs_diff(b));
            histogram[channel * 256 + diff] += 1;
        }
    }
    let weighted: u64 = histogram
        .iter()
        .enumerate()
        .map(|(bin, &hits)| hits * ((bin % 256) as u64).pow(2))
        .sum();
    let (width, height) = first.dimensions();
    #[expect(clippy::cast_precision_loss)]
    Ok((weighted as f64 / (f64::from(width) * f64::from(height))).sqrt())
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, RgbImage};

    use super::*;

    fn gray(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, image::Luma([value])))
    }

    #[test]
    fn identical_images() {
        let img = gray(2, 2, 10);
        assert_eq!(distance(&img, &img).unwrap(), 0.0);
    }

    #[test]
    fn constant_offset() {
        // every pixel differs by 10, rms is exactly 10
        let first = gray(2, 2, 40);
        let second = gray(2, 2, 50);
        assert!((distance(&first, &second).unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn rgb_constant_offset() {
        // 3 channels differing by 10 each: sqrt(12 * 100 / 4)
        let first = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, image::Rgb([40, 40, 40])));
        let second = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, image::Rgb([50, 50, 50])));
        let score = distance(&first, &second).unwrap();
        assert!((score - 300.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn mode_mismatch() {
        let first = gray(2, 2, 0);
        let second = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, image::Rgb([0, 0, 0])));
        let err = distance(&first, &second).unwrap_err();
        assert!(matches!(err, MetricError::ModeMismatch { .. }));
    }

    #[test]
    fn dimension_mismatch() {
        let first = gray(2, 2, 0);
        let second = gray(2, 3, 0);
        let err = distance(&first, &second).unwrap_err();
        assert!(matches!(err, MetricError::DimensionMismatch { .. }));
    }
}
