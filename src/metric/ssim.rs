//! Structural similarity, delegated to the image-compare crate

use image::DynamicImage;
use image_compare::Algorithm;

use crate::metric::{MetricError, check_dimensions};

/// Mean SSIM score of the two luma images, in [-1, 1].
/// Unlike the other metrics this is a similarity: 1 means identical, and
/// callers ranking candidates must invert the ordering
pub(crate) fn similarity(
    first: &DynamicImage,
    second: &DynamicImage,
) -> Result<f64, MetricError> {
    check_dimensions(first, second)?;
    let result = image_compare::gray_similarity_structure(
        &Algorithm::MSSIMSimple,
        &first.to_luma8(),
        &second.to_luma8(),
    )?;
    Ok(result.score)
}

#[cfg(test)]
mod tests {
    use image::GrayImage;

    use super::*;

    fn checkerboard(width: u32, height: u32, period: u32) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_fn(width, height, |x, y| {
            image::Luma([if (x / period + y / period) % 2 == 0 { 230 } else { 25 }])
        }))
    }

    #[test]
    fn identical_images_score_one() {
        let img = checkerboard(32, 32, 4);
        let score = similarity(&img, &img).unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn different_images_score_below_one() {
        let first = checkerboard(32, 32, 4);
        let second = checkerboard(32, 32, 8);
        assert!(similarity(&first, &second).unwrap() < 1.0);
    }

    #[test]
    fn dimension_mismatch() {
        let first = checkerboard(32, 32, 4);
        let second = checkerboard(32, 16, 4);
        let err = similarity(&first, &second).unwrap_err();
        assert!(matches!(err, MetricError::DimensionMismatch { .. }));
    }
}
