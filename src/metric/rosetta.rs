//! Rosetta style percentage difference

use image::{DynamicImage, GenericImageView as _};

use crate::metric::{MetricError, channel_samples, check_dimensions, check_mode};

/// Percentage-like difference between two images of identical mode and size,
/// 0 means identical.
/// The component count used for normalization fixes the channel count at 3
/// whatever the actual layout, to keep scores comparable with the historical
/// scoring this reproduces
pub(crate) fn distance(first: &DynamicImage, second: &DynamicImage) -> Result<f64, MetricError> {
    check_mode(first, second)?;
    check_dimensions(first, second)?;
    let channel_count = first.color().channel_count();
    let total: u64 = first
        .pixels()
        .zip(second.pixels())
        .map(|((_, _, first_px), (_, _, second_px))| {
            let (first_samples, count) = channel_samples(first_px, channel_count);
            let (second_samples, _) = channel_samples(second_px, channel_count);
            first_samples
                .iter()
                .zip(second_samples)
                .take(count)
                .map(|(a, b)| u64::from(a.abs_diff(b)))
                .sum::<u64>()
        })
        .sum();
    let (width, height) = first.dimensions();
    let ncomponents = f64::from(width) * f64::from(height) * 3.0;
    #[expect(clippy::cast_precision_loss)]
    Ok((total as f64 / 255.0 * 100.0) / ncomponents)
}
