//! Manhattan and zero norm distances over normalized grayscale buffers

use image::DynamicImage;

use crate::{
    buffer::GrayBuffer,
    metric::{MetricError, check_dimensions},
};

/// Manhattan norm and zero norm of the difference between the two images,
/// computed from a single pass over the same difference buffer.
/// Buffers that are exactly equal short-circuit to zero before
/// normalization, so identical constant images compare as identical instead
/// of hitting the degenerate normalization case
fn norm_pair(first: &DynamicImage, second: &DynamicImage) -> Result<(f64, u64), MetricError> {
    check_dimensions(first, second)?;
    let first_gray = GrayBuffer::from_image(first);
    let second_gray = GrayBuffer::from_image(second);
    if first_gray == second_gray {
        return Ok((0.0, 0));
    }
    // normalize to compensate for exposure difference
    let first_norm = first_gray.normalized()?;
    let second_norm = second_gray.normalized()?;
    let norms = first_norm
        .pixels()
        .iter()
        .zip(second_norm.pixels())
        .map(|(a, b)| (a - b).abs())
        .fold((0.0, 0), |(manhattan, zero), diff| {
            (manhattan + diff, zero + u64::from(diff != 0.0))
        });
    Ok(norms)
}

/// Sum of elementwise absolute differences (L1 norm), in [0, 255 * W * H]
pub(crate) fn manhattan(
    first: &DynamicImage,
    second: &DynamicImage,
) -> Result<f64, MetricError> {
    let (manhattan, _zero) = norm_pair(first, second)?;
    Ok(manhattan)
}

/// Count of nonzero elementwise differences (L0 norm), in [0, W * H]
pub(crate) fn zero_norm(
    first: &DynamicImage,
    second: &DynamicImage,
) -> Result<u64, MetricError> {
    let (_manhattan, zero) = norm_pair(first, second)?;
    Ok(zero)
}
