//! Image distance metrics

mod chops;
mod dhash;
mod norms;
mod rosetta;
mod ssim;

use std::{fmt, str::FromStr as _};

use image::{DynamicImage, GenericImageView as _, Rgba};

/// Distance metric name
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    strum::EnumString,
    strum::VariantArray,
    strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[expect(missing_docs)]
pub enum MetricName {
    Dhash,
    Ssim,
    Rosetta,
    Manhattan,
    ZeroNorm,
    Chops,
}

impl MetricName {
    /// Parse a metric identifier, failing with [`MetricError::UnknownMetric`]
    /// for anything outside the fixed set
    pub fn parse(s: &str) -> Result<Self, MetricError> {
        Self::from_str(s).map_err(|_| MetricError::UnknownMetric(s.to_owned()))
    }

    /// Return true if a higher score means more similar images.
    /// SSIM is the only metric of the set oriented this way, all the
    /// others are distances where 0 means identical
    #[must_use]
    pub fn higher_is_better(self) -> bool {
        matches!(self, MetricName::Ssim)
    }
}

/// Scalar produced by a metric, integral or real depending on the metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    /// Integral score (dhash Hamming distance, zero norm count)
    Integer(u64),
    /// Real valued score (manhattan, ssim, rosetta, chops)
    Real(f64),
}

impl Score {
    /// Get score value as float, for ranking
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Score::Integer(v) => v as f64,
            Score::Real(v) => v,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Integer(v) => write!(f, "{v}"),
            Score::Real(v) => write!(f, "{v}"),
        }
    }
}

/// Error a metric can return
#[derive(thiserror::Error, Debug)]
pub enum MetricError {
    /// Image dimensions differ where the metric requires them to be equal
    #[error(
        "Image dimensions differ: {first_width}x{first_height} vs {second_width}x{second_height}"
    )]
    DimensionMismatch {
        /// First image width
        first_width: u32,
        /// First image height
        first_height: u32,
        /// Second image width
        second_width: u32,
        /// Second image height
        second_height: u32,
    },
    /// Channel layouts differ where the metric requires them to be equal
    #[error("Image modes differ: {first:?} vs {second:?}")]
    ModeMismatch {
        /// First image color type
        first: image::ColorType,
        /// Second image color type
        second: image::ColorType,
    },
    /// Zero variance buffer for which min/max normalization is undefined
    #[error("Image has zero variance, normalization is undefined")]
    DegenerateInput,
    /// Metric identifier outside the known set
    #[error("Unknown metric {0:?}")]
    UnknownMetric(String),
    /// Perceptual hashes of different lengths cannot be compared
    #[error("Perceptual hash length mismatch: {first} vs {second} bytes")]
    HashLengthMismatch {
        /// First hash byte count
        first: usize,
        /// Second hash byte count
        second: usize,
    },
    /// Delegated SSIM computation failed
    #[error("SSIM computation failed: {0}")]
    Ssim(#[from] image_compare::CompareError),
}

/// Compute the distance between two images with the given metric
pub fn compare(
    metric: MetricName,
    first: &DynamicImage,
    second: &DynamicImage,
) -> Result<Score, MetricError> {
    match metric {
        MetricName::Dhash => dhash::distance(first, second).map(|d| Score::Integer(d.into())),
        MetricName::Ssim => ssim::similarity(first, second).map(Score::Real),
        MetricName::Rosetta => rosetta::distance(first, second).map(Score::Real),
        MetricName::Manhattan => norms::manhattan(first, second).map(Score::Real),
        MetricName::ZeroNorm => norms::zero_norm(first, second).map(Score::Integer),
        MetricName::Chops => chops::distance(first, second).map(Score::Real),
    }
}

/// Check that both images have the same pixel dimensions
fn check_dimensions(first: &DynamicImage, second: &DynamicImage) -> Result<(), MetricError> {
    let (first_width, first_height) = first.dimensions();
    let (second_width, second_height) = second.dimensions();
    if (first_width, first_height) != (second_width, second_height) {
        return Err(MetricError::DimensionMismatch {
            first_width,
            first_height,
            second_width,
            second_height,
        });
    }
    Ok(())
}

/// Check that both images have the same channel layout
fn check_mode(first: &DynamicImage, second: &DynamicImage) -> Result<(), MetricError> {
    if first.color() != second.color() {
        return Err(MetricError::ModeMismatch {
            first: first.color(),
            second: second.color(),
        });
    }
    Ok(())
}

/// Extract the samples actually stored by the source image from its RGBA
/// pixel view, as (values, count).
/// The view replicates gray into r/g/b, so single channel images map to
/// their gray value and two channel ones to gray + alpha
fn channel_samples(pixel: Rgba<u8>, channel_count: u8) -> ([u8; 4], usize) {
    let Rgba([r, g, b, a]) = pixel;
    match channel_count {
        1 => ([r, 0, 0, 0], 1),
        2 => ([r, a, 0, 0], 2),
        3 => ([r, g, b, 0], 3),
        _ => ([r, g, b, a], 4),
    }
}
