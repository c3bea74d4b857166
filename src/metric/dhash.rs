//! Perceptual hash (dhash) distance

use std::fmt;

use image::{DynamicImage, imageops::FilterType};

use crate::metric::MetricError;

/// Hash grid side, in difference bits
const HASH_SIZE: u32 = 8;

/// Difference hash of a downscaled image, robust to minor resizing and
/// compression differences
pub(crate) struct PerceptualHash {
    /// Packed difference bits, bit `index % 8` of byte `index / 8` set when
    /// the left pixel is brighter than its right neighbor
    bits: Vec<u8>,
}

impl fmt::Display for PerceptualHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.bits {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl PerceptualHash {
    /// Compute hash from an image
    pub(crate) fn new(img: &DynamicImage) -> Self {
        Self::with_hash_size(img, HASH_SIZE)
    }

    /// Compute hash with an explicit grid side.
    /// Grayscale and shrink the image, then compare each pixel with its
    /// right neighbor and pack the comparison bits into bytes
    fn with_hash_size(img: &DynamicImage, hash_size: u32) -> Self {
        let small = img
            .grayscale()
            .resize_exact(hash_size + 1, hash_size, FilterType::Lanczos3)
            .into_luma8();
        let mut bits = Vec::with_capacity((hash_size * hash_size / 8) as usize);
        let mut byte = 0u8;
        let mut index = 0u32;
        for row in 0..hash_size {
            for col in 0..hash_size {
                let left = small.get_pixel(col, row).0[0];
                let right = small.get_pixel(col + 1, row).0[0];
                if left > right {
                    byte |= 1 << (index % 8);
                }
                if index % 8 == 7 {
                    bits.push(byte);
                    byte = 0;
                }
                index += 1;
            }
        }
        Self { bits }
    }

    /// Count of differing bits between the two hashes.
    /// Fails with [`MetricError::HashLengthMismatch`] if the hashes were not
    /// derived with the same grid side
    pub(crate) fn hamming_distance(&self, other: &Self) -> Result<u32, MetricError> {
        if self.bits.len() != other.bits.len() {
            return Err(MetricError::HashLengthMismatch {
                first: self.bits.len(),
                second: other.bits.len(),
            });
        }
        Ok(self
            .bits
            .iter()
            .zip(&other.bits)
            .map(|(a, b)| (a ^ b).count_ones())
            .sum())
    }
}

/// Hamming distance between the perceptual hashes of the two images,
/// in [0, 64] for the default grid side
pub(crate) fn distance(first: &DynamicImage, second: &DynamicImage) -> Result<u32, MetricError> {
    let first_hash = PerceptualHash::new(first);
    let second_hash = PerceptualHash::new(second);
    log::debug!("Perceptual hashes: {first_hash} vs {second_hash}");
    first_hash.hamming_distance(&second_hash)
}
