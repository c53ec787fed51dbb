//! One-dimensional convolution kernels.
//!
//! A kernel is an odd-length weight sequence indexed symmetrically from
//! `-radius` to `+radius`; the center tap sits at index `radius`.

use crate::util::{CornerKitError, CornerKitResult};
use std::iter::Sum;

/// Immutable 1D kernel with an odd number of taps.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel1D<W> {
    weights: Vec<W>,
}

/// Floating-point kernel used with `f32` images.
pub type Kernel1dF32 = Kernel1D<f32>;

/// Integer kernel used with `u8` and `i16` images.
pub type Kernel1dI32 = Kernel1D<i32>;

impl<W: Copy> Kernel1D<W> {
    /// Wraps a weight sequence, rejecting empty and even-length inputs.
    pub fn new(weights: Vec<W>) -> CornerKitResult<Self> {
        if weights.is_empty() {
            return Err(CornerKitError::InvalidKernel("kernel must not be empty"));
        }
        if weights.len() % 2 == 0 {
            return Err(CornerKitError::InvalidKernel("kernel length must be odd"));
        }
        Ok(Self { weights })
    }

    /// Builds a box kernel of `2 * radius + 1` equal weights.
    pub fn table(radius: usize, weight: W) -> Self {
        Self {
            weights: vec![weight; 2 * radius + 1],
        }
    }

    /// Number of taps on either side of the center.
    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    /// Total number of taps (`2 * radius + 1`).
    pub fn width(&self) -> usize {
        self.weights.len()
    }

    /// Returns the weights, index 0 being offset `-radius`.
    pub fn weights(&self) -> &[W] {
        &self.weights
    }
}

impl<W: Copy + Sum<W>> Kernel1D<W> {
    /// Sum of all weights.
    pub fn sum(&self) -> W {
        self.weights.iter().copied().sum()
    }
}

impl Kernel1D<f32> {
    /// Sampled Gaussian normalized to unit sum.
    pub fn gaussian(radius: usize, sigma: f32) -> CornerKitResult<Self> {
        let raw = gaussian_samples(radius, sigma)?;
        let total: f32 = raw.iter().sum();
        Ok(Self {
            weights: raw.into_iter().map(|w| w / total).collect(),
        })
    }
}

impl Kernel1D<i32> {
    /// Integer Gaussian whose center tap equals `center` (rounded elsewhere).
    ///
    /// Taps that round to zero are kept, so the radius is always honored.
    pub fn gaussian_int(radius: usize, sigma: f32, center: i32) -> CornerKitResult<Self> {
        if center <= 0 {
            return Err(CornerKitError::InvalidInput("center weight must be positive"));
        }
        let raw = gaussian_samples(radius, sigma)?;
        Ok(Self {
            weights: raw
                .into_iter()
                .map(|w| (w * center as f32).round() as i32)
                .collect(),
        })
    }
}

/// Unnormalized Gaussian samples with a peak of 1.0 at the center.
fn gaussian_samples(radius: usize, sigma: f32) -> CornerKitResult<Vec<f32>> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(CornerKitError::InvalidInput("sigma must be positive and finite"));
    }
    let two_sigma_sq = 2.0 * sigma * sigma;
    Ok((0..2 * radius + 1)
        .map(|i| {
            let x = i as f32 - radius as f32;
            (-x * x / two_sigma_sq).exp()
        })
        .collect())
}
