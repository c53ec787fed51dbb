//! Border-only convolution with per-pixel kernel renormalization.
//!
//! For an output sample in the border band, taps whose source falls outside
//! the image are dropped and the result is divided by the sum of the remaining
//! weights: `sum(w_k * s_k) / sum(w_k)`. A flat region therefore convolves to
//! itself even where the kernel support is clipped.
//!
//! At distance `d` from the leading edge (left or top) the valid taps are
//! `k in [radius - d, 2 * radius]`; at distance `d` from the trailing edge
//! (right or bottom) they are `k in [0, radius + d]`.

use std::ops::{Add, Mul};

use crate::image::{ImageView, ImageViewMut};
use crate::kernel::Kernel1D;
use crate::trace::trace_span;
use crate::util::{CornerKitError, CornerKitResult};

/// Pixel types supported by the border convolver.
///
/// Integer pixels accumulate in `i64` and narrow with truncating division
/// followed by a wrapping cast, so results match a reference implementation
/// bit for bit rather than rounding to nearest.
pub trait BorderPixel: Copy {
    /// Kernel weight type paired with this pixel type.
    type Weight: Copy;
    /// Accumulator wide enough for `sum(weight * sample)`.
    type Acc: Copy + PartialEq + Add<Output = Self::Acc> + Mul<Output = Self::Acc>;

    /// Additive identity of the accumulator.
    const ZERO: Self::Acc;

    /// Widens a sample into the accumulator type.
    fn widen(self) -> Self::Acc;

    /// Widens a kernel weight into the accumulator type.
    fn widen_weight(weight: Self::Weight) -> Self::Acc;

    /// Divides the weighted total by the in-bounds weight sum.
    fn normalize(total: Self::Acc, weight: Self::Acc) -> Self;
}

impl BorderPixel for u8 {
    type Weight = i32;
    type Acc = i64;
    const ZERO: i64 = 0;

    #[inline]
    fn widen(self) -> i64 {
        i64::from(self)
    }

    #[inline]
    fn widen_weight(weight: i32) -> i64 {
        i64::from(weight)
    }

    #[inline]
    fn normalize(total: i64, weight: i64) -> u8 {
        (total / weight) as u8
    }
}

impl BorderPixel for i16 {
    type Weight = i32;
    type Acc = i64;
    const ZERO: i64 = 0;

    #[inline]
    fn widen(self) -> i64 {
        i64::from(self)
    }

    #[inline]
    fn widen_weight(weight: i32) -> i64 {
        i64::from(weight)
    }

    #[inline]
    fn normalize(total: i64, weight: i64) -> i16 {
        (total / weight) as i16
    }
}

impl BorderPixel for f32 {
    type Weight = f32;
    type Acc = f32;
    const ZERO: f32 = 0.0;

    #[inline]
    fn widen(self) -> f32 {
        self
    }

    #[inline]
    fn widen_weight(weight: f32) -> f32 {
        weight
    }

    #[inline]
    fn normalize(total: f32, weight: f32) -> f32 {
        total / weight
    }
}

/// Convolves `kernel` horizontally over the left and right border columns.
///
/// Writes the first and last `kernel.radius()` columns of every row of
/// `output`; all other output samples are left as they were.
///
/// # Errors
/// - `DimensionMismatch` if `input` and `output` differ in size.
/// - `ImageTooSmall` if the width does not exceed `2 * radius`.
/// - `InvalidKernel` if some truncated window has a zero weight sum.
pub fn horizontal<P: BorderPixel>(
    kernel: &Kernel1D<P::Weight>,
    input: ImageView<'_, P>,
    output: &mut ImageViewMut<'_, P>,
) -> CornerKitResult<()> {
    check_shapes(&input, output)?;
    let radius = kernel.radius();
    let width = input.width();
    let height = input.height();
    if width <= 2 * radius {
        return Err(CornerKitError::ImageTooSmall {
            width,
            height,
            radius,
        });
    }
    if radius == 0 {
        return Ok(());
    }
    let weights = kernel.weights();
    check_truncated_sums::<P>(weights)?;

    let _span = trace_span!("border_horizontal", width = width, height = height, radius = radius)
        .entered();

    let left = 0..radius;
    let right = width - radius..width;
    for y in 0..height {
        let src = input.row(y).ok_or(CornerKitError::InvalidInput("row outside input"))?;
        let dst = output
            .row_mut(y)
            .ok_or(CornerKitError::InvalidInput("row outside output"))?;

        for x in left.clone().chain(right.clone()) {
            let k0 = radius.saturating_sub(x);
            let k1 = (2 * radius).min(width - 1 + radius - x);
            let mut total = P::ZERO;
            let mut weight = P::ZERO;
            for k in k0..=k1 {
                let w = P::widen_weight(weights[k]);
                weight = weight + w;
                total = total + src[x + k - radius].widen() * w;
            }
            dst[x] = P::normalize(total, weight);
        }
    }
    Ok(())
}

/// Convolves `kernel` vertically over the top and bottom border rows.
///
/// Writes every sample of the first and last `kernel.radius()` rows of
/// `output`; all other output rows are left as they were.
///
/// # Errors
/// - `DimensionMismatch` if `input` and `output` differ in size.
/// - `ImageTooSmall` if the height does not exceed `2 * radius`.
/// - `InvalidKernel` if some truncated window has a zero weight sum.
pub fn vertical<P: BorderPixel>(
    kernel: &Kernel1D<P::Weight>,
    input: ImageView<'_, P>,
    output: &mut ImageViewMut<'_, P>,
) -> CornerKitResult<()> {
    check_shapes(&input, output)?;
    let radius = kernel.radius();
    let width = input.width();
    let height = input.height();
    if height <= 2 * radius {
        return Err(CornerKitError::ImageTooSmall {
            width,
            height,
            radius,
        });
    }
    if radius == 0 {
        return Ok(());
    }
    let weights = kernel.weights();
    check_truncated_sums::<P>(weights)?;

    let _span = trace_span!("border_vertical", width = width, height = height, radius = radius)
        .entered();

    let src = input.as_slice();
    let stride = input.stride();
    let origin = input.offset();

    for y in (0..radius).chain(height - radius..height) {
        let k0 = radius.saturating_sub(y);
        let k1 = (2 * radius).min(height - 1 + radius - y);
        let weight = weights[k0..=k1]
            .iter()
            .fold(P::ZERO, |acc, &w| acc + P::widen_weight(w));
        // Row index of tap k is `y + k - radius`; start at tap k0.
        let first_row = origin + (y + k0 - radius) * stride;

        let dst = output
            .row_mut(y)
            .ok_or(CornerKitError::InvalidInput("row outside output"))?;
        for (x, out) in dst.iter_mut().enumerate() {
            let mut total = P::ZERO;
            let mut idx = first_row + x;
            for &w in &weights[k0..=k1] {
                total = total + src[idx].widen() * P::widen_weight(w);
                idx += stride;
            }
            *out = P::normalize(total, weight);
        }
    }
    Ok(())
}

fn check_shapes<P>(input: &ImageView<'_, P>, output: &ImageViewMut<'_, P>) -> CornerKitResult<()> {
    if input.width() != output.width() || input.height() != output.height() {
        return Err(CornerKitError::DimensionMismatch {
            in_width: input.width(),
            in_height: input.height(),
            out_width: output.width(),
            out_height: output.height(),
        });
    }
    Ok(())
}

/// Rejects kernels where a clipped window would divide by zero.
fn check_truncated_sums<P: BorderPixel>(weights: &[P::Weight]) -> CornerKitResult<()> {
    let radius = weights.len() / 2;
    for d in 0..radius {
        let leading = weights[radius - d..]
            .iter()
            .fold(P::ZERO, |acc, &w| acc + P::widen_weight(w));
        let trailing = weights[..=radius + d]
            .iter()
            .fold(P::ZERO, |acc, &w| acc + P::widen_weight(w));
        if leading == P::ZERO || trailing == P::ZERO {
            return Err(CornerKitError::InvalidKernel(
                "truncated kernel weights sum to zero",
            ));
        }
    }
    Ok(())
}
