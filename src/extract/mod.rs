//! Corner candidate extraction from an intensity map.
//!
//! Every extractor scans only pixels whose full `(2r+1)x(2r+1)` neighbourhood
//! lies inside the image, resets the output list first, and appends accepted
//! pixels in increasing raster order.
//!
//! The NMS variants accept a pixel when it exceeds the threshold and is the
//! first maximum of its window in raster order: strictly greater than every
//! neighbour before it and at least as large as every neighbour after it.
//! Values are compared with `f32::total_cmp`; NaN never exceeds a threshold.

use std::ops::Range;

use crate::candidate::list::CornerList;
use crate::image::ImageView;
use crate::util::CornerKitResult;

mod fast;
mod naive;
mod threshold;

#[cfg(feature = "rayon")]
pub mod rayon;

pub use fast::NonMaxFast;
pub use naive::NonMaxNaive;
pub use threshold::ThresholdExtractor;

/// Window radius and intensity threshold shared by all extractors.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ExtractConfig {
    /// Neighbourhood radius; also the width of the excluded border band.
    pub radius: usize,
    /// Pixels must be strictly above this intensity.
    pub threshold: f32,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            radius: 2,
            threshold: 1.0,
        }
    }
}

/// Strategy that turns an intensity map into corner candidates.
pub trait CornerExtractor {
    /// Parameters this extractor was built with.
    fn config(&self) -> ExtractConfig;

    /// Resets `corners` and fills it with the candidates found in `intensity`.
    ///
    /// # Errors
    /// `CapacityExceeded` if `corners` is bounded and too small; sizing it
    /// with [`CornerList::for_image`] always suffices.
    fn process(
        &mut self,
        intensity: ImageView<'_, f32>,
        corners: &mut CornerList,
    ) -> CornerKitResult<()>;
}

/// Selects one of the built-in extractors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ExtractorKind {
    /// Every interior pixel above the threshold.
    Threshold,
    /// Full-window non-maximum suppression, `O(r^2)` per pixel.
    NonMaxNaive,
    /// Separable sliding-window non-maximum suppression, `O(1)` per pixel.
    #[default]
    NonMaxFast,
}

impl ExtractorKind {
    /// Builds the extractor for this kind.
    pub fn build(self, config: ExtractConfig) -> Box<dyn CornerExtractor + Send> {
        match self {
            ExtractorKind::Threshold => Box::new(ThresholdExtractor::new(config)),
            ExtractorKind::NonMaxNaive => Box::new(NonMaxNaive::new(config)),
            ExtractorKind::NonMaxFast => Box::new(NonMaxFast::new(config)),
        }
    }
}

/// Column and row ranges of pixels with a complete neighbourhood.
pub(crate) fn interior(
    width: usize,
    height: usize,
    radius: usize,
) -> Option<(Range<usize>, Range<usize>)> {
    if width <= 2 * radius || height <= 2 * radius {
        return None;
    }
    Some((radius..width - radius, radius..height - radius))
}

/// Returns `true` if value `a` at raster position `pa` outranks `b` at `pb`.
///
/// Larger values win; equal values go to the earlier raster position.
#[inline]
pub(crate) fn outranks(a: f32, pa: usize, b: f32, pb: usize) -> bool {
    match a.total_cmp(&b) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => pa < pb,
    }
}
