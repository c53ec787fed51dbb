//! cornerkit is the feature-detection kernel shared by corner trackers.
//!
//! It provides three tightly coupled stages:
//!
//! - [`convolve`]: normalized convolution over the border band of an image,
//!   renormalizing clipped kernels so flat regions stay flat.
//! - [`extract`]: corner candidate extraction from an intensity map by
//!   thresholding or non-maximum suppression (naive and radius-independent).
//! - [`SelectNBest`]: pruning of a candidate list to its N strongest entries
//!   by quickselect instead of a full sort.
//!
//! [`CornerDetector`] chains extraction and selection for per-frame use.
//! Row-parallel extraction is available with the `rayon` feature.

mod trace;

mod candidate;
pub mod convolve;
pub mod detector;
pub mod extract;
pub mod image;
pub mod kernel;
pub mod util;

pub use candidate::list::{Corner, CornerList};
pub use candidate::select::SelectNBest;
pub use detector::{CornerDetector, DetectorConfig};
pub use extract::{
    CornerExtractor, ExtractConfig, ExtractorKind, NonMaxFast, NonMaxNaive, ThresholdExtractor,
};
pub use image::{ImageView, ImageViewMut, OwnedImage};
pub use kernel::{Kernel1D, Kernel1dF32, Kernel1dI32};
pub use util::{CornerKitError, CornerKitResult};
