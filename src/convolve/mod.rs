//! Normalized convolution along image borders.
//!
//! Only the border band is handled here: the `radius` columns (horizontal
//! pass) or rows (vertical pass) next to each image edge, where a full kernel
//! window would read outside the image. Interior samples are expected to be
//! produced by an ordinary convolution and are never touched.

pub mod border;

pub use border::{horizontal, vertical, BorderPixel};
