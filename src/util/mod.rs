//! Shared utility helpers.

pub mod error;
pub(crate) mod select;

pub use error::{CornerKitError, CornerKitResult};
