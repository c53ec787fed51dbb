//! Reusable list of corner pixel coordinates.

use crate::util::{CornerKitError, CornerKitResult};

/// Integer pixel location of a corner candidate.
///
/// The intensity is not stored; consumers read it back from the intensity
/// map the candidate was extracted from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Corner {
    /// X coordinate (column).
    pub x: usize,
    /// Y coordinate (row).
    pub y: usize,
}

impl Corner {
    /// Creates a corner at `(x, y)`.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Candidate list with O(1) append and reset, reused across frames.
///
/// A list is either bounded (appending past `capacity` fails with
/// `CapacityExceeded`) or growable. Resetting keeps the storage, so a list
/// sized once for an image never allocates again.
#[derive(Clone, Debug)]
pub struct CornerList {
    points: Vec<Corner>,
    limit: Option<usize>,
}

impl CornerList {
    /// Creates a bounded list that holds at most `capacity` corners.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            limit: Some(capacity),
        }
    }

    /// Creates a bounded list large enough for every pixel of an image.
    pub fn for_image(width: usize, height: usize) -> Self {
        Self::with_capacity(width.saturating_mul(height))
    }

    /// Creates an unbounded list.
    pub fn growable() -> Self {
        Self {
            points: Vec::new(),
            limit: None,
        }
    }

    /// Appends a corner.
    ///
    /// # Errors
    /// `CapacityExceeded` if the list is bounded and already full.
    #[inline]
    pub fn push(&mut self, x: usize, y: usize) -> CornerKitResult<()> {
        if let Some(capacity) = self.limit {
            if self.points.len() >= capacity {
                return Err(CornerKitError::CapacityExceeded { capacity });
            }
        }
        self.points.push(Corner { x, y });
        Ok(())
    }

    /// Drops all corners, keeping the allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.points.clear();
    }

    /// Number of corners currently stored.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no corners are stored.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of corners, or `None` for a growable list.
    pub fn capacity(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the corner at `index`.
    pub fn get(&self, index: usize) -> Option<Corner> {
        self.points.get(index).copied()
    }

    /// Returns the stored corners in insertion order.
    pub fn as_slice(&self) -> &[Corner] {
        &self.points
    }

    /// Iterates over the stored corners in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Corner> + '_ {
        self.points.iter().copied()
    }
}

impl<'a> IntoIterator for &'a CornerList {
    type Item = &'a Corner;
    type IntoIter = std::slice::Iter<'a, Corner>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
