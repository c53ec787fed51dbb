//! Pruning a candidate list down to its N strongest corners.

use crate::candidate::list::CornerList;
use crate::image::ImageView;
use crate::trace::{trace_event, trace_span};
use crate::util::select::select_smallest;
use crate::util::{CornerKitError, CornerKitResult};

/// Keeps the `target` highest-intensity corners of a candidate list.
///
/// Selection is a quickselect over negated intensities, so the cost is
/// expected linear in the number of candidates rather than `C log C`. The
/// selected corners come out in unspecified order. When several candidates
/// share the intensity at the N-th boundary, which of them survive depends on
/// partitioning and must not be relied upon.
///
/// The scratch arrays grow to the largest candidate count seen and are never
/// shrunk, so steady-state per-frame use does not allocate. An instance must
/// not be shared between threads; use one selector per thread.
#[derive(Debug)]
pub struct SelectNBest {
    best: CornerList,
    target: usize,
    neg_intensity: Vec<f32>,
    indexes: Vec<usize>,
}

impl SelectNBest {
    /// Creates a selector that keeps at most `target` corners.
    pub fn new(target: usize) -> Self {
        Self {
            best: CornerList::with_capacity(target),
            target,
            neg_intensity: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Maximum number of corners kept per call.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Selects the best corners of `corners`, scored by `intensity`.
    ///
    /// Produces exactly `min(target, corners.len())` corners. If the input
    /// already fits, it is copied through in its original order.
    ///
    /// # Errors
    /// `InvalidInput` if a corner lies outside the intensity map.
    pub fn process(
        &mut self,
        intensity: ImageView<'_, f32>,
        corners: &CornerList,
    ) -> CornerKitResult<()> {
        let _span = trace_span!("select_n_best", candidates = corners.len(), target = self.target)
            .entered();
        self.best.reset();

        let count = corners.len();
        if count <= self.target {
            for corner in corners {
                self.best.push(corner.x, corner.y)?;
            }
            return Ok(());
        }

        if self.neg_intensity.len() < count {
            self.neg_intensity.resize(count, 0.0);
            self.indexes.resize(count, 0);
        }

        let points = corners.as_slice();
        for (slot, corner) in self.neg_intensity.iter_mut().zip(points) {
            let value = intensity
                .get(corner.x, corner.y)
                .ok_or(CornerKitError::InvalidInput("corner outside intensity map"))?;
            // Smallest negated values are the largest intensities.
            *slot = -*value;
        }

        select_smallest(
            &mut self.neg_intensity[..count],
            self.target,
            &mut self.indexes[..count],
        );

        for &idx in &self.indexes[..self.target] {
            let corner = points[idx];
            self.best.push(corner.x, corner.y)?;
        }
        trace_event!("select_n_best_done", kept = self.best.len());
        Ok(())
    }

    /// Corners kept by the last call to [`process`](Self::process).
    pub fn best_corners(&self) -> &CornerList {
        &self.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::list::Corner;
    use crate::image::OwnedImage;

    fn map_with(values: &[(usize, usize, f32)], width: usize, height: usize) -> OwnedImage<f32> {
        let mut data = vec![0.0f32; width * height];
        for &(x, y, v) in values {
            data[y * width + x] = v;
        }
        OwnedImage::from_vec(data, width, height).unwrap()
    }

    #[test]
    fn passes_small_lists_through_in_order() {
        let map = map_with(&[], 4, 4);
        let mut corners = CornerList::growable();
        corners.push(3, 1).unwrap();
        corners.push(0, 2).unwrap();
        let mut select = SelectNBest::new(5);
        select.process(map.view(), &corners).unwrap();
        assert_eq!(
            select.best_corners().as_slice(),
            &[Corner::new(3, 1), Corner::new(0, 2)]
        );
    }

    #[test]
    fn keeps_strongest_corners() {
        let map = map_with(&[(0, 0, 1.0), (1, 0, 7.0), (2, 0, 3.0), (3, 0, 9.0)], 4, 1);
        let mut corners = CornerList::growable();
        for x in 0..4 {
            corners.push(x, 0).unwrap();
        }
        let mut select = SelectNBest::new(2);
        select.process(map.view(), &corners).unwrap();
        let mut kept: Vec<Corner> = select.best_corners().iter().collect();
        kept.sort();
        assert_eq!(kept, vec![Corner::new(1, 0), Corner::new(3, 0)]);
    }

    #[test]
    fn scratch_only_grows() {
        let map = map_with(&[], 8, 8);
        let mut big = CornerList::growable();
        for i in 0..40 {
            big.push(i % 8, i / 8).unwrap();
        }
        let mut small = CornerList::growable();
        for i in 0..12 {
            small.push(i % 8, i / 8).unwrap();
        }
        let mut select = SelectNBest::new(3);
        select.process(map.view(), &big).unwrap();
        assert_eq!(select.neg_intensity.len(), 40);
        select.process(map.view(), &small).unwrap();
        assert_eq!(select.neg_intensity.len(), 40);
        assert_eq!(select.best_corners().len(), 3);
    }

    #[test]
    fn zero_target_keeps_nothing() {
        let map = map_with(&[(1, 1, 4.0)], 3, 3);
        let mut corners = CornerList::growable();
        corners.push(1, 1).unwrap();
        let mut select = SelectNBest::new(0);
        select.process(map.view(), &corners).unwrap();
        assert!(select.best_corners().is_empty());
    }

    #[test]
    fn rejects_corner_outside_map() {
        let map = map_with(&[], 2, 2);
        let mut corners = CornerList::growable();
        corners.push(0, 0).unwrap();
        corners.push(5, 5).unwrap();
        let mut select = SelectNBest::new(1);
        assert_eq!(
            select.process(map.view(), &corners).unwrap_err(),
            CornerKitError::InvalidInput("corner outside intensity map")
        );
    }
}
