//! Rayon-parallel extraction (feature-gated).
//!
//! Rows are scanned independently and stitched back in row order, so the
//! output matches the sequential extractor exactly, raster order included.

use crate::candidate::list::CornerList;
use crate::extract::naive::is_local_max;
use crate::extract::{interior, ExtractConfig};
use crate::image::ImageView;
use crate::trace::{trace_event, trace_span};
use crate::util::CornerKitResult;
use rayon::prelude::*;

/// Row-parallel naive non-maximum suppression.
///
/// Equivalent to [`NonMaxNaive`](crate::extract::NonMaxNaive) with the same
/// configuration. Allocates one vector per interior row.
pub fn nonmax_naive_par(
    intensity: ImageView<'_, f32>,
    config: ExtractConfig,
    corners: &mut CornerList,
) -> CornerKitResult<()> {
    let _span = trace_span!("nonmax_naive_par", radius = config.radius).entered();
    corners.reset();
    let Some((xs, ys)) = interior(intensity.width(), intensity.height(), config.radius) else {
        return Ok(());
    };

    let rows: Vec<Vec<usize>> = ys
        .clone()
        .into_par_iter()
        .map(|y| {
            xs.clone()
                .filter(|&x| is_local_max(intensity, config, x, y))
                .collect()
        })
        .collect();

    for (y, row) in ys.zip(rows) {
        for x in row {
            corners.push(x, y)?;
        }
    }
    trace_event!("nonmax_naive_par_done", corners = corners.len());
    Ok(())
}
