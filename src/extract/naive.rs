//! Brute-force non-maximum suppression.

use std::cmp::Ordering;

use crate::candidate::list::CornerList;
use crate::extract::{interior, outranks, CornerExtractor, ExtractConfig};
use crate::image::ImageView;
use crate::trace::{trace_event, trace_span};
use crate::util::CornerKitResult;

/// Non-maximum suppression that inspects the full window of every pixel.
///
/// Cost is `O(r^2)` per pixel above the threshold. Serves as the reference
/// for [`NonMaxFast`](crate::extract::NonMaxFast).
#[derive(Clone, Debug)]
pub struct NonMaxNaive {
    config: ExtractConfig,
}

impl NonMaxNaive {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }
}

impl CornerExtractor for NonMaxNaive {
    fn config(&self) -> ExtractConfig {
        self.config
    }

    fn process(
        &mut self,
        intensity: ImageView<'_, f32>,
        corners: &mut CornerList,
    ) -> CornerKitResult<()> {
        let _span = trace_span!("nonmax_naive", radius = self.config.radius).entered();
        corners.reset();
        let Some((xs, ys)) = interior(intensity.width(), intensity.height(), self.config.radius)
        else {
            return Ok(());
        };

        for y in ys {
            for x in xs.clone() {
                if is_local_max(intensity, self.config, x, y) {
                    corners.push(x, y)?;
                }
            }
        }
        trace_event!("nonmax_naive_done", corners = corners.len());
        Ok(())
    }
}

/// Tests whether interior pixel `(x, y)` passes the threshold and wins its window.
#[inline]
pub(crate) fn is_local_max(
    intensity: ImageView<'_, f32>,
    config: ExtractConfig,
    x: usize,
    y: usize,
) -> bool {
    let data = intensity.as_slice();
    let origin = intensity.offset();
    let stride = intensity.stride();
    let width = intensity.width();
    let radius = config.radius;

    let value = data[origin + y * stride + x];
    if value.partial_cmp(&config.threshold) != Some(Ordering::Greater) {
        return false;
    }
    let pos = y * width + x;

    for j in y - radius..=y + radius {
        let row = origin + j * stride;
        for i in x - radius..=x + radius {
            let q = j * width + i;
            if q != pos && !outranks(value, pos, data[row + i], q) {
                return false;
            }
        }
    }
    true
}
