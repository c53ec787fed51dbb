//! Non-maximum suppression with separable sliding-window maxima.
//!
//! The window winner is the pixel with the largest `(value, earliest raster
//! position)` key. That key is a total order, so the 2D winner equals the
//! winner among per-column winners:
//!
//! 1. Column pass: for every column and every row center, record the row of
//!    the best pixel in the vertical window `[y - r, y + r]`.
//! 2. Row pass: for every interior row, slide a horizontal window over the
//!    column winners. A pixel is a corner when the overall winner is itself.
//!
//! Both passes use a monotonic deque, so each pixel is pushed and popped at
//! most once per pass and the cost per pixel does not depend on `r`.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::candidate::list::CornerList;
use crate::extract::{interior, outranks, CornerExtractor, ExtractConfig};
use crate::image::ImageView;
use crate::trace::{trace_event, trace_span};
use crate::util::CornerKitResult;

/// Non-maximum suppression whose per-pixel cost is independent of the radius.
///
/// Produces exactly the candidates of [`NonMaxNaive`](crate::extract::NonMaxNaive)
/// for the same map and configuration. Holds scratch buffers that grow to the
/// largest image seen; keep one instance per thread.
#[derive(Clone, Debug)]
pub struct NonMaxFast {
    config: ExtractConfig,
    /// Row of the vertical-window winner, indexed `y * width + x`.
    col_best: Vec<usize>,
    window: VecDeque<usize>,
}

impl NonMaxFast {
    pub fn new(config: ExtractConfig) -> Self {
        Self {
            config,
            col_best: Vec::new(),
            window: VecDeque::new(),
        }
    }
}

impl CornerExtractor for NonMaxFast {
    fn config(&self) -> ExtractConfig {
        self.config
    }

    fn process(
        &mut self,
        intensity: ImageView<'_, f32>,
        corners: &mut CornerList,
    ) -> CornerKitResult<()> {
        let _span = trace_span!("nonmax_fast", radius = self.config.radius).entered();
        corners.reset();
        let width = intensity.width();
        let height = intensity.height();
        let radius = self.config.radius;
        let Some((_, ys)) = interior(width, height, radius) else {
            return Ok(());
        };

        let data = intensity.as_slice();
        let origin = intensity.offset();
        let stride = intensity.stride();
        let at = |x: usize, y: usize| data[origin + y * stride + x];
        let span = 2 * radius;

        if self.col_best.len() < width * height {
            self.col_best.resize(width * height, 0);
        }

        for x in 0..width {
            self.window.clear();
            for j in 0..height {
                let value = at(x, j);
                while let Some(&back) = self.window.back() {
                    if outranks(value, j * width + x, at(x, back), back * width + x) {
                        self.window.pop_back();
                    } else {
                        break;
                    }
                }
                self.window.push_back(j);

                if j >= span {
                    let top = j - span;
                    while self.window.front().is_some_and(|&front| front < top) {
                        self.window.pop_front();
                    }
                    if let Some(&best) = self.window.front() {
                        self.col_best[(j - radius) * width + x] = best;
                    }
                }
            }
        }

        let threshold = self.config.threshold;
        for y in ys {
            self.window.clear();
            let best_rows = &self.col_best[y * width..(y + 1) * width];
            for i in 0..width {
                let row_i = best_rows[i];
                let value = at(i, row_i);
                while let Some(&back) = self.window.back() {
                    let row_back = best_rows[back];
                    if outranks(value, row_i * width + i, at(back, row_back), row_back * width + back)
                    {
                        self.window.pop_back();
                    } else {
                        break;
                    }
                }
                self.window.push_back(i);

                if i >= span {
                    let left = i - span;
                    while self.window.front().is_some_and(|&front| front < left) {
                        self.window.pop_front();
                    }
                    let x = i - radius;
                    let wins = self.window.front() == Some(&x) && best_rows[x] == y;
                    if wins && at(x, y).partial_cmp(&threshold) == Some(Ordering::Greater) {
                        corners.push(x, y)?;
                    }
                }
            }
        }
        trace_event!("nonmax_fast_done", corners = corners.len());
        Ok(())
    }
}
