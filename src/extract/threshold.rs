//! Threshold-only extraction.

use crate::candidate::list::CornerList;
use crate::extract::{interior, CornerExtractor, ExtractConfig};
use crate::image::ImageView;
use crate::trace::{trace_event, trace_span};
use crate::util::CornerKitResult;

/// Emits every interior pixel whose intensity exceeds the threshold.
///
/// No spatial suppression is applied; the radius only sets the excluded
/// border band.
#[derive(Clone, Debug)]
pub struct ThresholdExtractor {
    config: ExtractConfig,
}

impl ThresholdExtractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }
}

impl CornerExtractor for ThresholdExtractor {
    fn config(&self) -> ExtractConfig {
        self.config
    }

    fn process(
        &mut self,
        intensity: ImageView<'_, f32>,
        corners: &mut CornerList,
    ) -> CornerKitResult<()> {
        let _span = trace_span!("threshold_extract", radius = self.config.radius).entered();
        corners.reset();
        let Some((xs, ys)) = interior(intensity.width(), intensity.height(), self.config.radius)
        else {
            return Ok(());
        };

        let threshold = self.config.threshold;
        for y in ys {
            let Some(row) = intensity.row(y) else {
                continue;
            };
            for x in xs.clone() {
                if row[x] > threshold {
                    corners.push(x, y)?;
                }
            }
        }
        trace_event!("threshold_extract_done", corners = corners.len());
        Ok(())
    }
}
