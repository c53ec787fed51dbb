//! Per-frame corner detection: extraction followed by top-N selection.

use crate::candidate::list::CornerList;
use crate::candidate::select::SelectNBest;
use crate::extract::{CornerExtractor, ExtractConfig, ExtractorKind};
use crate::image::ImageView;
use crate::trace::{trace_event, trace_span};
use crate::util::CornerKitResult;

/// Detector configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DetectorConfig {
    /// Extraction strategy.
    pub extractor: ExtractorKind,
    /// Window radius and threshold for the extractor.
    pub extract: ExtractConfig,
    /// Upper bound on corners returned per frame.
    pub max_corners: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            extractor: ExtractorKind::default(),
            extract: ExtractConfig::default(),
            max_corners: 130,
        }
    }
}

/// Owns an extractor, its candidate list and a selector, reused frame to frame.
///
/// Buffers grow to the largest frame seen and are never released, so a
/// detector processing a video stream stops allocating after the first frame.
pub struct CornerDetector {
    extractor: Box<dyn CornerExtractor + Send>,
    raw: CornerList,
    select: SelectNBest,
}

impl CornerDetector {
    /// Builds a detector from a configuration.
    pub fn new(config: DetectorConfig) -> Self {
        Self::with_extractor(config.extractor.build(config.extract), config.max_corners)
    }

    /// Builds a detector around a custom extractor.
    pub fn with_extractor(extractor: Box<dyn CornerExtractor + Send>, max_corners: usize) -> Self {
        Self {
            extractor,
            raw: CornerList::growable(),
            select: SelectNBest::new(max_corners),
        }
    }

    /// Runs extraction and selection on one intensity map.
    ///
    /// Returns at most `max_corners` corners; see [`SelectNBest`] for the
    /// ordering guarantees.
    pub fn detect(&mut self, intensity: ImageView<'_, f32>) -> CornerKitResult<&CornerList> {
        let _span = trace_span!(
            "detect",
            width = intensity.width(),
            height = intensity.height()
        )
        .entered();
        self.extractor.process(intensity, &mut self.raw)?;
        self.select.process(intensity, &self.raw)?;
        trace_event!(
            "detect_done",
            raw = self.raw.len(),
            kept = self.select.best_corners().len()
        );
        Ok(self.select.best_corners())
    }

    /// Candidates found by the extractor in the last frame, before pruning.
    pub fn raw_corners(&self) -> &CornerList {
        &self.raw
    }

    /// Corners kept in the last frame.
    pub fn best_corners(&self) -> &CornerList {
        self.select.best_corners()
    }

    /// Extraction parameters in use.
    pub fn extract_config(&self) -> ExtractConfig {
        self.extractor.config()
    }

    /// Maximum corners kept per frame.
    pub fn max_corners(&self) -> usize {
        self.select.target()
    }
}
