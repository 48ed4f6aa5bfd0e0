//! JSON export of extracted segments.

use crate::extractor::{ExtractionStats, IsolineExtractor};
use isoline_common::{BoundingBox, IsolineResult};
use serde::{Deserialize, Serialize};

/// Serializable snapshot of one extraction.
///
/// Each entry of `segments` is `[x1, y1, x2, y2]` in bounding-box space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsolineExport {
    pub threshold: f32,
    pub width: usize,
    pub height: usize,
    pub bbox: Option<BoundingBox>,
    pub segments: Vec<[f32; 4]>,
    #[serde(default)]
    pub cells_visited: usize,
}

impl IsolineExport {
    /// Snapshot the most recent result of `extractor`.
    pub fn from_extractor(extractor: &IsolineExtractor<'_>) -> Self {
        let (width, height) = extractor
            .grid()
            .map(|grid| (grid.width(), grid.height()))
            .unwrap_or((0, 0));
        let ExtractionStats { cells_visited, .. } = extractor.stats();

        Self {
            threshold: extractor.threshold(),
            width,
            height,
            bbox: extractor.bounding_box(),
            segments: extractor.segments().map(|s| s.to_array()).collect(),
            cells_visited,
        }
    }

    pub fn to_json_pretty(&self) -> IsolineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> IsolineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
