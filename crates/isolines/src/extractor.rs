//! Isoline extraction over an attached grid.
//!
//! The extractor borrows a [`ScalarGrid`] and owns the output buffer. Each
//! call to [`IsolineExtractor::compute`] rebuilds that buffer from scratch;
//! because the buffer is only reachable through `&self`, results from a
//! previous call cannot outlive the next one.
//!
//! Extracting several thresholds concurrently means one extractor per
//! threshold over the same grid view.

use std::time::Instant;

use crate::case::CaseFamily;
use crate::point::{Point, Segment};
use crate::segments::{Corners, DegeneratePolicy, SegmentBuilder};
use isoline_common::{BoundingBox, ScalarGrid};
use serde::Serialize;
use tracing::{debug, trace};

/// Counters collected during the last extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub cells_visited: usize,
    pub segments: usize,
    pub empty_cells: usize,
    pub single_corner_cells: usize,
    pub adjacent_pair_cells: usize,
    pub saddle_cells: usize,
}

impl ExtractionStats {
    fn record(&mut self, family: CaseFamily) {
        self.cells_visited += 1;
        match family {
            CaseFamily::Empty => self.empty_cells += 1,
            CaseFamily::SingleCorner => self.single_corner_cells += 1,
            CaseFamily::AdjacentPair => self.adjacent_pair_cells += 1,
            CaseFamily::Saddle => self.saddle_cells += 1,
        }
    }
}

/// Marching squares driver.
#[derive(Debug, Clone, Default)]
pub struct IsolineExtractor<'a> {
    grid: Option<ScalarGrid<'a>>,
    bbox: Option<BoundingBox>,
    threshold: f32,
    policy: DegeneratePolicy,
    isolines: Vec<Point>,
    stats: ExtractionStats,
}

impl<'a> IsolineExtractor<'a> {
    /// An extractor with no grid attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// An extractor attached to `grid` with its identity bounding box.
    pub fn with_grid(grid: ScalarGrid<'a>) -> Self {
        let mut extractor = Self::new();
        extractor.attach_grid(grid);
        extractor
    }

    pub fn with_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attach a grid and the output-space box it is spread over.
    pub fn attach(&mut self, grid: ScalarGrid<'a>, bbox: BoundingBox) {
        self.grid = Some(grid);
        self.bbox = Some(bbox);
    }

    /// Attach a grid using [`ScalarGrid::default_bbox`].
    pub fn attach_grid(&mut self, grid: ScalarGrid<'a>) {
        self.attach(grid, grid.default_bbox());
    }

    pub fn set_policy(&mut self, policy: DegeneratePolicy) {
        self.policy = policy;
    }

    pub fn policy(&self) -> DegeneratePolicy {
        self.policy
    }

    pub fn grid(&self) -> Option<ScalarGrid<'a>> {
        self.grid
    }

    /// Active bounding box, if a grid is attached.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bbox
    }

    /// Threshold of the most recent [`compute`](Self::compute).
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Replace the stored isolines with those at `threshold`.
    ///
    /// Grids with fewer than two samples along either axis, or no grid at
    /// all, leave the result empty.
    pub fn compute(&mut self, threshold: f32) {
        let start = Instant::now();

        self.threshold = threshold;
        self.isolines.clear();
        self.stats = ExtractionStats::default();

        let (Some(grid), Some(bbox)) = (self.grid, self.bbox) else {
            debug!(threshold, "No grid attached, isolines left empty");
            return;
        };

        if !grid.has_cells() {
            debug!(
                width = grid.width(),
                height = grid.height(),
                "Grid has no cells, isolines left empty"
            );
            return;
        }

        let builder = SegmentBuilder::new(bbox, grid.width(), grid.height(), threshold, self.policy);

        for i in 0..grid.width() - 1 {
            for j in 0..grid.height() - 1 {
                let corners = Corners::from_grid(&grid, i, j);
                let case = corners.classify(threshold);
                let family = case.family();
                self.stats.record(family);

                if family == CaseFamily::Empty {
                    continue;
                }
                if family == CaseFamily::Saddle {
                    trace!(i, j, case = case.bits(), "Saddle cell resolved with fixed pairing");
                }

                self.stats.segments += builder.build(case, i, j, &corners, &mut self.isolines);
            }
        }

        debug!(
            width = grid.width(),
            height = grid.height(),
            threshold,
            cells = self.stats.cells_visited,
            segments = self.stats.segments,
            saddles = self.stats.saddle_cells,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Computed isolines"
        );
    }

    /// Flat endpoint list of the last extraction, two points per segment.
    pub fn isolines(&self) -> &[Point] {
        &self.isolines
    }

    /// The last extraction as segments.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.isolines
            .chunks_exact(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
    }

    pub fn stats(&self) -> ExtractionStats {
        self.stats
    }
}
