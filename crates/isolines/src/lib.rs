//! Isoline extraction for gridded scalar fields.
//!
//! Implements marching squares over a [`ScalarGrid`]:
//! - Case classification of each cell against a threshold
//! - Edge interpolation through a fixed 16-case table
//! - An extractor that owns the result buffer between calls
//! - Overlay rendering and JSON export of the produced segments
//!
//! The output is a flat list of points read in pairs; every pair is an
//! independent line segment. Segments are not stitched into polylines.

pub mod case;
pub mod export;
pub mod extractor;
pub mod point;
pub mod render;
pub mod segments;

pub use case::{CaseCode, CaseFamily};
pub use export::IsolineExport;
pub use extractor::{ExtractionStats, IsolineExtractor};
pub use point::{Point, Segment};
pub use render::{encode_png, render_overlay, save_png, OverlayStyle};
pub use segments::{Corners, DegeneratePolicy, Edge, SegmentBuilder};

pub use isoline_common::{BoundingBox, IsolineError, IsolineResult, ScalarGrid};
