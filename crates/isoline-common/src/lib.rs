//! Common types shared across the isoline workspace.

pub mod bbox;
pub mod error;
pub mod grid;

pub use bbox::{BboxParseError, BoundingBox};
pub use error::{IsolineError, IsolineResult};
pub use grid::ScalarGrid;
