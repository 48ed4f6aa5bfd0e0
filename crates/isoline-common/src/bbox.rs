//! Bounding box mapping grid indices to output coordinates.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{IsolineError, IsolineResult};

/// The output-space rectangle a grid is stretched over.
///
/// Grid index `0` maps to `min_x`/`min_y` and index `width - 1`/`height - 1`
/// maps to `max_x`/`max_y`. An inverted box (min > max) mirrors the output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Identity mapping for a grid: index `i` lands on `x = i`, `j` on `y = j`.
    pub fn for_grid(width: usize, height: usize) -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: width.saturating_sub(1) as f32,
            max_y: height.saturating_sub(1) as f32,
        }
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// All four coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }

    /// Reject boxes that cannot map grid indices to coordinates.
    pub fn validate(&self) -> IsolineResult<()> {
        if !self.is_finite() {
            return Err(IsolineError::InvalidBbox(format!(
                "coordinates must be finite, got [{}, {}, {}, {}]",
                self.min_x, self.min_y, self.max_x, self.max_y
            )));
        }
        Ok(())
    }

    /// Check if a point is contained within this bbox (edges inclusive).
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        let (lo_x, hi_x) = (self.min_x.min(self.max_x), self.min_x.max(self.max_x));
        let (lo_y, hi_y) = (self.min_y.min(self.max_y), self.min_y.max(self.max_y));
        x >= lo_x && x <= hi_x && y >= lo_y && y <= hi_y
    }
}

impl FromStr for BoundingBox {
    type Err = BboxParseError;

    /// Parse `"min_x,min_y,max_x,max_y"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let parse = |part: &str| -> Result<f32, BboxParseError> {
            let value: f32 = part
                .parse()
                .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))?;
            if !value.is_finite() {
                return Err(BboxParseError::InvalidNumber(part.to_string()));
            }
            Ok(value)
        };

        Ok(Self {
            min_x: parse(parts[0])?,
            min_y: parse(parts[1])?,
            max_x: parse(parts[2])?,
            max_y: parse(parts[3])?,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid BBOX format: {0}. Expected 'minx,miny,maxx,maxy'")]
    InvalidFormat(String),

    #[error("Invalid number in BBOX: {0}")]
    InvalidNumber(String),
}
