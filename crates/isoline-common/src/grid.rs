//! Borrowed view over a regular grid of scalar samples.

use crate::{BoundingBox, IsolineError, IsolineResult};

/// A width×height field of `f32` samples, borrowed from the caller.
///
/// Samples are stored row-major with `j` selecting the row, so sample
/// `(i, j)` lives at `j * width + i`. The view is `Copy`; cloning it never
/// copies the samples.
#[derive(Debug, Clone, Copy)]
pub struct ScalarGrid<'a> {
    samples: &'a [f32],
    width: usize,
    height: usize,
}

impl<'a> ScalarGrid<'a> {
    /// Wrap `samples` as a `width`×`height` grid.
    ///
    /// Grids narrower than two samples on either axis are accepted; they
    /// simply contain no cells.
    pub fn new(samples: &'a [f32], width: usize, height: usize) -> IsolineResult<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or(IsolineError::DimensionMismatch {
                width,
                height,
                expected: usize::MAX,
                actual: samples.len(),
            })?;

        if samples.len() != expected {
            return Err(IsolineError::DimensionMismatch {
                width,
                height,
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            samples,
            width,
            height,
        })
    }

    /// Sample at grid index `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= width` or `j >= height`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        assert!(
            i < self.width && j < self.height,
            "grid index ({}, {}) out of bounds for {}x{} grid",
            i,
            j,
            self.width,
            self.height
        );
        self.samples[j * self.width + i]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The backing samples in row-major order.
    pub fn samples(&self) -> &'a [f32] {
        self.samples
    }

    /// Number of cells whose four corners are all in range.
    pub fn cell_count(&self) -> usize {
        self.width.saturating_sub(1) * self.height.saturating_sub(1)
    }

    /// Whether the grid contains at least one cell.
    pub fn has_cells(&self) -> bool {
        self.width >= 2 && self.height >= 2
    }

    /// Minimum and maximum of the finite samples, if any.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        self.samples
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Identity bounding box for this grid.
    pub fn default_bbox(&self) -> BoundingBox {
        BoundingBox::for_grid(self.width, self.height)
    }
}
