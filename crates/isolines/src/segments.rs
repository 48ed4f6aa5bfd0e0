//! Segment generation for classified cells.
//!
//! Edges are named by the corners they join: bottom = a–b, right = b–c,
//! top = d–c, left = a–d. A crossing only moves along the edge's varying
//! coordinate; the other coordinate stays on the edge.

use crate::case::CaseCode;
use crate::point::Point;
use isoline_common::{BoundingBox, ScalarGrid};
use serde::{Deserialize, Serialize};

/// A cell edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Bottom,
    Right,
    Top,
    Left,
}

/// How to place a crossing when the two corner values on an edge are equal
/// or otherwise yield a non-finite interpolation factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DegeneratePolicy {
    /// Cross at the edge's first corner (`t = 0`)
    #[default]
    FirstCorner,
    /// Cross at the middle of the edge (`t = 0.5`)
    Midpoint,
    /// Keep the raw non-finite factor
    Propagate,
}

impl DegeneratePolicy {
    /// Interpolation factor of `threshold` between `v1` and `v2`.
    #[inline]
    pub fn factor(self, threshold: f32, v1: f32, v2: f32) -> f32 {
        let t = (threshold - v1) / (v2 - v1);
        if t.is_finite() {
            return t;
        }
        match self {
            DegeneratePolicy::FirstCorner => 0.0,
            DegeneratePolicy::Midpoint => 0.5,
            DegeneratePolicy::Propagate => t,
        }
    }
}

/// Corner samples of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl Corners {
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { a, b, c, d }
    }

    /// Read the corners of cell `(i, j)`. Requires `i + 1 < width` and `j + 1 < height`.
    #[inline]
    pub fn from_grid(grid: &ScalarGrid<'_>, i: usize, j: usize) -> Self {
        Self {
            a: grid.get(i, j),
            b: grid.get(i + 1, j),
            c: grid.get(i + 1, j + 1),
            d: grid.get(i, j + 1),
        }
    }

    pub fn classify(&self, threshold: f32) -> CaseCode {
        CaseCode::classify(self.a, self.b, self.c, self.d, threshold)
    }
}

/// Edge pairs joined for each case code, in emission order.
///
/// A code and its complement share a row. The saddle rows reuse the
/// single-corner pairs: 5 = (1, 4) and 10 = (2, 8). The saddle pairing is
/// fixed and ignores the cell's centre value, so saddle cells may join edges
/// differently from the field's true local topology.
pub fn edge_pairs(case: CaseCode) -> &'static [(Edge, Edge)] {
    use Edge::*;
    match case.bits() {
        1 | 14 => &[(Left, Bottom)],
        2 | 13 => &[(Left, Top)],
        4 | 11 => &[(Top, Right)],
        7 | 8 => &[(Bottom, Right)],
        3 | 12 => &[(Bottom, Top)],
        6 | 9 => &[(Left, Right)],
        5 => &[(Left, Bottom), (Top, Right)],
        10 => &[(Left, Top), (Bottom, Right)],
        _ => &[],
    }
}

/// Turns classified cells into interpolated segment endpoints.
#[derive(Debug, Clone, Copy)]
pub struct SegmentBuilder {
    min_x: f32,
    min_y: f32,
    dx: f32,
    dy: f32,
    threshold: f32,
    policy: DegeneratePolicy,
}

impl SegmentBuilder {
    /// Builder for a `width`×`height` grid spread over `bbox`.
    pub fn new(
        bbox: BoundingBox,
        width: usize,
        height: usize,
        threshold: f32,
        policy: DegeneratePolicy,
    ) -> Self {
        // Single-sample axes have no cells; keep the spacing finite anyway.
        let steps_x = width.saturating_sub(1).max(1) as f32;
        let steps_y = height.saturating_sub(1).max(1) as f32;

        Self {
            min_x: bbox.min_x,
            min_y: bbox.min_y,
            dx: bbox.width() / steps_x,
            dy: bbox.height() / steps_y,
            threshold,
            policy,
        }
    }

    /// Cell spacing `(dx, dy)` in output units.
    pub fn spacing(&self) -> (f32, f32) {
        (self.dx, self.dy)
    }

    /// Where the isoline crosses `edge` of cell `(i, j)`.
    pub fn crossing(&self, edge: Edge, i: usize, j: usize, corners: &Corners) -> Point {
        let ox = self.min_x + i as f32 * self.dx;
        let oy = self.min_y + j as f32 * self.dy;
        let t = |v1: f32, v2: f32| self.policy.factor(self.threshold, v1, v2);

        match edge {
            Edge::Bottom => Point::new(ox + self.dx * t(corners.a, corners.b), oy),
            Edge::Right => Point::new(ox + self.dx, oy + self.dy * t(corners.b, corners.c)),
            Edge::Top => Point::new(ox + self.dx * t(corners.d, corners.c), oy + self.dy),
            Edge::Left => Point::new(ox, oy + self.dy * t(corners.a, corners.d)),
        }
    }

    /// Append the segments of cell `(i, j)` to `out`, returning how many were added.
    pub fn build(
        &self,
        case: CaseCode,
        i: usize,
        j: usize,
        corners: &Corners,
        out: &mut Vec<Point>,
    ) -> usize {
        let pairs = edge_pairs(case);
        for &(from, to) in pairs {
            out.push(self.crossing(from, i, j, corners));
            out.push(self.crossing(to, i, j, corners));
        }
        pairs.len()
    }
}
