//! Cell classification against a threshold.
//!
//! Corner naming follows the grid axes: `a = (i, j)`, `b = (i+1, j)`,
//! `c = (i+1, j+1)`, `d = (i, j+1)`. Each corner strictly above the
//! threshold contributes its weight to the case code.

/// Weight of corner `a` in the case code.
pub const WEIGHT_A: u8 = 1;
/// Weight of corner `b` in the case code.
pub const WEIGHT_B: u8 = 8;
/// Weight of corner `c` in the case code.
pub const WEIGHT_C: u8 = 4;
/// Weight of corner `d` in the case code.
pub const WEIGHT_D: u8 = 2;

/// Topological family of a case code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseFamily {
    /// All corners on one side (0, 15)
    Empty,
    /// One corner differs from the other three (1, 2, 4, 7, 8, 11, 13, 14)
    SingleCorner,
    /// Corners sharing an edge agree pairwise (3, 6, 9, 12)
    AdjacentPair,
    /// Diagonal corners agree with each other only (5, 10)
    Saddle,
}

/// 4-bit marching squares case code (0-15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaseCode(u8);

impl CaseCode {
    /// Classify a cell's corners. Values equal to the threshold count as below.
    #[inline]
    pub fn classify(a: f32, b: f32, c: f32, d: f32, threshold: f32) -> Self {
        let mut code = 0u8;
        if a > threshold {
            code |= WEIGHT_A;
        }
        if b > threshold {
            code |= WEIGHT_B;
        }
        if c > threshold {
            code |= WEIGHT_C;
        }
        if d > threshold {
            code |= WEIGHT_D;
        }
        Self(code)
    }

    /// Build from a raw code, rejecting values above 15.
    pub fn from_bits(bits: u8) -> Option<Self> {
        (bits <= 15).then_some(Self(bits))
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    /// The code obtained by flipping every corner across the threshold.
    pub fn complement(&self) -> Self {
        Self(15 - self.0)
    }

    pub fn family(&self) -> CaseFamily {
        match self.0 {
            0 | 15 => CaseFamily::Empty,
            3 | 6 | 9 | 12 => CaseFamily::AdjacentPair,
            5 | 10 => CaseFamily::Saddle,
            _ => CaseFamily::SingleCorner,
        }
    }

    /// Number of segments a cell with this code emits.
    pub fn segment_count(&self) -> usize {
        match self.family() {
            CaseFamily::Empty => 0,
            CaseFamily::SingleCorner | CaseFamily::AdjacentPair => 1,
            CaseFamily::Saddle => 2,
        }
    }
}
