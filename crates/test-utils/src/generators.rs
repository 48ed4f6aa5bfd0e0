//! Synthetic scalar fields for isoline tests.
//!
//! Every generator returns a `Vec<f32>` laid out the way `ScalarGrid`
//! expects: row-major with `j` selecting the row, so sample `(i, j)` is at
//! `j * width + i`.

/// Samples of a single 2×2 cell from its named corners.
///
/// `a = (0, 0)`, `b = (1, 0)`, `c = (1, 1)`, `d = (0, 1)`.
///
/// # Example
///
/// ```
/// use test_utils::cell_samples;
///
/// let samples = cell_samples(1.0, 2.0, 3.0, 4.0);
/// assert_eq!(samples, [1.0, 2.0, 4.0, 3.0]);
/// ```
pub fn cell_samples(a: f32, b: f32, c: f32, d: f32) -> [f32; 4] {
    [a, b, d, c]
}

/// Creates a test grid with predictable values.
///
/// Each sample is `i * 1000 + j`, so a read of `(i, j)` can be checked
/// against its own indices.
///
/// # Example
///
/// ```
/// use test_utils::create_index_grid;
///
/// let grid = create_index_grid(10, 5);
/// assert_eq!(grid.len(), 50);
/// assert_eq!(grid[1], 1000.0); // i=1, j=0
/// assert_eq!(grid[10], 1.0);   // i=0, j=1
/// ```
pub fn create_index_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for j in 0..height {
        for i in 0..width {
            data.push((i * 1000 + j) as f32);
        }
    }
    data
}

/// A grid where every sample has the same value.
pub fn create_constant_grid(width: usize, height: usize, value: f32) -> Vec<f32> {
    vec![value; width * height]
}

/// Linear ramp from 0 at `i = 0` to 1 at `i = width - 1`, constant along `j`.
pub fn create_ramp_grid(width: usize, height: usize) -> Vec<f32> {
    let steps = width.saturating_sub(1).max(1) as f32;
    let mut data = Vec::with_capacity(width * height);
    for _j in 0..height {
        for i in 0..width {
            data.push(i as f32 / steps);
        }
    }
    data
}

/// A cone: 1 at the grid centre falling linearly to 0 at the corners.
pub fn create_cone_grid(width: usize, height: usize) -> Vec<f32> {
    let center_x = (width as f32 - 1.0) / 2.0;
    let center_y = (height as f32 - 1.0) / 2.0;
    let max_dist = (center_x * center_x + center_y * center_y).sqrt().max(f32::EPSILON);

    let mut data = Vec::with_capacity(width * height);
    for j in 0..height {
        for i in 0..width {
            let dx = i as f32 - center_x;
            let dy = j as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();
            data.push(1.0 - dist / max_dist);
        }
    }
    data
}

/// Alternating 0/1 samples; with a threshold of 0.5 every cell is a saddle.
pub fn create_checkerboard_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for j in 0..height {
        for i in 0..width {
            data.push(((i + j) % 2) as f32);
        }
    }
    data
}

/// Overlapping sine waves normalised to `[0, 1]`, giving many closed contours.
pub fn create_smooth_field(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for j in 0..height {
        for i in 0..width {
            let fx = i as f32 / width.max(1) as f32;
            let fy = j as f32 / height.max(1) as f32;

            let v1 = (fx * std::f32::consts::PI * 4.0).sin() * 0.2;
            let v2 = (fy * std::f32::consts::PI * 4.0).sin() * 0.2;
            let v3 = ((fx + fy) * std::f32::consts::PI * 2.0).sin() * 0.1;

            data.push((0.5 + v1 + v2 + v3).clamp(0.0, 1.0));
        }
    }
    data
}

/// Takes an existing grid and sets specific positions to NaN.
pub fn create_grid_with_nans(
    mut data: Vec<f32>,
    width: usize,
    nan_positions: &[(usize, usize)],
) -> Vec<f32> {
    for &(i, j) in nan_positions {
        let idx = j * width + i;
        if idx < data.len() {
            data[idx] = f32::NAN;
        }
    }
    data
}
