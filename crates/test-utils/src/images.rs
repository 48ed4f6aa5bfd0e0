//! Heightmap image writers for loader and CLI tests.

use std::path::{Path, PathBuf};

use image::{GrayImage, Luma, Rgba, RgbaImage};
use tempfile::TempDir;

/// Writes an 8-bit grayscale PNG whose pixel `(x, y)` is `pixel(x, y)`.
///
/// # Panics
///
/// Panics if the image cannot be written; this is test-only code.
pub fn write_gray_png(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    pixel: impl Fn(u32, u32) -> u8,
) -> PathBuf {
    let img = GrayImage::from_fn(width, height, |x, y| Luma([pixel(x, y)]));
    let path = dir.join(name);
    img.save(&path).expect("failed to write test PNG");
    path
}

/// Writes an RGBA PNG whose pixel `(x, y)` is `pixel(x, y)`.
pub fn write_rgba_png(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    pixel: impl Fn(u32, u32) -> [u8; 4],
) -> PathBuf {
    let img = RgbaImage::from_fn(width, height, |x, y| Rgba(pixel(x, y)));
    let path = dir.join(name);
    img.save(&path).expect("failed to write test PNG");
    path
}

/// A grayscale PNG in a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for as long as the file is needed.
pub fn temp_gray_png(width: u32, height: u32, pixel: impl Fn(u32, u32) -> u8) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = write_gray_png(dir.path(), "heightmap.png", width, height, pixel);
    (dir, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_gray_png_round_trip() {
        let (_dir, path) = temp_gray_png(4, 2, |x, y| (x * 10 + y) as u8);
        let img = image::open(&path).unwrap().to_luma8();
        assert_eq!(img.dimensions(), (4, 2));
        assert_eq!(img.get_pixel(3, 1).0, [31]);
    }
}
