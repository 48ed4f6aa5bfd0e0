//! Overlay rendering of extracted isolines.
//!
//! Draws the scalar field as grayscale and strokes every point pair as an
//! independent segment. Points are mapped from bounding-box space back to
//! grid index space, so grid sample `(i, j)` covers pixel column `i` and
//! pixel row `j` (times `scale`).

use std::io::Cursor;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use isoline_common::{BoundingBox, IsolineError, IsolineResult, ScalarGrid};
use tiny_skia::{Paint, PathBuilder, Pixmap, PremultipliedColorU8, Stroke, Transform};
use tracing::debug;

use crate::point::Point;

/// Styling for [`render_overlay`].
#[derive(Debug, Clone)]
pub struct OverlayStyle {
    /// Pixels per grid sample along each axis
    pub scale: u32,
    /// Stroke width in pixels
    pub line_width: f32,
    /// Line color [R, G, B, A]; `None` derives it from the threshold
    pub line_color: Option<[u8; 4]>,
    /// Paint the field itself underneath the lines
    pub background: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            scale: 1,
            line_width: 1.0,
            line_color: None,
            background: true,
        }
    }
}

impl OverlayStyle {
    /// Line color for `threshold`: red rises and blue falls as the threshold
    /// moves from 0 to 1.
    pub fn color_for(&self, threshold: f32) -> [u8; 4] {
        if let Some(color) = self.line_color {
            return color;
        }
        let t = if threshold.is_finite() { threshold.clamp(0.0, 1.0) } else { 0.0 };
        [(t * 255.0).round() as u8, 0, ((1.0 - t) * 255.0).round() as u8, 255]
    }
}

/// Map an output-space point to pixel coordinates.
fn to_pixel(p: Point, bbox: &BoundingBox, grid: &ScalarGrid<'_>, scale: f32) -> (f32, f32) {
    let steps_x = grid.width().saturating_sub(1) as f32;
    let steps_y = grid.height().saturating_sub(1) as f32;

    let ix = if bbox.width() != 0.0 { (p.x - bbox.min_x) / bbox.width() * steps_x } else { 0.0 };
    let iy = if bbox.height() != 0.0 { (p.y - bbox.min_y) / bbox.height() * steps_y } else { 0.0 };

    ((ix + 0.5) * scale, (iy + 0.5) * scale)
}

/// Render `isolines` over `grid`.
///
/// Samples are expected in `[0, 1]`; values outside are clamped and
/// non-finite samples render black.
pub fn render_overlay(
    grid: &ScalarGrid<'_>,
    bbox: &BoundingBox,
    isolines: &[Point],
    threshold: f32,
    style: &OverlayStyle,
) -> IsolineResult<RgbaImage> {
    let scale = style.scale.max(1);
    let scaled = |n: usize| u32::try_from(n).ok().and_then(|n| n.checked_mul(scale));
    let (width, height) = scaled(grid.width()).zip(scaled(grid.height())).ok_or_else(|| {
        IsolineError::RenderError(format!(
            "Canvas size {}x{} at scale {} overflows",
            grid.width(),
            grid.height(),
            scale
        ))
    })?;

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        IsolineError::RenderError(format!("Cannot create {}x{} canvas", width, height))
    })?;

    if style.background {
        let stride = width as usize;
        for (idx, pixel) in pixmap.pixels_mut().iter_mut().enumerate() {
            let px = (idx % stride) as u32 / scale;
            let py = (idx / stride) as u32 / scale;
            let v = grid.get(px as usize, py as usize);
            let gray = if v.is_finite() { (v.clamp(0.0, 1.0) * 255.0).round() as u8 } else { 0 };
            if let Some(color) = PremultipliedColorU8::from_rgba(gray, gray, gray, 255) {
                *pixel = color;
            }
        }
    }

    let mut pb = PathBuilder::new();
    for pair in isolines.chunks_exact(2) {
        let (x1, y1) = to_pixel(pair[0], bbox, grid, scale as f32);
        let (x2, y2) = to_pixel(pair[1], bbox, grid, scale as f32);
        if !(x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite()) {
            continue;
        }
        pb.move_to(x1, y1);
        pb.line_to(x2, y2);
    }

    if let Some(path) = pb.finish() {
        let color = style.color_for(threshold);
        let mut paint = Paint::default();
        paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
        paint.anti_alias = false;

        let mut stroke = Stroke::default();
        stroke.width = style.line_width;

        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    debug!(width, height, segments = isolines.len() / 2, "Rendered isoline overlay");

    RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| IsolineError::RenderError("Pixel buffer size mismatch".to_string()))
}

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> IsolineResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    PngEncoder::new(&mut buf)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
        .map_err(|e| IsolineError::RenderError(format!("PNG encoding failed: {}", e)))?;
    Ok(buf.into_inner())
}

/// Encode and write an RGBA image to `path`.
pub fn save_png(image: &RgbaImage, path: &Path) -> IsolineResult<()> {
    let bytes = encode_png(image)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_follows_threshold() {
        let style = OverlayStyle::default();
        assert_eq!(style.color_for(0.0), [0, 0, 255, 255]);
        assert_eq!(style.color_for(1.0), [255, 0, 0, 255]);
        assert_eq!(style.color_for(7.0), [255, 0, 0, 255]);
        assert_eq!(style.color_for(f32::NAN), [0, 0, 255, 255]);

        let fixed = OverlayStyle {
            line_color: Some([1, 2, 3, 4]),
            ..OverlayStyle::default()
        };
        assert_eq!(fixed.color_for(0.5), [1, 2, 3, 4]);
    }

    #[test]
    fn test_to_pixel_identity() {
        let data = [0.0f32; 9];
        let grid = ScalarGrid::new(&data, 3, 3).unwrap();
        let bbox = grid.default_bbox();
        assert_eq!(to_pixel(Point::new(1.0, 2.0), &bbox, &grid, 1.0), (1.5, 2.5));
        assert_eq!(to_pixel(Point::new(0.0, 0.0), &bbox, &grid, 4.0), (2.0, 2.0));
    }

    #[test]
    fn test_to_pixel_scaled_bbox() {
        let data = [0.0f32; 9];
        let grid = ScalarGrid::new(&data, 3, 3).unwrap();
        let bbox = BoundingBox::new(-1.0, 10.0, 1.0, 30.0);
        assert_eq!(to_pixel(Point::new(0.0, 20.0), &bbox, &grid, 1.0), (1.5, 1.5));
    }
}
