//! Load, extract, write.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use heightmap::Heightmap;
use isolines::{render_overlay, save_png, ExtractionStats, IsolineExport, IsolineExtractor};
use tracing::{info, warn};

use crate::config::ExtractConfig;

/// What one run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub width: usize,
    pub height: usize,
    pub stats: ExtractionStats,
}

pub fn run(config: &ExtractConfig) -> Result<RunSummary> {
    config.validate()?;
    let input = config
        .input
        .as_deref()
        .context("No input image configured")?;

    let start = Instant::now();
    let heightmap = Heightmap::load(input, config.load_options())
        .with_context(|| format!("Failed to load heightmap: {}", input.display()))?;

    let grid = heightmap.grid();
    let bbox = config.bbox.unwrap_or_else(|| grid.default_bbox());

    if let Some((min, max)) = grid.value_range() {
        if !crosses_range(config.threshold, min, max) {
            warn!(
                threshold = config.threshold,
                min, max, "Threshold is outside the height range; no isolines will be found"
            );
        }
    }

    let mut extractor = IsolineExtractor::new().with_policy(config.degenerate);
    extractor.attach(grid, bbox);
    extractor.compute(config.threshold);
    let stats = extractor.stats();

    info!(
        threshold = config.threshold,
        segments = stats.segments,
        saddles = stats.saddle_cells,
        cells = stats.cells_visited,
        "Extracted isolines"
    );

    if let Some(path) = &config.output.json {
        write_json(&extractor, path)?;
    }

    if let Some(path) = &config.output.png {
        let image = render_overlay(
            &grid,
            &bbox,
            extractor.isolines(),
            config.threshold,
            &config.overlay_style(),
        )
        .context("Failed to render overlay")?;
        save_png(&image, path)
            .with_context(|| format!("Failed to write overlay: {}", path.display()))?;
        info!(path = %path.display(), width = image.width(), height = image.height(), "Wrote overlay");
    }

    if config.output.json.is_none() && config.output.png.is_none() {
        warn!("No output requested; pass --output-png or --output-json");
    }

    info!(elapsed_ms = start.elapsed().as_millis() as u64, "Run complete");

    Ok(RunSummary {
        width: heightmap.width(),
        height: heightmap.height(),
        stats,
    })
}

/// Whether a threshold can split samples spanning `[min, max]`.
///
/// Samples count as above only when strictly greater, so a threshold equal
/// to `max` leaves every sample below.
fn crosses_range(threshold: f32, min: f32, max: f32) -> bool {
    threshold >= min && threshold < max
}

fn write_json(extractor: &IsolineExtractor<'_>, path: &Path) -> Result<()> {
    let json = IsolineExport::from_extractor(extractor).to_json_pretty()?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write segments: {}", path.display()))?;
    info!(path = %path.display(), "Wrote segments");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use isoline_common::BoundingBox;
    use test_utils::temp_gray_png;

    fn config_for(input: &Path) -> ExtractConfig {
        ExtractConfig {
            input: Some(input.to_path_buf()),
            threshold: 0.5,
            ..ExtractConfig::default()
        }
    }

    #[test]
    fn test_run_writes_json_and_png() {
        // Left half black, right half white: one vertical line per row of cells
        let (dir, input) = temp_gray_png(6, 4, |x, _| if x < 3 { 0 } else { 255 });
        let mut config = config_for(&input);
        config.output.json = Some(dir.path().join("segments.json"));
        config.output.png = Some(dir.path().join("overlay.png"));
        config.output.scale = 2;

        let summary = run(&config).unwrap();
        assert_eq!((summary.width, summary.height), (6, 4));
        assert_eq!(summary.stats.cells_visited, 15);
        assert_eq!(summary.stats.segments, 3);

        let json = std::fs::read_to_string(dir.path().join("segments.json")).unwrap();
        let export = IsolineExport::from_json(&json).unwrap();
        assert_eq!(export.segments.len(), 3);
        for [x1, _, x2, _] in export.segments {
            assert_eq!(x1, 2.5);
            assert_eq!(x2, 2.5);
        }

        let overlay = image::open(dir.path().join("overlay.png")).unwrap();
        assert_eq!((overlay.width(), overlay.height()), (12, 8));
    }

    #[test]
    fn test_run_with_bbox() {
        let (dir, input) = temp_gray_png(3, 2, |x, _| if x == 0 { 0 } else { 255 });
        let mut config = config_for(&input);
        config.bbox = Some(BoundingBox::new(0.0, 0.0, 100.0, 10.0));
        config.output.json = Some(dir.path().join("out.json"));

        run(&config).unwrap();

        let json = std::fs::read_to_string(dir.path().join("out.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["bbox"]["max_x"], 100.0);
        assert_eq!(value["segments"][0][0], 25.0);
        assert_eq!(value["segments"][0][3], 10.0);
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("absent.png"));
        let err = run(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load heightmap"));
    }

    #[test]
    fn test_crosses_range() {
        assert!(crosses_range(0.5, 0.0, 1.0));
        assert!(crosses_range(0.0, 0.0, 1.0));
        assert!(!crosses_range(1.0, 0.0, 1.0));
        assert!(!crosses_range(-0.1, 0.0, 1.0));
        assert!(!crosses_range(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_run_at_max_height_is_empty() {
        let (_dir, input) = temp_gray_png(4, 4, |x, _| if x < 2 { 0 } else { 255 });
        let mut config = config_for(&input);
        config.threshold = 1.0;

        let summary = run(&config).unwrap();
        assert_eq!(summary.stats.segments, 0);
        assert_eq!(summary.stats.empty_cells, 9);

        config.threshold = 0.0;
        assert_eq!(run(&config).unwrap().stats.segments, 3);
    }

    #[test]
    fn test_run_without_outputs() {
        let (_dir, input) = temp_gray_png(4, 4, |_, _| 200);
        let summary = run(&config_for(&input)).unwrap();
        assert_eq!(summary.stats.segments, 0);
        assert_eq!(summary.stats.empty_cells, 9);
    }
}
