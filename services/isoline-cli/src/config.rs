//! Extraction configuration.
//!
//! Loaded from an optional YAML file; command-line flags are applied on top
//! by `main`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use heightmap::{BrightnessChannel, LoadOptions};
use isoline_common::BoundingBox;
use isolines::{DegeneratePolicy, OverlayStyle};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Root configuration for one extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub input: Option<PathBuf>,
    pub threshold: f32,
    /// Output coordinate box; the grid's identity box when absent
    pub bbox: Option<BoundingBox>,
    pub channel: BrightnessChannel,
    pub flip_vertical: bool,
    pub degenerate: DegeneratePolicy,
    pub output: OutputConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input: None,
            threshold: default_threshold(),
            bbox: None,
            channel: BrightnessChannel::default(),
            flip_vertical: false,
            degenerate: DegeneratePolicy::default(),
            output: OutputConfig::default(),
        }
    }
}

fn default_threshold() -> f32 {
    0.63
}

/// Where and how results are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub png: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub scale: u32,
    pub line_width: f32,
    pub line_color: Option<[u8; 4]>,
    pub background: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            png: None,
            json: None,
            scale: 1,
            line_width: 1.0,
            line_color: None,
            background: true,
        }
    }
}

impl ExtractConfig {
    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ExtractConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), threshold = config.threshold, "Loaded extraction config");
        Ok(config)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.input.is_none() {
            bail!("No input image: pass --input or set `input` in the config file");
        }
        if !self.threshold.is_finite() {
            bail!("Threshold must be finite, got {}", self.threshold);
        }
        if let Some(bbox) = &self.bbox {
            bbox.validate()?;
        }
        if self.output.scale == 0 {
            bail!("Output scale must be at least 1");
        }
        if !(self.output.line_width > 0.0) {
            bail!("Line width must be positive, got {}", self.output.line_width);
        }
        Ok(())
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            channel: self.channel,
            flip_vertical: self.flip_vertical,
        }
    }

    pub fn overlay_style(&self) -> OverlayStyle {
        OverlayStyle {
            scale: self.output.scale,
            line_width: self.output.line_width,
            line_color: self.output.line_color,
            background: self.output.background,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isoline_common::IsolineError;

    #[test]
    fn test_defaults() {
        let config = ExtractConfig::default();
        assert_eq!(config.threshold, 0.63);
        assert_eq!(config.channel, BrightnessChannel::Luma);
        assert_eq!(config.degenerate, DegeneratePolicy::FirstCorner);
        assert_eq!(config.output.scale, 1);
        assert!(config.output.background);
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
input: hm3.png
threshold: 0.4
bbox:
  min_x: -1.0
  min_y: -1.0
  max_x: 1.0
  max_y: 1.0
channel: last-channel
flip_vertical: true
degenerate: midpoint
output:
  png: out.png
  scale: 4
  line_color: [255, 255, 0, 255]
"#;

        let config: ExtractConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.input, Some(PathBuf::from("hm3.png")));
        assert_eq!(config.threshold, 0.4);
        assert_eq!(config.bbox, Some(BoundingBox::new(-1.0, -1.0, 1.0, 1.0)));
        assert_eq!(config.channel, BrightnessChannel::LastChannel);
        assert!(config.flip_vertical);
        assert_eq!(config.degenerate, DegeneratePolicy::Midpoint);
        assert_eq!(config.output.png, Some(PathBuf::from("out.png")));
        assert_eq!(config.output.json, None);
        assert_eq!(config.output.scale, 4);
        assert_eq!(config.output.line_width, 1.0);
        assert_eq!(config.overlay_style().line_color, Some([255, 255, 0, 255]));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: ExtractConfig = serde_yaml::from_str("threshold: 0.1\n").unwrap();
        assert_eq!(config.threshold, 0.1);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_validate() {
        let mut config = ExtractConfig {
            input: Some(PathBuf::from("in.png")),
            ..ExtractConfig::default()
        };
        assert!(config.validate().is_ok());

        config.threshold = f32::NAN;
        assert!(config.validate().is_err());
        config.threshold = 0.5;

        config.bbox = Some(BoundingBox::new(0.0, 0.0, f32::INFINITY, 1.0));
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<IsolineError>(),
            Some(IsolineError::InvalidBbox(_))
        ));
        config.bbox = Some(BoundingBox::new(0.0, 0.0, 10.0, 1.0));

        config.output.scale = 0;
        assert!(config.validate().is_err());
        config.output.scale = 2;

        config.output.line_width = 0.0;
        assert!(config.validate().is_err());
        config.output.line_width = 1.5;

        config.input = None;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("No input image"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extract.yaml");
        std::fs::write(&path, "input: terrain.png\nthreshold: 0.25\n").unwrap();

        let config = ExtractConfig::load(&path).unwrap();
        assert_eq!(config.threshold, 0.25);

        let missing = ExtractConfig::load(&dir.path().join("missing.yaml"));
        assert!(missing.is_err());
    }
}
