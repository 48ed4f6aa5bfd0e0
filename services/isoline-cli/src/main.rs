//! Isoline extraction command line.
//!
//! Reads a heightmap image, extracts the isolines at one threshold and
//! writes them as a PNG overlay and/or a JSON segment list.

mod config;
mod pipeline;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use heightmap::BrightnessChannel;
use isoline_common::BoundingBox;
use isolines::DegeneratePolicy;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use config::ExtractConfig;

#[derive(Parser, Debug)]
#[command(name = "isoline-cli")]
#[command(about = "Extract isolines from a heightmap image")]
struct Args {
    /// Heightmap image
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Isovalue, in normalised height units
    #[arg(short, long, env = "ISOLINE_THRESHOLD")]
    threshold: Option<f32>,

    /// Write a PNG overlay here
    #[arg(long)]
    output_png: Option<PathBuf>,

    /// Write the segment list as JSON here
    #[arg(long)]
    output_json: Option<PathBuf>,

    /// Output coordinate box as min_x,min_y,max_x,max_y
    #[arg(long, allow_hyphen_values = true)]
    bbox: Option<BoundingBox>,

    /// Pixel channel read as height
    #[arg(long, value_enum)]
    channel: Option<ChannelArg>,

    /// Handling of crossings on edges with equal endpoint values
    #[arg(long, value_enum)]
    degenerate: Option<PolicyArg>,

    /// Overlay pixels per grid sample
    #[arg(long)]
    scale: Option<u32>,

    /// Overlay line width in pixels
    #[arg(long)]
    line_width: Option<f32>,

    /// Draw lines on a transparent background
    #[arg(long)]
    no_background: bool,

    /// Put the bottom image row at j = 0
    #[arg(long)]
    flip: bool,

    /// YAML file with default settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "ISOLINE_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ChannelArg {
    Luma,
    Last,
}

impl From<ChannelArg> for BrightnessChannel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Luma => BrightnessChannel::Luma,
            ChannelArg::Last => BrightnessChannel::LastChannel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    FirstCorner,
    Midpoint,
    Propagate,
}

impl From<PolicyArg> for DegeneratePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::FirstCorner => DegeneratePolicy::FirstCorner,
            PolicyArg::Midpoint => DegeneratePolicy::Midpoint,
            PolicyArg::Propagate => DegeneratePolicy::Propagate,
        }
    }
}

impl Args {
    /// Flags win over the config file.
    fn apply(&self, config: &mut ExtractConfig) {
        if let Some(input) = &self.input {
            config.input = Some(input.clone());
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(bbox) = self.bbox {
            config.bbox = Some(bbox);
        }
        if let Some(channel) = self.channel {
            config.channel = channel.into();
        }
        if let Some(policy) = self.degenerate {
            config.degenerate = policy.into();
        }
        if self.flip {
            config.flip_vertical = true;
        }
        if let Some(path) = &self.output_png {
            config.output.png = Some(path.clone());
        }
        if let Some(path) = &self.output_json {
            config.output.json = Some(path.clone());
        }
        if let Some(scale) = self.scale {
            config.output.scale = scale;
        }
        if let Some(width) = self.line_width {
            config.output.line_width = width;
        }
        if self.no_background {
            config.output.background = false;
        }
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json)?;

    let mut config = match &args.config {
        Some(path) => ExtractConfig::load(path)?,
        None => ExtractConfig::default(),
    };
    args.apply(&mut config);

    info!(
        input = ?config.input,
        threshold = config.threshold,
        policy = ?config.degenerate,
        "Starting isoline extraction"
    );

    match pipeline::run(&config) {
        Ok(summary) => {
            info!(
                width = summary.width,
                height = summary.height,
                segments = summary.stats.segments,
                "Done"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Extraction failed");
            Err(e)
        }
    }
}
