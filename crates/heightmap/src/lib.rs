//! Heightmaps decoded from images.
//!
//! Converts per-pixel brightness into a normalised height field that can be
//! viewed as a [`ScalarGrid`]. Image columns become grid index `i` and rows
//! become `j`.
//!
//! Decoding goes through the `image` crate, which keeps no process-wide
//! state: there is nothing to initialise before the first load or tear down
//! after the last one.

use std::borrow::Cow;
use std::path::Path;
use std::time::Instant;

use image::{DynamicImage, ImageError};
use isoline_common::{IsolineError, IsolineResult, ScalarGrid};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Minimum pixels to benefit from parallel conversion
const PARALLEL_THRESHOLD: usize = 4096; // 64x64 or larger

/// Which part of a pixel is read as its height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrightnessChannel {
    /// 8-bit luma divided by 255, spanning exactly `[0, 1]`
    #[default]
    Luma,
    /// Last byte of the 8-bit pixel divided by 256, spanning `[0, 255/256]`.
    /// For RGBA images this is the alpha channel.
    LastChannel,
}

/// Options for [`Heightmap::from_image`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub channel: BrightnessChannel,
    /// Put the bottom image row at `j = 0`
    pub flip_vertical: bool,
}

/// An owned, normalised height field.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    width: usize,
    height: usize,
    samples: Vec<f32>,
}

impl Heightmap {
    /// Wrap already-normalised samples laid out as in [`ScalarGrid`].
    pub fn from_samples(width: usize, height: usize, samples: Vec<f32>) -> IsolineResult<Self> {
        // Validates the layout
        ScalarGrid::new(&samples, width, height)?;
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Decode the image at `path`.
    pub fn load(path: &Path, options: LoadOptions) -> IsolineResult<Self> {
        let start = Instant::now();
        let img = image::open(path).map_err(decode_error)?;

        let heightmap = Self::from_image(&img, options);
        info!(
            path = %path.display(),
            width = heightmap.width,
            height = heightmap.height,
            channel = ?options.channel,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Loaded heightmap"
        );
        Ok(heightmap)
    }

    /// Convert a decoded image.
    pub fn from_image(img: &DynamicImage, options: LoadOptions) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;

        let (bytes, channels, divisor) = match options.channel {
            BrightnessChannel::Luma => (Cow::Owned(img.to_luma8().into_raw()), 1, 255.0),
            BrightnessChannel::LastChannel => {
                let (bytes, channels) = native_bytes(img);
                (bytes, channels, 256.0)
            }
        };

        let mut samples = vec![0.0f32; width * height];
        let convert_row = |row: usize, out: &mut [f32]| {
            let src_row = if options.flip_vertical { height - 1 - row } else { row };
            let src = &bytes[src_row * width * channels..(src_row + 1) * width * channels];
            for (sample, pixel) in out.iter_mut().zip(src.chunks_exact(channels)) {
                *sample = pixel[channels - 1] as f32 / divisor;
            }
        };

        if width > 0 {
            if width * height >= PARALLEL_THRESHOLD {
                samples
                    .par_chunks_mut(width)
                    .enumerate()
                    .for_each(|(row, out)| convert_row(row, out));
            } else {
                samples
                    .chunks_mut(width)
                    .enumerate()
                    .for_each(|(row, out)| convert_row(row, out));
            }
        }

        debug!(width, height, channels, "Converted image to heightmap");

        Self {
            width,
            height,
            samples,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Borrowed grid view over the samples.
    pub fn grid(&self) -> ScalarGrid<'_> {
        ScalarGrid::new(&self.samples, self.width, self.height)
            .expect("heightmap layout is validated on construction")
    }
}

/// 8-bit pixel bytes in the image's own channel layout.
fn native_bytes(img: &DynamicImage) -> (Cow<'_, [u8]>, usize) {
    match img {
        DynamicImage::ImageLuma8(buf) => (Cow::Borrowed(buf.as_raw().as_slice()), 1),
        DynamicImage::ImageLumaA8(buf) => (Cow::Borrowed(buf.as_raw().as_slice()), 2),
        DynamicImage::ImageRgb8(buf) => (Cow::Borrowed(buf.as_raw().as_slice()), 3),
        DynamicImage::ImageRgba8(buf) => (Cow::Borrowed(buf.as_raw().as_slice()), 4),
        other if other.color().has_alpha() => (Cow::Owned(other.to_rgba8().into_raw()), 4),
        other => (Cow::Owned(other.to_rgb8().into_raw()), 3),
    }
}

fn decode_error(err: ImageError) -> IsolineError {
    match err {
        ImageError::IoError(io) => IsolineError::from(io),
        other => IsolineError::ImageDecode(other.to_string()),
    }
}
