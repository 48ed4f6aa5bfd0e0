//! Tests for loading heightmaps from image files.

use heightmap::{BrightnessChannel, Heightmap, LoadOptions};
use isoline_common::IsolineError;
use test_utils::{temp_gray_png, write_rgba_png};

#[test]
fn test_load_gray_png() {
    let (_dir, path) = temp_gray_png(8, 4, |x, _y| if x < 4 { 0 } else { 255 });
    let hm = Heightmap::load(&path, LoadOptions::default()).unwrap();

    assert_eq!((hm.width(), hm.height()), (8, 4));
    let grid = hm.grid();
    assert_eq!(grid.get(3, 2), 0.0);
    assert_eq!(grid.get(4, 2), 1.0);
    assert_eq!(grid.value_range(), Some((0.0, 1.0)));
}

#[test]
fn test_load_rgba_last_channel() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_rgba_png(dir.path(), "alpha.png", 2, 2, |x, y| {
        [10, 20, 30, (x * 64 + y * 128) as u8]
    });

    let luma = Heightmap::load(&path, LoadOptions::default()).unwrap();
    let last = Heightmap::load(
        &path,
        LoadOptions {
            channel: BrightnessChannel::LastChannel,
            flip_vertical: false,
        },
    )
    .unwrap();

    // Luma ignores alpha, so every pixel has the same height
    assert!(luma.samples().windows(2).all(|w| w[0] == w[1]));
    assert_eq!(last.samples(), &[0.0, 0.25, 0.5, 0.75]);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Heightmap::load(&dir.path().join("nope.png"), LoadOptions::default()).unwrap_err();
    assert!(matches!(err, IsolineError::Io(_)), "got {:?}", err);
}

#[test]
fn test_corrupt_file_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not an image, just some text").unwrap();

    let err = Heightmap::load(&path, LoadOptions::default()).unwrap_err();
    assert!(matches!(err, IsolineError::ImageDecode(_)), "got {:?}", err);
}
