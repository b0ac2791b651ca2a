//! Integration tests for the full hex map to tile pyramid flow.
//!
//! These tests drive the public API the way the CLI does:
//! - JSON config → EntrySet
//! - EntrySet + RunConfig → master canvas → tiles on disk
//!
//! Run with: `cargo test --test pyramid_integration`

use std::fs;
use std::path::{Path, PathBuf};

use image::{imageops, Rgba, RgbaImage};

use hex2tile::config::{ConfigError, EntrySet, RunConfig};
use hex2tile::master::NullPlacementSink;
use hex2tile::pipeline;
use hex2tile::Hex2TileError;

// ============================================================================
// Helper Functions
// ============================================================================

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

/// Write a solid square sprite and return its path.
fn write_sprite(dir: &Path, name: &str, size: u32, color: Rgba<u8>) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(size, size, color).save(&path).unwrap();
    path
}

/// Write a config JSON file and return its path.
fn write_config(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("hexes.json");
    fs::write(&path, json).unwrap();
    path
}

/// Collect every `{z}/{x}/{y}.png` under `root`.
fn tile_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

fn load_tile(root: &Path, z: u8, x: u32, y: u32) -> RgbaImage {
    image::open(root.join(z.to_string()).join(x.to_string()).join(format!("{}.png", y)))
        .unwrap()
        .into_rgba8()
}

// ============================================================================
// Integration Tests
// ============================================================================

/// One red square on a single-tile map lands centered in tile 0/0/0.
#[test]
fn test_single_sprite_single_tile() {
    let dir = tempfile::tempdir().unwrap();
    write_sprite(dir.path(), "a.png", 64, RED);
    let config_path = write_config(dir.path(), r#"{"a": {"file": "a.png", "q": 0, "p": 0}}"#);
    let out = dir.path().join("out");

    let entries = EntrySet::load(&config_path)
        .unwrap()
        .with_base_dir(dir.path());
    let config = RunConfig::new(&out)
        .with_hex_size(256.0)
        .with_tile_size(256)
        .with_zoom_range(0, 0);

    let summary = pipeline::run(&entries, &config, &NullPlacementSink).unwrap();

    assert_eq!((summary.master_width, summary.master_height), (256, 256));
    assert_eq!(tile_files(&out), vec![out.join("0").join("0").join("0.png")]);

    let tile = load_tile(&out, 0, 0, 0);
    assert_eq!(tile.dimensions(), (256, 256));
    for (x, y, pixel) in tile.enumerate_pixels() {
        let inside = (96..160).contains(&x) && (96..160).contains(&y);
        if inside {
            assert_eq!(*pixel, RED, "pixel ({}, {}) should be red", x, y);
        } else {
            assert_eq!(pixel.0[3], 0, "pixel ({}, {}) should be transparent", x, y);
        }
    }
}

/// With the default hex size the same map spans a 4×4 grid at native zoom,
/// with the red square straddling the four middle tiles.
#[test]
fn test_default_hex_size_spans_four_by_four_tiles() {
    let dir = tempfile::tempdir().unwrap();
    write_sprite(dir.path(), "a.png", 64, RED);
    let config_path = write_config(dir.path(), r#"{"a": {"file": "a.png", "q": 0, "p": 0}}"#);
    let out = dir.path().join("out");

    let entries = EntrySet::load(&config_path)
        .unwrap()
        .with_base_dir(dir.path());
    let config = RunConfig::new(&out).with_zoom_range(0, 0);

    let summary = pipeline::run(&entries, &config, &NullPlacementSink).unwrap();

    assert_eq!((summary.master_width, summary.master_height), (1024, 1024));
    assert_eq!(tile_files(&out).len(), 16);
    assert_eq!(*load_tile(&out, 0, 1, 1).get_pixel(255, 255), RED);
    assert_eq!(*load_tile(&out, 0, 2, 2).get_pixel(0, 0), RED);
    assert_eq!(load_tile(&out, 0, 0, 0).get_pixel(0, 0).0[3], 0);
}

/// An empty config fails with a config error and writes nothing.
#[test]
fn test_empty_config_fails_before_output() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path(), "{}");
    let out = dir.path().join("out");

    let result = EntrySet::load(&config_path).map_err(Hex2TileError::from);

    assert!(matches!(
        result,
        Err(Hex2TileError::Config(ConfigError::Empty))
    ));
    assert!(!out.exists());
}

/// Two opaque sprites at the same cell: the later entry wins.
#[test]
fn test_later_entry_draws_over_earlier() {
    let dir = tempfile::tempdir().unwrap();
    write_sprite(dir.path(), "red.png", 64, RED);
    write_sprite(dir.path(), "blue.png", 64, BLUE);
    let config_path = write_config(
        dir.path(),
        r#"{
            "A": {"file": "red.png", "q": 0, "p": 0},
            "B": {"file": "blue.png", "q": 0, "p": 0}
        }"#,
    );
    let out = dir.path().join("out");

    let entries = EntrySet::load(&config_path)
        .unwrap()
        .with_base_dir(dir.path());
    let config = RunConfig::new(&out)
        .with_hex_size(256.0)
        .with_zoom_range(0, 0);

    pipeline::run(&entries, &config, &NullPlacementSink).unwrap();

    let tile = load_tile(&out, 0, 0, 0);
    assert_eq!(*tile.get_pixel(128, 128), BLUE);
    assert_eq!(*tile.get_pixel(96, 96), BLUE);
}

/// Every tile on disk, at every zoom, is exactly tile_size square, and the
/// native level re-stitches into the master pixel for pixel.
#[test]
fn test_pyramid_tiles_and_native_restitch() {
    let dir = tempfile::tempdir().unwrap();
    write_sprite(dir.path(), "red.png", 90, RED);
    write_sprite(dir.path(), "blue.png", 40, BLUE);
    let config_path = write_config(
        dir.path(),
        r#"{
            "west": {"name": "West Hex", "file": "red.png", "q": 0, "p": 0},
            "south": {"file": "blue.png", "q": 1, "p": 0},
            "east": {"file": "red.png", "q": -1, "p": 2.5}
        }"#,
    );
    let out = dir.path().join("out");
    let master_path = dir.path().join("master.png");

    let entries = EntrySet::load(&config_path)
        .unwrap()
        .with_base_dir(dir.path());
    let config = RunConfig::new(&out)
        .with_hex_size(100.0)
        .with_tile_size(64)
        .with_zoom_range(1, 3)
        .with_master_output(&master_path);

    let summary = pipeline::run(&entries, &config, &NullPlacementSink).unwrap();

    let files = tile_files(&out);
    assert_eq!(files.len() as u64, summary.pyramid.total_tiles());
    for file in &files {
        let tile = image::open(file).unwrap();
        assert_eq!((tile.width(), tile.height()), (64, 64), "{}", file.display());
    }
    assert!(!out.join("0").exists());

    let master = image::open(&master_path).unwrap().into_rgba8();
    assert_eq!(
        master.dimensions(),
        (summary.master_width, summary.master_height)
    );

    let native = summary.pyramid.levels[0];
    assert_eq!(native.zoom, 3);
    let mut stitched = RgbaImage::new(native.cols * 64, native.rows * 64);
    for x in 0..native.cols {
        for y in 0..native.rows {
            let tile = load_tile(&out, 3, x, y);
            imageops::replace(&mut stitched, &tile, i64::from(x * 64), i64::from(y * 64));
        }
    }
    let restitched =
        imageops::crop_imm(&stitched, 0, 0, master.width(), master.height()).to_image();
    assert_eq!(restitched, master);
}

/// A missing sprite aborts the run and leaves no tiles behind.
#[test]
fn test_missing_sprite_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_sprite(dir.path(), "a.png", 16, RED);
    let config_path = write_config(
        dir.path(),
        r#"{
            "a": {"file": "a.png", "q": 0, "p": 0},
            "lost": {"file": "missing.png", "q": 1, "p": 1}
        }"#,
    );
    let out = dir.path().join("out");

    let entries = EntrySet::load(&config_path)
        .unwrap()
        .with_base_dir(dir.path());
    let config = RunConfig::new(&out).with_hex_size(64.0).with_zoom_range(0, 0);

    let err = pipeline::run(&entries, &config, &NullPlacementSink).unwrap_err();

    match err {
        Hex2TileError::ImageDecode { id, path, .. } => {
            assert_eq!(id, "lost");
            assert_eq!(path, dir.path().join("missing.png"));
        }
        other => panic!("expected ImageDecode, got {}", other),
    }
    assert!(!out.exists());
}
