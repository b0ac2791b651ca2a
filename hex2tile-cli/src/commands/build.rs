//! Build command - composite the hex map and write the tile pyramid.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use hex2tile::config::{
    parse_color, EntrySet, RunConfig, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_TILE_SIZE,
};
use hex2tile::master::{NullPlacementSink, PlacementSink, TracingPlacementSink};
use hex2tile::pipeline::{self, RunSummary};
use tracing::info;

use crate::error::CliError;

/// Arguments for the build command.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Path to config JSON: {<hex_id>: {"name": <name>, "file": <png>, "q": <q>, "p": <p>}}.
    /// q and p are axial hexagon coordinates; name is optional.
    #[arg(long = "hexes", value_name = "PATH")]
    pub config_path: PathBuf,

    /// Output directory for tiles (creates z/x/y.png)
    #[arg(long = "out", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Max zoom level; this level is tiled from the master at full resolution
    #[arg(long, default_value_t = DEFAULT_MAX_ZOOM)]
    pub max_zoom: u8,

    /// Min zoom level
    #[arg(long, default_value_t = DEFAULT_MIN_ZOOM)]
    pub min_zoom: u8,

    /// Tile size in pixels
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,

    /// Size of one hex (flat-to-flat width) in pixels
    #[arg(long, default_value_t = 1024)]
    pub hex_size: u32,

    /// Optional path to write the assembled master PNG for debugging
    #[arg(long, value_name = "PATH")]
    pub write_master: Option<PathBuf>,

    /// Master background colour as RRGGBB or RRGGBBAA (default: transparent)
    #[arg(long, value_name = "COLOR")]
    pub background: Option<String>,

    /// Base directory for relative sprite paths (default: working directory)
    #[arg(long, value_name = "DIR")]
    pub sprite_dir: Option<PathBuf>,

    /// Number of worker threads (default: one per CPU)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Write a JSON summary of the generated levels to this path
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,
}

impl BuildArgs {
    /// Translate arguments into a validated run configuration.
    pub fn to_run_config(&self) -> Result<RunConfig, CliError> {
        let mut config = RunConfig::new(&self.out_dir)
            .with_hex_size(f64::from(self.hex_size))
            .with_tile_size(self.tile_size)
            .with_zoom_range(self.min_zoom, self.max_zoom);

        if let Some(ref color) = self.background {
            config = config.with_background(parse_color(color)?);
        }
        if let Some(ref path) = self.write_master {
            config = config.with_master_output(path);
        }
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Run the build command.
pub fn run(args: BuildArgs, quiet: bool) -> Result<RunSummary, CliError> {
    let config = args.to_run_config()?;

    let mut entries = EntrySet::load(&args.config_path)?;
    if let Some(ref dir) = args.sprite_dir {
        entries = entries.with_base_dir(dir);
    }
    info!(
        config = %args.config_path.display(),
        entries = entries.len(),
        "Loaded hex entries"
    );

    let sink: &dyn PlacementSink = if quiet {
        &NullPlacementSink
    } else {
        &TracingPlacementSink
    };

    let summary = pipeline::run(&entries, &config, sink)?;

    if let Some(ref path) = args.summary {
        write_summary(&summary, path)?;
    }

    Ok(summary)
}

fn write_summary(summary: &RunSummary, path: &Path) -> Result<(), CliError> {
    let json = serde_json::json!({
        "master": {
            "width": summary.master_width,
            "height": summary.master_height,
        },
        "bounds": {
            "south": summary.bounds.south,
            "west": summary.bounds.west,
            "north": summary.bounds.north,
            "east": summary.bounds.east,
        },
        "total_tiles": summary.pyramid.total_tiles(),
        "levels": summary.pyramid.levels,
    });

    let text =
        serde_json::to_string_pretty(&json).map_err(|e| CliError::Summary(e.to_string()))?;
    fs::write(path, text)
        .map_err(|e| CliError::Summary(format!("{}: {}", path.display(), e)))?;
    info!(path = %path.display(), "Wrote summary");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex2tile::config::ConfigError;
    use hex2tile::Hex2TileError;
    use image::{Rgba, RgbaImage};

    fn args(dir: &std::path::Path) -> BuildArgs {
        BuildArgs {
            config_path: dir.join("hexes.json"),
            out_dir: dir.join("out"),
            max_zoom: 1,
            min_zoom: 0,
            tile_size: 64,
            hex_size: 64,
            write_master: None,
            background: None,
            sprite_dir: Some(dir.to_path_buf()),
            threads: None,
            summary: None,
        }
    }

    #[test]
    fn test_to_run_config_maps_flags() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path());
        args.background = Some("#102030".to_string());
        args.threads = Some(2);

        let config = args.to_run_config().unwrap();
        assert_eq!(config.tile_size(), 64);
        assert_eq!(config.hex_size(), 64.0);
        assert_eq!(config.background(), Rgba([0x10, 0x20, 0x30, 255]));
        assert_eq!(config.threads(), Some(2));
    }

    #[test]
    fn test_bad_background_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path());
        args.background = Some("purple".to_string());

        assert!(matches!(
            args.to_run_config(),
            Err(CliError::Build(Hex2TileError::Config(
                ConfigError::InvalidSetting { .. }
            )))
        ));
    }

    #[test]
    fn test_run_writes_tiles_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]))
            .save(dir.path().join("a.png"))
            .unwrap();
        fs::write(
            dir.path().join("hexes.json"),
            r#"{"a": {"file": "a.png", "q": 0, "p": 0}}"#,
        )
        .unwrap();
        let mut args = args(dir.path());
        args.summary = Some(dir.path().join("summary.json"));

        let summary = run(args, true).unwrap();

        assert!(dir.path().join("out/1/0/0.png").is_file());
        assert!(dir.path().join("out/0/0/0.png").is_file());
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(written["total_tiles"], summary.pyramid.total_tiles());
        assert_eq!(written["levels"][0]["zoom"], 1);
    }

    #[test]
    fn test_empty_config_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hexes.json"), "{}").unwrap();

        let result = run(args(dir.path()), true);

        assert!(matches!(
            result,
            Err(CliError::Build(Hex2TileError::Config(ConfigError::Empty)))
        ));
        assert!(!dir.path().join("out").exists());
    }
}
