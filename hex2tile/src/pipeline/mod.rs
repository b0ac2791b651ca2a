//! End-to-end pyramid build.
//!
//! Runs the three stages in order, each on the output of the previous one:
//!
//! 1. bounds: enclose every hex cell and pad to the tile size;
//! 2. master: composite all sprites onto one canvas;
//! 3. pyramid: cut `max_zoom..=min_zoom` into tiles.
//!
//! Everything is recomputed from scratch on each run.

use rayon::ThreadPoolBuilder;
use tracing::info;

use crate::bounds::Bounds;
use crate::config::{ConfigError, EntrySet, RunConfig};
use crate::error::Hex2TileError;
use crate::master::{MasterCompositor, PlacementSink};
use crate::pyramid::{write_png, DiskTileWriter, PyramidGenerator, PyramidSummary, TileWriter};

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Padded map bounds in pixel space.
    pub bounds: Bounds,
    pub master_width: u32,
    pub master_height: u32,
    pub pyramid: PyramidSummary,
}

/// Build the pyramid for `entries`, writing tiles under the configured
/// output directory.
pub fn run(
    entries: &EntrySet,
    config: &RunConfig,
    sink: &dyn PlacementSink,
) -> Result<RunSummary, Hex2TileError> {
    let writer = DiskTileWriter::new(config.out_dir());
    run_with_writer(entries, config, sink, &writer)
}

/// Build the pyramid for `entries`, handing tiles to `writer`.
///
/// Settings are validated before any file is touched. When the config
/// names a thread count, the whole run executes on a dedicated pool of that
/// size.
pub fn run_with_writer(
    entries: &EntrySet,
    config: &RunConfig,
    sink: &dyn PlacementSink,
    writer: &dyn TileWriter,
) -> Result<RunSummary, Hex2TileError> {
    config.validate()?;

    match config.threads() {
        Some(threads) => {
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("hex2tile-worker-{}", i))
                .build()
                .map_err(|e| Hex2TileError::ThreadPool(e.to_string()))?;
            pool.install(|| execute(entries, config, sink, writer))
        }
        None => execute(entries, config, sink, writer),
    }
}

fn execute(
    entries: &EntrySet,
    config: &RunConfig,
    sink: &dyn PlacementSink,
    writer: &dyn TileWriter,
) -> Result<RunSummary, Hex2TileError> {
    let bounds = Bounds::enclosing(entries.cells(), config.hex_size())
        .ok_or(ConfigError::Empty)?
        .pad_to_tile(config.tile_size())?;
    info!(
        south = bounds.south,
        west = bounds.west,
        north = bounds.north,
        east = bounds.east,
        "Map bounds"
    );

    let (master_width, master_height) = bounds.canvas_size()?;
    info!("Map size: {}x{}", master_width, master_height);

    let master = MasterCompositor::new(config.hex_size(), sink)
        .with_background(config.background())
        .compose(entries, &bounds)?;

    if let Some(path) = config.master_output() {
        write_png(&master, path)?;
        info!(
            path = %path.display(),
            "Wrote master ({}x{})",
            master_width,
            master_height
        );
    }

    let pyramid = PyramidGenerator::new(config.min_zoom(), config.max_zoom(), config.tile_size())?
        .generate(&master, writer)?;

    for level in &pyramid.levels {
        info!(
            zoom = level.zoom,
            cols = level.cols,
            rows = level.rows,
            tiles = level.tiles,
            "Zoom level written"
        );
    }
    info!(
        out_dir = %config.out_dir().display(),
        tiles = pyramid.total_tiles(),
        "Tiles written"
    );

    Ok(RunSummary {
        bounds,
        master_width,
        master_height,
        pyramid,
    })
}
