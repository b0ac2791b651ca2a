//! XYZ tile pyramid generation
//!
//! The master canvas is the `max_zoom` level. Every lower level is a fresh
//! Lanczos resample of the master by `2^(max_zoom - zoom)`, never a resample
//! of the previous level, so resampling error does not compound.
//!
//! # Architecture
//!
//! ```text
//! master ──┬─► z = max  (no resample) ──► tiles ──┐
//!          ├─► z = max-1 (1/2)        ──► tiles ──┼─► TileWriter
//!          └─► z = min   (1/2^n)      ──► tiles ──┘
//! ```
//!
//! Levels only read the master and tiles only read their level image, so
//! both are processed in parallel on the current rayon pool. Downsampled
//! levels are filtered in premultiplied alpha (see [`alpha`]).

pub mod alpha;
mod plan;
mod tile;
mod writer;

pub use plan::{plan_levels, ZoomLevel};
pub use tile::{cut_tile, TileAddress};
pub use writer::{write_png, DiskTileWriter, MemoryTileWriter, TileWriter};

use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::{ConfigError, MAX_ZOOM_SPAN};
use crate::error::Hex2TileError;
use alpha::{premultiply, unpremultiply, PremultipliedImage};

/// Tiles written for one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelSummary {
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
    pub cols: u32,
    pub rows: u32,
    pub tiles: u64,
}

impl From<&ZoomLevel> for LevelSummary {
    fn from(level: &ZoomLevel) -> Self {
        Self {
            zoom: level.zoom,
            width: level.width,
            height: level.height,
            cols: level.cols,
            rows: level.rows,
            tiles: level.tile_count(),
        }
    }
}

/// Outcome of a pyramid build, most detailed level first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PyramidSummary {
    pub levels: Vec<LevelSummary>,
}

impl PyramidSummary {
    /// Total tiles across all levels.
    pub fn total_tiles(&self) -> u64 {
        self.levels.iter().map(|l| l.tiles).sum()
    }
}

/// Cuts a master canvas into a multi-resolution tile pyramid.
#[derive(Debug, Clone, Copy)]
pub struct PyramidGenerator {
    min_zoom: u8,
    max_zoom: u8,
    tile_size: u32,
}

impl PyramidGenerator {
    /// Create a generator for zoom levels `min_zoom..=max_zoom`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSetting`] if `tile_size` is zero, the
    /// range is inverted, or it spans more than [`MAX_ZOOM_SPAN`] levels.
    pub fn new(min_zoom: u8, max_zoom: u8, tile_size: u32) -> Result<Self, Hex2TileError> {
        if tile_size == 0 {
            return Err(invalid_setting("tile_size", "must be greater than zero".to_string()));
        }
        if min_zoom > max_zoom {
            return Err(invalid_setting(
                "min_zoom",
                format!("min_zoom ({}) must not exceed max_zoom ({})", min_zoom, max_zoom),
            ));
        }
        if max_zoom - min_zoom > MAX_ZOOM_SPAN {
            return Err(invalid_setting(
                "max_zoom",
                format!("zoom span must not exceed {} levels", MAX_ZOOM_SPAN),
            ));
        }

        Ok(Self {
            min_zoom,
            max_zoom,
            tile_size,
        })
    }

    /// Level plan for a master of the given size.
    pub fn plan(&self, master_width: u32, master_height: u32) -> Vec<ZoomLevel> {
        plan_levels(
            master_width,
            master_height,
            self.min_zoom,
            self.max_zoom,
            self.tile_size,
        )
    }

    /// Generate every level and hand each tile to `writer`.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by `writer`; remaining work is
    /// abandoned and no resume state is kept.
    pub fn generate(
        &self,
        master: &RgbaImage,
        writer: &dyn TileWriter,
    ) -> Result<PyramidSummary, Hex2TileError> {
        let levels = self.plan(master.width(), master.height());
        let premultiplied = levels
            .iter()
            .any(|level| !level.is_native())
            .then(|| premultiply(master));

        let levels = levels
            .par_iter()
            .map(|level| self.generate_level(master, premultiplied.as_ref(), level, writer))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PyramidSummary { levels })
    }

    fn generate_level(
        &self,
        master: &RgbaImage,
        premultiplied: Option<&PremultipliedImage>,
        level: &ZoomLevel,
        writer: &dyn TileWriter,
    ) -> Result<LevelSummary, Hex2TileError> {
        let image = resample(master, premultiplied, level);

        debug!(
            zoom = level.zoom,
            scale = level.scale,
            width = level.width,
            height = level.height,
            cols = level.cols,
            rows = level.rows,
            "Cutting zoom level"
        );

        (0..level.cols)
            .into_par_iter()
            .flat_map_iter(|x| (0..level.rows).map(move |y| (x, y)))
            .try_for_each(|(x, y)| {
                let tile = cut_tile(&image, x, y, self.tile_size);
                writer.write(TileAddress::new(level.zoom, x, y), &tile)
            })?;

        Ok(LevelSummary::from(level))
    }
}

fn invalid_setting(name: &'static str, reason: String) -> Hex2TileError {
    ConfigError::InvalidSetting { name, reason }.into()
}

/// The level image: the master itself at native scale, a Lanczos
/// downsample of the premultiplied master otherwise.
fn resample<'a>(
    master: &'a RgbaImage,
    premultiplied: Option<&PremultipliedImage>,
    level: &ZoomLevel,
) -> Cow<'a, RgbaImage> {
    match premultiplied {
        Some(source) if !level.is_native() => Cow::Owned(unpremultiply(&imageops::resize(
            source,
            level.width,
            level.height,
            FilterType::Lanczos3,
        ))),
        _ => Cow::Borrowed(master),
    }
}
