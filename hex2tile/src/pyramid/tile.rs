//! Tile addressing and cutting.

use std::fmt;
use std::path::PathBuf;

use image::{imageops, RgbaImage};

use crate::config::TRANSPARENT;

/// XYZ address of a tile: origin top-left, `x` rightward, `y` downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileAddress {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl TileAddress {
    pub fn new(zoom: u8, x: u32, y: u32) -> Self {
        Self { zoom, x, y }
    }

    /// Path of this tile relative to the output root: `{z}/{x}/{y}.png`.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.zoom.to_string())
            .join(self.x.to_string())
            .join(format!("{}.png", self.y))
    }
}

impl fmt::Display for TileAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Cut the tile at column `x`, row `y` out of a level image.
///
/// The crop is clamped to the level's bounds; whatever part of the tile
/// falls outside is left fully transparent. The result is always
/// `tile_size × tile_size`.
pub fn cut_tile(level: &RgbaImage, x: u32, y: u32, tile_size: u32) -> RgbaImage {
    let left = x.saturating_mul(tile_size);
    let top = y.saturating_mul(tile_size);
    let width = level.width().saturating_sub(left).min(tile_size);
    let height = level.height().saturating_sub(top).min(tile_size);

    let crop = imageops::crop_imm(level, left, top, width, height).to_image();
    if width == tile_size && height == tile_size {
        return crop;
    }

    let mut tile = RgbaImage::from_pixel(tile_size, tile_size, TRANSPARENT);
    imageops::replace(&mut tile, &crop, 0, 0);
    tile
}
