//! Tile persistence.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageError, ImageFormat, RgbaImage};
use parking_lot::Mutex;

use super::TileAddress;
use crate::error::Hex2TileError;

/// Destination for finished tiles.
///
/// Implementations must be thread-safe: tiles are written concurrently from
/// worker threads, each to a distinct address.
pub trait TileWriter: Send + Sync {
    /// Persist one `tile_size × tile_size` tile.
    fn write(&self, address: TileAddress, tile: &RgbaImage) -> Result<(), Hex2TileError>;
}

/// Writes tiles as PNG files under `root/{z}/{x}/{y}.png`.
#[derive(Debug, Clone)]
pub struct DiskTileWriter {
    root: PathBuf,
}

impl DiskTileWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the file for `address`.
    pub fn tile_path(&self, address: TileAddress) -> PathBuf {
        self.root.join(address.relative_path())
    }
}

impl TileWriter for DiskTileWriter {
    fn write(&self, address: TileAddress, tile: &RgbaImage) -> Result<(), Hex2TileError> {
        write_png(tile, &self.tile_path(address))
    }
}

/// Keeps tiles in memory, keyed by address.
#[derive(Debug, Default)]
pub struct MemoryTileWriter {
    tiles: Mutex<BTreeMap<TileAddress, RgbaImage>>,
}

impl MemoryTileWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tiles written so far.
    pub fn len(&self) -> usize {
        self.tiles.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.lock().is_empty()
    }

    /// Copy of the tile at `address`, if written.
    pub fn get(&self, address: TileAddress) -> Option<RgbaImage> {
        self.tiles.lock().get(&address).cloned()
    }

    /// Every written address, sorted by zoom, then x, then y.
    pub fn addresses(&self) -> Vec<TileAddress> {
        self.tiles.lock().keys().copied().collect()
    }

    /// Consume the writer and return all tiles.
    pub fn into_tiles(self) -> BTreeMap<TileAddress, RgbaImage> {
        self.tiles.into_inner()
    }
}

impl TileWriter for MemoryTileWriter {
    fn write(&self, address: TileAddress, tile: &RgbaImage) -> Result<(), Hex2TileError> {
        self.tiles.lock().insert(address, tile.clone());
        Ok(())
    }
}

/// Encode `image` as PNG at `path`, creating parent directories as needed.
///
/// An already existing directory is not an error, so concurrent writers
/// may share parents.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<(), Hex2TileError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Hex2TileError::io(parent, e))?;
    }

    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|err| match err {
            ImageError::IoError(source) => Hex2TileError::io(path, source),
            source => Hex2TileError::Encode {
                path: path.to_path_buf(),
                source,
            },
        })
}
