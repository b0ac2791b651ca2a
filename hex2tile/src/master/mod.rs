//! Master canvas composition
//!
//! Builds the single full-resolution image from which every zoom level is
//! cut. The canvas covers the padded map [`Bounds`] exactly; each sprite is
//! alpha-composited so that its own center lands on its hex center.
//!
//! # Draw order
//!
//! Sprites are decoded in parallel batches but composited strictly in entry
//! order, so later entries cover earlier ones wherever they are opaque. Only
//! one batch of decoded sprites is held at a time.

mod sink;

pub use sink::{NullPlacementSink, PlacementSink, TracingPlacementSink};

use image::{imageops, Rgba, RgbaImage};
use rayon::prelude::*;
use tracing::debug;

use crate::bounds::Bounds;
use crate::config::{EntrySet, HexEntry, TRANSPARENT};
use crate::coord::{hex_center, PixelCoord};
use crate::error::Hex2TileError;

/// Composites hex sprites into one master canvas.
pub struct MasterCompositor<'a> {
    hex_size: f64,
    background: Rgba<u8>,
    decode_batch: Option<usize>,
    sink: &'a dyn PlacementSink,
}

impl<'a> MasterCompositor<'a> {
    /// Create a compositor for hexes of `hex_size` pixels.
    pub fn new(hex_size: f64, sink: &'a dyn PlacementSink) -> Self {
        Self {
            hex_size,
            background: TRANSPARENT,
            decode_batch: None,
            sink,
        }
    }

    /// Fill the canvas with `background` before drawing.
    pub fn with_background(mut self, background: Rgba<u8>) -> Self {
        self.background = background;
        self
    }

    /// Decode at most `batch` sprites at once.
    ///
    /// Defaults to the worker count of the current rayon pool.
    pub fn with_decode_batch(mut self, batch: usize) -> Self {
        self.decode_batch = Some(batch);
        self
    }

    /// Build the master canvas for `entries` over `bounds`.
    ///
    /// # Errors
    ///
    /// - [`Hex2TileError::Geometry`] if `bounds` has no usable size; this is
    ///   checked before the canvas is allocated.
    /// - [`Hex2TileError::ImageDecode`] if any sprite cannot be loaded. No
    ///   partial canvas is returned.
    pub fn compose(
        &self,
        entries: &EntrySet,
        bounds: &Bounds,
    ) -> Result<RgbaImage, Hex2TileError> {
        let (width, height) = bounds.canvas_size()?;
        let batch = self
            .decode_batch
            .unwrap_or_else(rayon::current_num_threads)
            .max(1);

        debug!(width, height, batch, "Allocating master canvas");
        let mut canvas = RgbaImage::from_pixel(width, height, self.background);

        let entries: Vec<&HexEntry> = entries.iter().collect();
        for chunk in entries.chunks(batch) {
            let sprites = chunk
                .par_iter()
                .map(|entry| load_sprite(entry))
                .collect::<Result<Vec<_>, _>>()?;

            for (entry, sprite) in chunk.iter().zip(&sprites) {
                let center = hex_center(entry.q, entry.p, self.hex_size)
                    .offset(-bounds.west, -bounds.north);
                composite_centered(&mut canvas, sprite, center);
                self.sink.placed(entry, center);
            }
        }

        Ok(canvas)
    }
}

/// Load a sprite and normalize it to 8-bit RGBA.
pub fn load_sprite(entry: &HexEntry) -> Result<RgbaImage, Hex2TileError> {
    let image = image::open(&entry.file).map_err(|source| Hex2TileError::ImageDecode {
        id: entry.id.clone(),
        path: entry.file.clone(),
        source,
    })?;
    Ok(image.into_rgba8())
}

/// Alpha-composite `sprite` onto `canvas` with its center at `center`.
///
/// The top-left corner is `center - size / 2`, rounded half-to-even to a
/// whole pixel. Parts falling outside the canvas are clipped.
pub fn composite_centered(canvas: &mut RgbaImage, sprite: &RgbaImage, center: PixelCoord) {
    let (sw, sh) = sprite.dimensions();
    let left = (center.x - f64::from(sw) / 2.0).round_ties_even() as i64;
    let top = (center.y - f64::from(sh) / 2.0).round_ties_even() as i64;
    imageops::overlay(canvas, sprite, left, top);
}
