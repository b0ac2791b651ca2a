//! Pixel-space bounds of a hex map.
//!
//! The bounding box is computed from the hex cells themselves, not from the
//! sprites drawn into them: every cell contributes a `hex_size` wide and
//! `hex_height` tall rectangle around its projected center. The box is then
//! grown so that both sides are whole multiples of the tile size, which lets
//! the top zoom level tile without partial tiles.

use crate::coord::{hex_center, AxialCoord};
use crate::error::Hex2TileError;

/// `sqrt(3) / 2`, the hex aspect used for the bounding half-height.
const HALF_SQRT_3: f64 = 0.866_025_403_784_438_6;

/// A pixel-space rectangle in image convention (`north <= south`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Create bounds from explicit edges.
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Horizontal extent in pixels.
    pub fn width_world(&self) -> f64 {
        self.east - self.west
    }

    /// Vertical extent in pixels.
    pub fn height_world(&self) -> f64 {
        self.south - self.north
    }

    /// Computes the smallest box that covers every hex cell.
    ///
    /// # Arguments
    ///
    /// * `cells` - Axial coordinates of every placed hex
    /// * `hex_size` - Flat-to-flat width of one hex in pixels
    ///
    /// # Returns
    ///
    /// `None` when `cells` is empty: an empty map has no meaningful extent.
    pub fn enclosing<I>(cells: I, hex_size: f64) -> Option<Self>
    where
        I: IntoIterator<Item = AxialCoord>,
    {
        let half_width = hex_size / 2.0;
        // Equal to hex_height / 2 for regular hexes; computed independently.
        let half_height = HALF_SQRT_3 * half_width;

        let mut west = f64::INFINITY;
        let mut east = f64::NEG_INFINITY;
        let mut south = f64::NEG_INFINITY;
        let mut north = f64::INFINITY;
        let mut any = false;

        for cell in cells {
            let center = hex_center(cell.q, cell.p, hex_size);

            west = west.min(center.x - half_width);
            east = east.max(center.x + half_width);
            south = south.max(center.y + half_height);
            north = north.min(center.y - half_height);
            any = true;
        }

        any.then_some(Self {
            south,
            west,
            north,
            east,
        })
    }

    /// Grows the box so both sides are multiples of `tile_size`.
    ///
    /// Each side is first rounded up to a whole pixel, then up to the next
    /// multiple of `tile_size`. The added pixels are split between opposite
    /// edges, with the odd pixel going to the east or south edge. When no
    /// padding is needed the box is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`Hex2TileError::Geometry`] if the box is inverted, empty or
    /// not finite, or if `tile_size` is zero.
    pub fn pad_to_tile(self, tile_size: u32) -> Result<Self, Hex2TileError> {
        let width = self.width_world();
        let height = self.height_world();

        if tile_size == 0 || !is_positive_extent(width) || !is_positive_extent(height) {
            return Err(Hex2TileError::Geometry { width, height });
        }

        let tile = u64::from(tile_size);
        let base_w = pixel_extent(width) as u64;
        let base_h = pixel_extent(height) as u64;
        let padded_w = base_w.div_ceil(tile) * tile;
        let padded_h = base_h.div_ceil(tile) * tile;
        let pad_w = padded_w - base_w;
        let pad_h = padded_h - base_h;

        if pad_w == 0 && pad_h == 0 {
            return Ok(self);
        }

        let pad_w_left = pad_w / 2;
        let pad_w_right = pad_w - pad_w_left;
        let pad_h_top = pad_h / 2;
        let pad_h_bottom = pad_h - pad_h_top;

        Ok(Self {
            south: self.south + pad_h_bottom as f64,
            west: self.west - pad_w_left as f64,
            north: self.north - pad_h_top as f64,
            east: self.east + pad_w_right as f64,
        })
    }

    /// Integer canvas size covering these bounds: `(ceil(w), ceil(h))`.
    ///
    /// Sides within rounding noise of a whole pixel count as that pixel, so
    /// bounds from [`Bounds::pad_to_tile`] always yield exact tile multiples.
    ///
    /// # Errors
    ///
    /// Returns [`Hex2TileError::Geometry`] when either side is not a
    /// positive, finite number that fits in `u32`.
    pub fn canvas_size(&self) -> Result<(u32, u32), Hex2TileError> {
        let width = self.width_world();
        let height = self.height_world();

        let fits = |v: f64| is_positive_extent(v) && pixel_extent(v) <= f64::from(u32::MAX);
        if !fits(width) || !fits(height) {
            return Err(Hex2TileError::Geometry { width, height });
        }

        Ok((pixel_extent(width) as u32, pixel_extent(height) as u32))
    }
}

/// Relative tolerance under which an extent is treated as a whole pixel.
const SNAP_EPSILON: f64 = 1e-9;

/// Whole pixels needed to cover `v`.
///
/// Edge subtraction in `f64` can leave an integral extent a few ulps above
/// or below the integer; those snap to it instead of rounding up.
fn pixel_extent(v: f64) -> f64 {
    let nearest = v.round();
    if (v - nearest).abs() <= nearest.abs().max(1.0) * SNAP_EPSILON {
        nearest
    } else {
        v.ceil()
    }
}

fn is_positive_extent(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
