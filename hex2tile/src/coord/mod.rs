//! Coordinate conversion module
//!
//! Provides the conversion from axial hex-grid coordinates `(q, p)` to pixel
//! coordinates on the master canvas.
//!
//! The projection is fixed: a hex of size `S` (flat-to-flat width) has a
//! height of `sqrt(3) * S / 2`, and
//!
//! ```text
//! x = p * (sqrt(3)/2) * hex_height
//! y = q * hex_height + p * (hex_height / 2)
//! ```
//!
//! Pixel space uses image convention: `y` grows downward.

/// `sqrt(3)`, spelled out so the projection reads like its formula.
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Axial coordinates of a hex cell.
///
/// `q` moves straight down the map, `p` moves down-right. Values are real
/// numbers so that half-cell placements are expressible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxialCoord {
    pub q: f64,
    pub p: f64,
}

impl AxialCoord {
    /// Create a new axial coordinate.
    pub fn new(q: f64, p: f64) -> Self {
        Self { q, p }
    }

    /// Project this cell's center into pixel space.
    #[inline]
    pub fn to_pixel(self, hex_size: f64) -> PixelCoord {
        hex_center(self.q, self.p, hex_size)
    }
}

/// A point in pixel space (image convention, `y` downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelCoord {
    pub x: f64,
    pub y: f64,
}

impl PixelCoord {
    /// Create a new pixel coordinate.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Height of one hex for a given hex size.
#[inline]
pub fn hex_height(hex_size: f64) -> f64 {
    SQRT_3 * (hex_size / 2.0)
}

/// Converts axial coordinates to the pixel center of the hex.
///
/// # Arguments
///
/// * `q` - Axial `q` coordinate
/// * `p` - Axial `p` coordinate
/// * `hex_size` - Flat-to-flat width of one hex in pixels
///
/// # Returns
///
/// The hex center in unbounded pixel space. The origin hex `(0, 0)` maps to
/// `(0.0, 0.0)`; callers translate into canvas space themselves.
#[inline]
pub fn hex_center(q: f64, p: f64, hex_size: f64) -> PixelCoord {
    let hex_height = hex_height(hex_size);

    let py_component = p * (hex_height / 2.0);
    let qy_component = q * hex_height;

    // Evaluation order matters for bit-exact placement: ((p * sqrt3) / 2) * h
    let x = p * SQRT_3 / 2.0 * hex_height;
    let y = qy_component + py_component;

    PixelCoord { x, y }
}
