//! Zoom level planning.

use crate::config::MAX_ZOOM_SPAN;

/// Geometry of one zoom level, derived from the master size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomLevel {
    pub zoom: u8,
    /// Downscale factor from the master, `2^(max_zoom - zoom)`.
    pub scale: u32,
    /// Resampled width, `ceil(master_width / scale)`.
    pub width: u32,
    /// Resampled height, `ceil(master_height / scale)`.
    pub height: u32,
    /// Tile columns, `ceil(width / tile_size)`.
    pub cols: u32,
    /// Tile rows, `ceil(height / tile_size)`.
    pub rows: u32,
}

impl ZoomLevel {
    /// Number of tiles in this level.
    pub fn tile_count(&self) -> u64 {
        u64::from(self.cols) * u64::from(self.rows)
    }

    /// True for the master level, which is tiled without resampling.
    pub fn is_native(&self) -> bool {
        self.scale == 1
    }
}

/// Plan every zoom level from `max_zoom` down to `min_zoom`.
///
/// Levels are returned most detailed first. Callers validate the zoom range
/// beforehand; an inverted range, a span above [`MAX_ZOOM_SPAN`] or a zero
/// tile size yields no levels.
pub fn plan_levels(
    master_width: u32,
    master_height: u32,
    min_zoom: u8,
    max_zoom: u8,
    tile_size: u32,
) -> Vec<ZoomLevel> {
    if min_zoom > max_zoom || max_zoom - min_zoom > MAX_ZOOM_SPAN || tile_size == 0 {
        return Vec::new();
    }

    (min_zoom..=max_zoom)
        .rev()
        .map(|zoom| {
            let scale = 1u32 << (max_zoom - zoom);
            let width = master_width.div_ceil(scale);
            let height = master_height.div_ceil(scale);
            ZoomLevel {
                zoom,
                scale,
                width,
                height,
                cols: width.div_ceil(tile_size),
                rows: height.div_ceil(tile_size),
            }
        })
        .collect()
}
