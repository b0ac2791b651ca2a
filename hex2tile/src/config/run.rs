//! Run settings for a pyramid build.

use std::path::{Path, PathBuf};

use image::Rgba;

use super::ConfigError;

/// Default flat-to-flat hex width in pixels.
pub const DEFAULT_HEX_SIZE: f64 = 1024.0;

/// Default tile edge length in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Default most-detailed zoom level.
pub const DEFAULT_MAX_ZOOM: u8 = 5;

/// Default least-detailed zoom level.
pub const DEFAULT_MIN_ZOOM: u8 = 0;

/// Fully transparent black, the default master background.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Highest zoom span supported; `2^span` must stay a sane downscale factor.
pub const MAX_ZOOM_SPAN: u8 = 30;

/// Settings for one pyramid build.
///
/// Built with `with_*` methods and checked with [`RunConfig::validate`]
/// before any work starts.
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    hex_size: f64,
    tile_size: u32,
    max_zoom: u8,
    min_zoom: u8,
    background: Rgba<u8>,
    out_dir: PathBuf,
    master_output: Option<PathBuf>,
    threads: Option<usize>,
}

impl RunConfig {
    /// Create a config writing tiles under `out_dir` with default settings.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            hex_size: DEFAULT_HEX_SIZE,
            tile_size: DEFAULT_TILE_SIZE,
            max_zoom: DEFAULT_MAX_ZOOM,
            min_zoom: DEFAULT_MIN_ZOOM,
            background: TRANSPARENT,
            out_dir: out_dir.into(),
            master_output: None,
            threads: None,
        }
    }

    pub fn with_hex_size(mut self, hex_size: f64) -> Self {
        self.hex_size = hex_size;
        self
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Set the zoom range, `min_zoom..=max_zoom`.
    pub fn with_zoom_range(mut self, min_zoom: u8, max_zoom: u8) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    pub fn with_background(mut self, background: Rgba<u8>) -> Self {
        self.background = background;
        self
    }

    /// Also write the composited master image to `path`.
    pub fn with_master_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.master_output = Some(path.into());
        self
    }

    /// Use a dedicated pool of `threads` workers instead of the global one.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn hex_size(&self) -> f64 {
        self.hex_size
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    pub fn min_zoom(&self) -> u8 {
        self.min_zoom
    }

    pub fn background(&self) -> Rgba<u8> {
        self.background
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn master_output(&self) -> Option<&Path> {
        self.master_output.as_deref()
    }

    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.hex_size.is_finite() || self.hex_size <= 0.0 {
            return Err(ConfigError::InvalidSetting {
                name: "hex_size",
                reason: format!("must be a positive number, got {}", self.hex_size),
            });
        }
        if self.tile_size == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "tile_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::InvalidSetting {
                name: "min_zoom",
                reason: format!(
                    "min_zoom ({}) must not exceed max_zoom ({})",
                    self.min_zoom, self.max_zoom
                ),
            });
        }
        if self.max_zoom - self.min_zoom > MAX_ZOOM_SPAN {
            return Err(ConfigError::InvalidSetting {
                name: "max_zoom",
                reason: format!("zoom span must not exceed {} levels", MAX_ZOOM_SPAN),
            });
        }
        if self.threads == Some(0) {
            return Err(ConfigError::InvalidSetting {
                name: "threads",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Parse a `RRGGBB` or `RRGGBBAA` hex colour, with or without a leading `#`.
///
/// Six-digit colours are fully opaque.
///
/// # Example
///
/// ```
/// use hex2tile::config::parse_color;
///
/// assert_eq!(parse_color("#ff000080").unwrap().0, [255, 0, 0, 128]);
/// assert_eq!(parse_color("00ff00").unwrap().0, [0, 255, 0, 255]);
/// ```
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ConfigError> {
    let digits = s.strip_prefix('#').unwrap_or(s);

    let invalid = || ConfigError::InvalidSetting {
        name: "background",
        reason: format!("expected RRGGBB or RRGGBBAA hex colour, got '{}'", s),
    };

    let well_formed =
        matches!(digits.len(), 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit());
    if !well_formed {
        return Err(invalid());
    }

    let mut channels = [0u8, 0, 0, 255];
    for (i, channel) in channels.iter_mut().enumerate().take(digits.len() / 2) {
        *channel = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
    }

    Ok(Rgba(channels))
}
