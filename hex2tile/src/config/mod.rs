//! Configuration module
//!
//! Two kinds of configuration drive a build:
//!
//! - the **entry configuration**, a JSON file listing every sprite and its
//!   axial position ([`EntrySet`]);
//! - the **run configuration**, sizes, zoom range and output locations
//!   ([`RunConfig`]).

mod entries;
mod error;
mod run;

pub use entries::{EntrySet, HexEntry};
pub use error::ConfigError;
pub use run::{
    parse_color, RunConfig, DEFAULT_HEX_SIZE, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM,
    DEFAULT_TILE_SIZE, MAX_ZOOM_SPAN, TRANSPARENT,
};
