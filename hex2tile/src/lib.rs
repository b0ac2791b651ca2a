//! hex2tile - Hex map tile pyramid generator
//!
//! This library turns a set of sprites placed on an axial hex grid into an
//! XYZ tile pyramid for slippy-map viewers:
//!
//! 1. [`bounds`] projects every hex with [`coord`] and computes a
//!    tile-aligned pixel bounding box;
//! 2. [`master`] composites every sprite onto one full-resolution canvas;
//! 3. [`pyramid`] downsamples and cuts the canvas into `{z}/{x}/{y}.png`.
//!
//! [`pipeline::run`] chains the three stages.
//!
//! # Example
//!
//! ```no_run
//! use hex2tile::config::{EntrySet, RunConfig};
//! use hex2tile::master::TracingPlacementSink;
//!
//! let entries = EntrySet::load("map.json".as_ref())?;
//! let config = RunConfig::new("tiles").with_zoom_range(0, 4);
//! let summary = hex2tile::pipeline::run(&entries, &config, &TracingPlacementSink)?;
//! println!("{} tiles", summary.pyramid.total_tiles());
//! # Ok::<(), hex2tile::Hex2TileError>(())
//! ```

pub mod bounds;
pub mod config;
pub mod coord;
pub mod error;
pub mod master;
pub mod pipeline;
pub mod pyramid;

pub use error::Hex2TileError;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
