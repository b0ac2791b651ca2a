//! Placement progress reporting.

use tracing::info;

use crate::config::HexEntry;
use crate::coord::PixelCoord;

/// Receives one notification per sprite placed on the master canvas.
///
/// Injected into [`MasterCompositor`](super::MasterCompositor) so that
/// progress output stays out of the compositing logic.
pub trait PlacementSink: Send + Sync {
    /// Called after `entry` has been composited with its center at `center`
    /// (canvas-relative pixels).
    fn placed(&self, entry: &HexEntry, center: PixelCoord);
}

/// Logs each placement at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPlacementSink;

impl PlacementSink for TracingPlacementSink {
    fn placed(&self, entry: &HexEntry, center: PixelCoord) {
        info!(
            id = %entry.id,
            "Placing {} px({:.1},{:.1})",
            entry.name,
            center.x,
            center.y
        );
    }
}

/// Discards placement notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPlacementSink;

impl PlacementSink for NullPlacementSink {
    fn placed(&self, _entry: &HexEntry, _center: PixelCoord) {}
}
