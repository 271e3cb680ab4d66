//! MovaType Timeline - multi-track clip arrangement model
//!
//! The timeline is the single authoritative store for block placement:
//! - Blocks reference clip files and carry time-domain positions
//! - Collision keeps committed arrangements overlap-free per lane
//! - Drag is provisional: preview, then commit with lane snapping
//! - Zoom is a display-only pixels-per-second mapping
//!
//! Any graphical layer holds only a read-only projection rebuilt from
//! this model.

pub mod block;
pub mod model;
pub mod zoom;

pub use block::{Block, BlockId};
pub use model::{ClipboardBlock, CollisionRejected, CommitOutcome, DragCandidate, TimelineModel};
pub use zoom::{format_clock, ZoomState};

/// Number of fixed lanes.
pub const TRACK_COUNT: usize = 5;
/// Height of one lane in display pixels.
pub const TRACK_HEIGHT: f32 = 60.0;
/// Height of a block's vertical band. Centered in its lane at rest.
pub const BLOCK_HEIGHT: f32 = 30.0;
/// Vertical inset of a resting block within its lane.
pub const BLOCK_INSET: f32 = (TRACK_HEIGHT - BLOCK_HEIGHT) / 2.0;

/// Resting vertical position for a lane.
#[inline]
pub fn lane_rest_y(track: usize) -> f32 {
    track as f32 * TRACK_HEIGHT + BLOCK_INSET
}

/// Nearest lane for a vertical display position, clamped into range.
#[inline]
pub fn nearest_track(y: f32) -> usize {
    let idx = (y / TRACK_HEIGHT).floor();
    if idx < 0.0 {
        0
    } else {
        (idx as usize).min(TRACK_COUNT - 1)
    }
}
