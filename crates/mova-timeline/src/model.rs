//! The committed timeline model and its drag lifecycle.
//!
//! All mutation happens synchronously on the interactive context.
//! Collision rejection is a normal return value, never an error that
//! crosses a thread boundary.

use crate::block::{Block, BlockId};
use crate::zoom::ZoomState;
use crate::{lane_rest_y, nearest_track, BLOCK_HEIGHT, TRACK_COUNT, TRACK_HEIGHT};
use mova_core::TimeSpan;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// A placement was rejected because it would overlap another block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("placement collides with an existing block")]
pub struct CollisionRejected;

/// Candidate position during an interactive drag.
///
/// The vertical band may straddle two lanes; it is clamped into the
/// track area on entry, and the start time is clamped to zero.
#[derive(Debug, Clone, Copy)]
pub struct DragCandidate {
    pub start_time: f64,
    pub lane_y: f32,
}

impl DragCandidate {
    fn clamped(self) -> Self {
        let max_y = TRACK_COUNT as f32 * TRACK_HEIGHT - BLOCK_HEIGHT;
        Self {
            start_time: self.start_time.max(0.0),
            lane_y: self.lane_y.clamp(0.0, max_y),
        }
    }
}

/// How a drag commit resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The raw candidate collided; the block reverted to its
    /// pre-drag position.
    Reverted,
    /// Committed snapped into the given lane.
    Snapped(usize),
    /// The snapped position collided; committed at the raw candidate.
    RawCommitted,
}

/// Data captured by `copy` and consumed by `paste`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardBlock {
    pub clip_ref: PathBuf,
    pub duration: f64,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    block: BlockId,
    start_time: f64,
    lane_y: f32,
}

/// The authoritative multi-track arrangement.
#[derive(Debug, Default)]
pub struct TimelineModel {
    blocks: Vec<Block>,
    drag: Option<DragState>,
    playhead: f64,
    /// Display-only pixels-per-second mapping.
    pub zoom: ZoomState,
}

impl TimelineModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// All committed blocks.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Latest end time over all blocks, seconds.
    pub fn extent(&self) -> f64 {
        self.blocks
            .iter()
            .map(|b| b.start_time + b.duration)
            .fold(0.0, f64::max)
    }

    /// Collision test: time spans overlap and vertical bands overlap.
    fn collides(&self, span: TimeSpan, lane_y: f32, exclude: Option<BlockId>) -> bool {
        self.blocks.iter().any(|b| {
            Some(b.id) != exclude && b.span().overlaps(span) && b.band_overlaps(lane_y)
        })
    }

    /// Place a new block resting in `track` at `start_time`.
    pub fn place(
        &mut self,
        clip_ref: impl Into<PathBuf>,
        track: usize,
        start_time: f64,
        duration: f64,
    ) -> Result<BlockId, CollisionRejected> {
        // Out-of-range placements are collisions with the world edge.
        if track >= TRACK_COUNT || start_time < 0.0 || duration <= 0.0 {
            return Err(CollisionRejected);
        }
        let span = TimeSpan::from_start_duration(start_time, duration);
        if self.collides(span, lane_rest_y(track), None) {
            return Err(CollisionRejected);
        }
        let block = Block::new(clip_ref, track, start_time, duration);
        let id = block.id;
        self.blocks.push(block);
        Ok(id)
    }

    /// Record a block's pre-drag position as rollback state.
    pub fn begin_drag(&mut self, id: BlockId) -> bool {
        match self.block(id) {
            Some(b) => {
                self.drag = Some(DragState {
                    block: id,
                    start_time: b.start_time,
                    lane_y: b.lane_y,
                });
                true
            }
            None => false,
        }
    }

    /// Test a provisional drag position for collision. No mutation;
    /// callers use the result for feedback highlighting only.
    pub fn preview_drag(&self, id: BlockId, candidate: DragCandidate) -> bool {
        let Some(block) = self.block(id) else {
            return false;
        };
        let candidate = candidate.clamped();
        let span = TimeSpan::from_start_duration(candidate.start_time, block.duration);
        self.collides(span, candidate.lane_y, Some(id))
    }

    /// Commit a drag:
    /// 1. raw candidate collides — revert to the pre-drag position;
    /// 2. otherwise snap the lane from the candidate's vertical
    ///    center (time is never snapped);
    /// 3. snapped position collides — commit the raw candidate;
    /// 4. otherwise commit snapped.
    pub fn commit_drag(&mut self, id: BlockId, candidate: DragCandidate) -> CommitOutcome {
        let Some(index) = self.blocks.iter().position(|b| b.id == id) else {
            return CommitOutcome::Reverted;
        };
        let duration = self.blocks[index].duration;
        let candidate = candidate.clamped();
        let span = TimeSpan::from_start_duration(candidate.start_time, duration);

        if self.collides(span, candidate.lane_y, Some(id)) {
            if let Some(drag) = self.drag.take().filter(|d| d.block == id) {
                self.blocks[index].start_time = drag.start_time;
                self.blocks[index].lane_y = drag.lane_y;
            }
            return CommitOutcome::Reverted;
        }

        let center = candidate.lane_y + BLOCK_HEIGHT / 2.0;
        let snapped_track = nearest_track(center);
        let snapped_y = lane_rest_y(snapped_track);

        // Raw was already checked clean in step 1.
        let outcome = if self.collides(span, snapped_y, Some(id)) {
            self.blocks[index].lane_y = candidate.lane_y;
            CommitOutcome::RawCommitted
        } else {
            self.blocks[index].lane_y = snapped_y;
            CommitOutcome::Snapped(snapped_track)
        };
        self.blocks[index].start_time = candidate.start_time;
        self.drag = None;
        outcome
    }

    /// Remove a block. No cascading effects.
    pub fn delete(&mut self, id: BlockId) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|b| b.id != id);
        self.blocks.len() != before
    }

    /// Capture a block for pasting.
    pub fn copy(&self, id: BlockId) -> Option<ClipboardBlock> {
        self.block(id).map(|b| ClipboardBlock {
            clip_ref: b.clip_ref.clone(),
            duration: b.duration,
        })
    }

    /// Paste at the playhead's time, on the lane nearest the given
    /// vertical display position. Same collision rule as `place`.
    pub fn paste(
        &mut self,
        clipboard: &ClipboardBlock,
        view_y: f32,
    ) -> Result<BlockId, CollisionRejected> {
        let track = nearest_track(view_y);
        self.place(
            clipboard.clip_ref.clone(),
            track,
            self.playhead,
            clipboard.duration,
        )
    }

    /// Current playhead time, seconds.
    pub fn playhead(&self) -> f64 {
        self.playhead
    }

    /// Move the playhead; clamps to zero.
    pub fn move_playhead(&mut self, time: f64) {
        self.playhead = time.max(0.0);
    }
}
