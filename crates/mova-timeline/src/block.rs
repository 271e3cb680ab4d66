//! Block types for the timeline.

use crate::{BLOCK_HEIGHT, TRACK_COUNT, TRACK_HEIGHT};
use mova_core::TimeSpan;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Unique identity of a placed block.
pub type BlockId = Uuid;

/// A placement of a clip on the timeline.
///
/// Multiple blocks may reference the same clip file. The duration is
/// the referenced clip's and is display-scaled only, never edited.
/// `lane_y` is the block's vertical display position: snapped blocks
/// rest centered inside one lane, a raw-committed block may straddle
/// two lanes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Unique block ID.
    pub id: BlockId,
    /// Path of the referenced clip file.
    pub clip_ref: PathBuf,
    /// Start time on the timeline, seconds.
    pub start_time: f64,
    /// Duration of the referenced clip, seconds.
    pub duration: f64,
    /// Vertical display position in track-area pixels.
    pub lane_y: f32,
}

impl Block {
    /// Create a block resting in `track` at `start_time`.
    pub fn new(clip_ref: impl Into<PathBuf>, track: usize, start_time: f64, duration: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            clip_ref: clip_ref.into(),
            start_time,
            duration,
            lane_y: crate::lane_rest_y(track),
        }
    }

    /// Occupied time span `[start, start + duration)`.
    #[inline]
    pub fn span(&self) -> TimeSpan {
        TimeSpan::from_start_duration(self.start_time, self.duration)
    }

    /// Lane derived from the vertical center, clamped into range.
    pub fn track(&self) -> usize {
        let center = self.lane_y + BLOCK_HEIGHT / 2.0;
        let idx = (center / TRACK_HEIGHT).floor();
        if idx < 0.0 {
            0
        } else {
            (idx as usize).min(TRACK_COUNT - 1)
        }
    }

    /// Whether the vertical bands of two placements overlap.
    #[inline]
    pub fn band_overlaps(&self, other_y: f32) -> bool {
        self.lane_y < other_y + BLOCK_HEIGHT && other_y < self.lane_y + BLOCK_HEIGHT
    }

    /// Whether this block is resting exactly inside its derived lane.
    pub fn is_snapped(&self) -> bool {
        (self.lane_y - crate::lane_rest_y(self.track())).abs() < f32::EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_block_rests_in_lane() {
        let block = Block::new("clips/你_a1b2c3.wav", 2, 1.5, 0.3);
        assert_eq!(block.track(), 2);
        assert!(block.is_snapped());
        assert_eq!(block.lane_y, 2.0 * TRACK_HEIGHT + crate::BLOCK_INSET);
    }

    #[test]
    fn test_span_is_half_open() {
        let block = Block::new("a.wav", 0, 2.0, 2.0);
        assert!(block.span().contains(2.0));
        assert!(!block.span().contains(4.0));
    }

    #[test]
    fn test_straddling_block_derives_nearest_lane() {
        let mut block = Block::new("a.wav", 0, 0.0, 1.0);
        // Center at 60.0 falls in the second lane's band.
        block.lane_y = 45.0;
        assert_eq!(block.track(), 1);
        assert!(!block.is_snapped());
    }

    #[test]
    fn test_track_clamped_at_extremes() {
        let mut block = Block::new("a.wav", 0, 0.0, 1.0);
        block.lane_y = -100.0;
        assert_eq!(block.track(), 0);
        block.lane_y = 10_000.0;
        assert_eq!(block.track(), TRACK_COUNT - 1);
    }
}
