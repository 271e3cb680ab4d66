//! Decoded-clip cache keyed by file path.

use mova_core::Result;
use mova_media::{clip_io, AudioBuffer};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Fallback duration when a clip cannot be probed, seconds.
pub const FALLBACK_DURATION: f64 = 1.0;

/// Shared cache of decoded clips.
///
/// Clips are small (single words) so entries are never evicted for
/// the lifetime of a session.
#[derive(Debug, Default)]
pub struct ClipCache {
    entries: Mutex<HashMap<PathBuf, Arc<AudioBuffer>>>,
}

impl ClipCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoded samples for a clip, reading the file on first access.
    pub fn load(&self, path: &Path) -> Result<Arc<AudioBuffer>> {
        if let Some(buffer) = self.entries.lock().get(path) {
            return Ok(Arc::clone(buffer));
        }
        let buffer = Arc::new(clip_io::read_clip(path)?);
        let entry = self
            .entries
            .lock()
            .entry(path.to_path_buf())
            .or_insert(buffer)
            .clone();
        Ok(entry)
    }

    /// Clip duration in seconds, or [`FALLBACK_DURATION`] when the
    /// file cannot be probed. Used for placing blocks before the
    /// clip's audio is ever needed.
    pub fn duration_or_default(&self, path: &Path) -> f64 {
        if let Some(buffer) = self.entries.lock().get(path) {
            return buffer.duration();
        }
        match clip_io::probe_clip_duration(path) {
            Ok(duration) => duration,
            Err(err) => {
                tracing::warn!("failed to probe {}: {err}, assuming 1s", path.display());
                FALLBACK_DURATION
            }
        }
    }

    /// Number of cached clips.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop all cached entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
