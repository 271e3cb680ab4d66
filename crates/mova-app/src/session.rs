//! The editing session: timeline, clip cache, background jobs and
//! preview transport behind one facade.

use crate::transport::{PlaybackState, Transport, WallClockTransport, POLL_INTERVAL};
use anyhow::{bail, Context, Result};
use crossbeam_channel::Receiver;
use mova_audio::{ClipCache, CompositionEngine};
use mova_engine::{JobEvent, JobManager, WhisperConfig, WhisperTranscriber};
use mova_media::export::preview_temp_path;
use mova_timeline::{BlockId, CollisionRejected, TimelineModel};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// One open editing session.
pub struct EditSession {
    timeline: TimelineModel,
    cache: ClipCache,
    engine: CompositionEngine,
    jobs: JobManager,
    clipboard: Option<mova_timeline::ClipboardBlock>,
    transport: Box<dyn Transport>,
    playback: PlaybackState,
    last_poll: Option<Instant>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self::with_transport(Box::<WallClockTransport>::default())
    }

    /// Create a session over a specific playback collaborator.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            timeline: TimelineModel::new(),
            cache: ClipCache::new(),
            engine: CompositionEngine::default(),
            jobs: JobManager::new(),
            clipboard: None,
            transport,
            playback: PlaybackState::Stopped,
            last_poll: None,
        }
    }

    pub fn timeline(&self) -> &TimelineModel {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut TimelineModel {
        &mut self.timeline
    }

    /// Place a clip on the timeline, probing its duration from disk.
    /// An unreadable clip still gets a block, with a nominal duration.
    pub fn place_clip(
        &mut self,
        clip: &Path,
        track: usize,
        start_time: f64,
    ) -> std::result::Result<BlockId, CollisionRejected> {
        let duration = self.cache.duration_or_default(clip);
        self.timeline.place(clip, track, start_time, duration)
    }

    /// Copy a block into the session clipboard.
    pub fn copy_block(&mut self, id: BlockId) -> bool {
        match self.timeline.copy(id) {
            Some(entry) => {
                self.clipboard = Some(entry);
                true
            }
            None => false,
        }
    }

    /// Paste the clipboard at the playhead, on the lane nearest the
    /// given vertical display position.
    pub fn paste_at(&mut self, view_y: f32) -> Result<BlockId> {
        let Some(clipboard) = self.clipboard.clone() else {
            bail!("clipboard is empty");
        };
        self.timeline
            .paste(&clipboard, view_y)
            .context("paste position collides with an existing block")
    }

    /// Start transcribing and slicing a source file on the worker.
    ///
    /// Fails immediately when a job is already running; progress and
    /// the terminal outcome arrive on the returned channel.
    pub fn start_segmentation(
        &mut self,
        source: PathBuf,
        output_dir: PathBuf,
        language: &str,
    ) -> Result<Receiver<JobEvent>> {
        let transcriber = WhisperTranscriber::new(WhisperConfig::default());
        self.jobs
            .spawn(transcriber, language, source, output_dir)
            .context("segmentation already in progress")
    }

    pub fn is_segmenting(&mut self) -> bool {
        self.jobs.is_busy()
    }

    /// Render the arrangement and write it to the preview temp file,
    /// then start the transport from the current playhead.
    pub fn play_preview(&mut self) -> Result<PathBuf> {
        let mix = self.engine.render(&self.timeline, &self.cache)?;
        let path = preview_temp_path();
        mova_media::export_buffer(&path, &mix)?;

        let origin = self.timeline.playhead().min(mix.duration());
        self.transport.play(origin, mix.duration(), Instant::now());
        self.playback = PlaybackState::Playing;
        self.last_poll = None;
        info!(
            path = %path.display(),
            length = %mova_timeline::format_clock(mix.duration()),
            "preview rendered"
        );
        Ok(path)
    }

    pub fn stop_preview(&mut self) {
        self.transport.stop();
        self.playback = PlaybackState::Stopped;
    }

    /// Mirror the player's reported position onto the playhead. Call
    /// on every tick of the interactive loop; the player is consulted
    /// at most once per poll interval. A stopped report leaves the
    /// playhead where it is, whether playback finished or died.
    pub fn poll_transport(&mut self) -> PlaybackState {
        self.poll_transport_at(Instant::now())
    }

    fn poll_transport_at(&mut self, now: Instant) -> PlaybackState {
        if self.playback == PlaybackState::Stopped {
            return self.playback;
        }
        if let Some(last) = self.last_poll {
            if now.duration_since(last) < POLL_INTERVAL {
                return self.playback;
            }
        }
        self.last_poll = Some(now);

        let report = self.transport.report(now);
        if report.state == PlaybackState::Playing {
            self.timeline.move_playhead(report.position);
        }
        self.playback = report.state;
        self.playback
    }

    /// Render the arrangement and export it, container by extension.
    pub fn export(&mut self, path: &Path) -> Result<()> {
        let mix = self.engine.render(&self.timeline, &self.cache)?;
        mova_media::export_buffer(path, &mix)?;
        info!(
            path = %path.display(),
            length = %mova_timeline::format_clock(mix.duration()),
            "exported mix"
        );
        Ok(())
    }
}
