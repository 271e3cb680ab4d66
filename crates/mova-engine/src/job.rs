//! Background segmentation jobs.
//!
//! Transcription and slicing are long-running, so they execute on a
//! dedicated worker thread and report back over a channel. At most one
//! job is in flight; starting another while busy is rejected, not
//! queued. The worker never touches the timeline model.

use crate::segment::{SegmentOutcome, Segmenter};
use crate::transcribe::Transcribe;
use crossbeam_channel::{unbounded, Receiver};
use std::path::PathBuf;
use std::thread::JoinHandle;
use thiserror::Error;
use tracing::{error, info};

/// Signals a segmentation worker sends to the interactive context.
#[derive(Debug)]
pub enum JobEvent {
    /// Integer percentage 0..=100, monotonically non-decreasing.
    Progress(u8),
    /// The job completed.
    Finished(SegmentOutcome),
    /// The job failed; no partial clip directory was published.
    Failed(String),
}

/// Returned when a job is started while another is still running.
#[derive(Debug, Error)]
#[error("a segmentation job is already running")]
pub struct JobBusy;

/// Owns the single segmentation worker slot.
pub struct JobManager {
    worker: Option<JoinHandle<()>>,
}

impl JobManager {
    pub fn new() -> Self {
        Self { worker: None }
    }

    /// Whether a worker is still running.
    pub fn is_busy(&mut self) -> bool {
        match &self.worker {
            Some(handle) if handle.is_finished() => {
                // Reap the finished worker.
                if let Some(handle) = self.worker.take() {
                    let _ = handle.join();
                }
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Start a segmentation job on a worker thread.
    ///
    /// Returns the event receiver, or `JobBusy` if a job is already in
    /// flight. Events end with exactly one `Finished` or `Failed`.
    pub fn spawn<T>(
        &mut self,
        transcriber: T,
        language: impl Into<String>,
        source: PathBuf,
        output_dir: PathBuf,
    ) -> Result<Receiver<JobEvent>, JobBusy>
    where
        T: Transcribe + Send + 'static,
    {
        if self.is_busy() {
            return Err(JobBusy);
        }

        let (tx, rx) = unbounded();
        let language = language.into();

        let handle = std::thread::spawn(move || {
            info!(source = %source.display(), "Segmentation job started");
            let segmenter = Segmenter::new(transcriber, language);
            let mut last_pct: u8 = 0;

            let result = segmenter.segment(&source, &output_dir, |done, total| {
                let pct = if total == 0 {
                    100
                } else {
                    ((done * 100) / total) as u8
                };
                if pct > last_pct {
                    last_pct = pct;
                    let _ = tx.send(JobEvent::Progress(pct));
                }
            });

            match result {
                Ok(outcome) => {
                    let _ = tx.send(JobEvent::Finished(outcome));
                }
                Err(e) => {
                    error!(error = %e, "Segmentation job failed");
                    let _ = tx.send(JobEvent::Failed(e.to_string()));
                }
            }
        });

        self.worker = Some(handle);
        Ok(rx)
    }

    /// Block until the current worker (if any) exits.
    pub fn join(&mut self) {
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

impl Default for JobManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for JobManager {
    fn drop(&mut self) {
        self.join();
    }
}
