//! MovaType Engine - speech transcription and word segmentation
//!
//! Pipeline: source file → word-level transcription (whisper.cpp
//! sidecar) → greedy midpoint dedup → one WAV clip per accepted word.
//! Long-running jobs execute on a background worker and report over a
//! channel.

pub mod error;
pub mod job;
pub mod segment;
pub mod transcribe;

pub use error::{EngineError, EngineResult};
pub use job::{JobBusy, JobEvent, JobManager};
pub use segment::{accept_words, clip_id, Clip, SegmentOutcome, Segmenter};
pub use transcribe::{Transcribe, WhisperConfig, WhisperTranscriber, Word};
