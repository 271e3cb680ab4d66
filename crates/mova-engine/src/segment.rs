//! Word segmentation: turns noisy word recognitions into clip files.
//!
//! Word-level ASR output commonly contains duplicate and overlapping
//! recognitions (stutter/echo detections). The segmenter accepts words
//! greedily by a midpoint-containment test, slices the source waveform
//! per accepted word, and writes one mono WAV clip per word.
//!
//! Output layout: `{output_dir}/{source_stem}/{text}_{hash6}.wav`.
//! Clips are staged in a hidden `.{source_stem}.partial` directory and
//! renamed into place only after the last clip is written, so a torn
//! run never looks complete.

use crate::error::{EngineError, EngineResult};
use crate::transcribe::{Transcribe, Word};
use mova_core::TimeSpan;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A persisted audio slice corresponding to one accepted word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clip {
    /// Deterministic name: `{text}_{hash6}`.
    pub id: String,
    /// The word this clip was sliced for.
    pub source_text: String,
    /// Start time in the source, seconds.
    pub start: f64,
    /// End time in the source, seconds.
    pub end: f64,
    /// Path of the written WAV file.
    pub file_path: PathBuf,
}

impl Clip {
    /// Clip duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Result of one segmentation run.
#[derive(Debug, Clone)]
pub struct SegmentOutcome {
    /// Directory holding the clip files.
    pub clip_dir: PathBuf,
    /// Clips written by this run (empty when resumed).
    pub clips: Vec<Clip>,
    /// True when an existing clip directory was reused and nothing
    /// was transcribed or written.
    pub resumed: bool,
}

/// Deterministic clip id: `{text}_{hash6}`, where `hash6` is the first
/// six hex characters of SHA-256 over `"{text}_{floor(start*1000)}"`.
///
/// Re-running segmentation on identical input reproduces the same ids,
/// while same-text words at different times stay distinct.
pub fn clip_id(text: &str, start: f64) -> String {
    let start_ms = (start * 1000.0).floor() as i64;
    let mut hasher = Sha256::new();
    hasher.update(format!("{text}_{start_ms}").as_bytes());
    let digest = hasher.finalize();
    let hash6: String = digest
        .iter()
        .flat_map(|b| [b >> 4, b & 0xf])
        .take(6)
        .map(|n| char::from_digit(n as u32, 16).unwrap_or('0'))
        .collect();
    format!("{text}_{hash6}")
}

/// Greedy midpoint-dedup acceptance.
///
/// Words are sorted by start time, then accepted unless their trimmed
/// text is empty or their midpoint falls inside an already-accepted
/// interval. Two adjacent non-duplicate words whose intervals merely
/// touch are both kept. Running the pass twice over the same input
/// yields the same accepted set.
pub fn accept_words(words: &[Word]) -> Vec<Word> {
    let mut sorted: Vec<Word> = words.to_vec();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut accepted_spans: Vec<TimeSpan> = Vec::new();
    let mut accepted = Vec::new();

    for word in sorted {
        let text = word.text.trim();
        if text.is_empty() {
            continue;
        }
        let span = TimeSpan::new(word.start, word.end);
        if accepted_spans.iter().any(|s| s.contains(span.midpoint())) {
            continue;
        }
        accepted_spans.push(span);
        accepted.push(Word {
            text: text.to_string(),
            ..word
        });
    }

    accepted
}

/// The segmentation engine.
pub struct Segmenter<T: Transcribe> {
    transcriber: T,
    /// Language passed to the recognizer.
    pub language: String,
}

impl<T: Transcribe> Segmenter<T> {
    /// Create a segmenter over a transcription collaborator.
    pub fn new(transcriber: T, language: impl Into<String>) -> Self {
        Self {
            transcriber,
            language: language.into(),
        }
    }

    /// Segment `source` into word clips under `output_dir`.
    ///
    /// `progress` is called after each exported clip with
    /// `(done, total)`, strictly increasing and ending at
    /// `(total, total)`.
    ///
    /// If `{output_dir}/{source_stem}` already contains at least one
    /// WAV file, the run resumes: no transcription, no writes.
    pub fn segment(
        &self,
        source: &Path,
        output_dir: &Path,
        mut progress: impl FnMut(usize, usize),
    ) -> EngineResult<SegmentOutcome> {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| EngineError::Decode(format!("bad source path: {}", source.display())))?
            .to_string();
        let clip_dir = output_dir.join(&stem);

        if dir_has_clips(&clip_dir) {
            info!(dir = %clip_dir.display(), "Clip directory already populated, resuming");
            return Ok(SegmentOutcome {
                clip_dir,
                clips: Vec::new(),
                resumed: true,
            });
        }

        let words = self.transcriber.transcribe(source, &self.language)?;
        let accepted = accept_words(&words);
        info!(
            recognized = words.len(),
            accepted = accepted.len(),
            "Transcription complete, slicing"
        );

        let audio = mova_media::decode_source(source)
            .map_err(|e| EngineError::Decode(e.to_string()))?;

        let staging = output_dir.join(format!(".{stem}.partial"));
        if staging.exists() {
            warn!(dir = %staging.display(), "Removing stale staging directory");
            std::fs::remove_dir_all(&staging)?;
        }
        std::fs::create_dir_all(&staging)?;

        let total = accepted.len();
        let mut clips = Vec::with_capacity(total);

        let mut write_all = || -> EngineResult<Vec<Clip>> {
            let mut written = Vec::with_capacity(total);
            for (i, word) in accepted.iter().enumerate() {
                let id = clip_id(&word.text, word.start);
                let file_path = staging.join(format!("{id}.wav"));
                let slice = audio
                    .slice_seconds(word.start, word.end)
                    .map_err(|e| EngineError::Decode(e.to_string()))?;
                mova_media::write_clip(&file_path, &slice)
                    .map_err(|e| EngineError::Io(std::io::Error::other(e.to_string())))?;
                written.push(Clip {
                    id,
                    source_text: word.text.clone(),
                    start: word.start,
                    end: word.end,
                    file_path,
                });
                progress(i + 1, total);
            }
            Ok(written)
        };

        match write_all() {
            Ok(written) => clips.extend(written),
            Err(e) => {
                let _ = std::fs::remove_dir_all(&staging);
                return Err(e);
            }
        }

        // Publish atomically: the final directory appears only complete.
        if clip_dir.exists() {
            std::fs::remove_dir_all(&clip_dir)?;
        }
        std::fs::rename(&staging, &clip_dir)?;

        for clip in &mut clips {
            clip.file_path = clip_dir.join(format!("{}.wav", clip.id));
        }

        info!(clips = clips.len(), dir = %clip_dir.display(), "Segmentation complete");
        Ok(SegmentOutcome {
            clip_dir,
            clips,
            resumed: false,
        })
    }
}

/// Resume marker: at least one WAV file directly under the directory.
fn dir_has_clips(dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return false;
    };
    entries.flatten().any(|e| {
        e.path()
            .extension()
            .and_then(|x| x.to_str())
            .is_some_and(|x| x.eq_ignore_ascii_case("wav"))
    })
}
