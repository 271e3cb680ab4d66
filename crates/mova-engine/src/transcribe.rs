//! Word-level transcription using whisper.cpp as a sidecar process.
//!
//! The segmenter consumes transcription through the [`Transcribe`]
//! trait; the stock implementation spawns whisper.cpp with `--max-len 1`
//! so every emitted segment carries exactly one word with its own
//! timestamps. No uniqueness or non-overlap is guaranteed — filtering
//! duplicate recognitions is the segmenter's job.

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// A timestamped word emitted by the recognizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    /// The recognized text.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

/// Transcription collaborator contract.
///
/// Returns words ordered by emission; callers must tolerate duplicate
/// and overlapping recognitions.
pub trait Transcribe {
    fn transcribe(&self, path: &Path, language: &str) -> EngineResult<Vec<Word>>;
}

/// Configuration for the whisper.cpp sidecar.
pub struct WhisperConfig {
    /// Path to the whisper.cpp binary.
    pub binary: PathBuf,
    /// Path to the whisper model file (.bin).
    pub model_path: PathBuf,
    /// Number of threads to use.
    pub threads: u32,
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            binary: Self::find_whisper_binary(),
            model_path: Self::default_model_path(),
            threads: num_cpus::get() as u32,
        }
    }
}

impl WhisperConfig {
    /// Search PATH for a whisper.cpp binary.
    pub fn find_whisper_binary() -> PathBuf {
        for name in &["whisper-cpp", "whisper-cli", "whisper"] {
            if which::which(name).is_ok() {
                return PathBuf::from(name);
            }
        }
        PathBuf::from("whisper-cpp")
    }

    /// Default model location under the user data dir.
    pub fn default_model_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("movatype/models/ggml-base.bin")
    }
}

/// Whisper.cpp-based transcription engine.
pub struct WhisperTranscriber {
    config: WhisperConfig,
}

impl WhisperTranscriber {
    /// Create a new transcriber with the given configuration.
    pub fn new(config: WhisperConfig) -> Self {
        Self { config }
    }

    /// Check if whisper.cpp is available on the system.
    pub fn is_available(&self) -> bool {
        Command::new(&self.config.binary)
            .arg("--help")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .is_ok()
    }
}

impl Transcribe for WhisperTranscriber {
    fn transcribe(&self, audio_path: &Path, language: &str) -> EngineResult<Vec<Word>> {
        if !audio_path.exists() {
            return Err(EngineError::Decode(format!(
                "audio file not found: {}",
                audio_path.display()
            )));
        }

        if self.config.model_path.as_os_str().is_empty() || !self.config.model_path.exists() {
            return Err(EngineError::ModelUnavailable(format!(
                "whisper model not found at {}",
                self.config.model_path.display()
            )));
        }

        info!(
            audio = %audio_path.display(),
            model = %self.config.model_path.display(),
            language,
            "Starting word-level transcription"
        );

        // --max-len 1 makes whisper.cpp emit one word per segment,
        // each with its own start/end offsets.
        let output = Command::new(&self.config.binary)
            .arg("-m")
            .arg(&self.config.model_path)
            .arg("-f")
            .arg(audio_path)
            .arg("--output-json")
            .arg("--max-len")
            .arg("1")
            .arg("-l")
            .arg(language)
            .arg("-t")
            .arg(self.config.threads.to_string())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .output()
            .map_err(|e| {
                EngineError::ModelUnavailable(format!(
                    "failed to run whisper-cpp ({}): {e}",
                    self.config.binary.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(stderr = %stderr, "whisper-cpp failed");
            return Err(EngineError::Transcribe(format!(
                "whisper-cpp exited with status {}: {}",
                output.status,
                stderr.chars().take(500).collect::<String>()
            )));
        }

        // whisper.cpp writes JSON output next to the input file
        let json_path = audio_path.with_extension("wav.json");
        let alt_json_path = audio_path.with_extension("json");

        let json_content = if json_path.exists() {
            std::fs::read_to_string(&json_path)?
        } else if alt_json_path.exists() {
            std::fs::read_to_string(&alt_json_path)?
        } else {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if stdout.trim().starts_with('{') || stdout.trim().starts_with('[') {
                stdout.to_string()
            } else {
                return Err(EngineError::Transcribe(
                    "whisper-cpp produced no JSON output".to_string(),
                ));
            }
        };

        debug!(json_len = json_content.len(), "Parsing whisper output");
        parse_whisper_words(&json_content)
    }
}

/// Parse whisper.cpp JSON output into timestamped words.
fn parse_whisper_words(json_str: &str) -> EngineResult<Vec<Word>> {
    // whisper.cpp JSON format (one word per segment under --max-len 1):
    // { "transcription": [ { "offsets": { "from": 0, "to": 300 },
    //                        "text": " 你" } ] }
    let value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| EngineError::Transcribe(format!("failed to parse whisper JSON: {e}")))?;

    let mut words = Vec::new();

    if let Some(transcription) = value.get("transcription").and_then(|v| v.as_array()) {
        for segment in transcription {
            let text = segment
                .get("text")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .trim()
                .to_string();

            let from_ms = segment
                .get("offsets")
                .and_then(|o| o.get("from"))
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            let to_ms = segment
                .get("offsets")
                .and_then(|o| o.get("to"))
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);

            words.push(Word {
                text,
                start: from_ms / 1000.0,
                end: to_ms / 1000.0,
            });
        }
    }

    Ok(words)
}
