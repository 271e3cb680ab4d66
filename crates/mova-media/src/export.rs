//! Export of rendered waveforms.
//!
//! The output container is chosen by the target path's extension:
//! `.wav` is written directly, `.mp3` is encoded through FFmpeg with
//! raw PCM piped over stdin. Anything else is rejected.

use crate::buffer::AudioBuffer;
use crate::clip_io::write_clip;
use mova_core::{MovaError, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::info;

/// Supported export containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportTarget {
    Wav,
    Mp3,
}

impl ExportTarget {
    /// Select the target container from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("wav") => Ok(Self::Wav),
            Some("mp3") => Ok(Self::Mp3),
            other => Err(MovaError::UnsupportedFormat(format!(
                "unsupported export extension {:?} (expected .wav or .mp3)",
                other.unwrap_or("")
            ))),
        }
    }
}

/// Export a rendered buffer to `path`, container chosen by extension.
///
/// On failure nothing is left at the target path for the mp3 branch;
/// the wav branch relies on hound's create-then-finalize behavior.
pub fn export_buffer(path: &Path, buffer: &AudioBuffer) -> Result<()> {
    let target = ExportTarget::from_path(path)?;
    info!(target = ?target, path = %path.display(), "Exporting mix");
    match target {
        ExportTarget::Wav => write_clip(path, buffer),
        ExportTarget::Mp3 => export_mp3(path, buffer),
    }
}

fn export_mp3(path: &Path, buffer: &AudioBuffer) -> Result<()> {
    let mut child = Command::new("ffmpeg")
        .args([
            "-y",
            "-f",
            "f32le",
            "-ac",
            "1",
            "-ar",
            &buffer.sample_rate.to_string(),
            "-i",
            "pipe:0",
            "-codec:a",
            "libmp3lame",
            "-qscale:a",
            "2",
        ])
        .arg(path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| MovaError::Encoder(format!("failed to spawn ffmpeg: {e}")))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| MovaError::Encoder("failed to open ffmpeg stdin".into()))?;

    let mut bytes = Vec::with_capacity(buffer.samples.len() * 4);
    for sample in &buffer.samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    stdin
        .write_all(&bytes)
        .map_err(|e| MovaError::Encoder(format!("failed to write samples: {e}")))?;
    drop(stdin);

    let status = child
        .wait()
        .map_err(|e| MovaError::Encoder(format!("failed to wait for ffmpeg: {e}")))?;
    if !status.success() {
        let _ = std::fs::remove_file(path);
        return Err(MovaError::Encoder(format!(
            "ffmpeg exited with status: {status}"
        )));
    }
    Ok(())
}

/// Resolve a temp path for preview playback next to the system temp dir.
pub fn preview_temp_path() -> PathBuf {
    std::env::temp_dir().join("mova_preview.wav")
}
