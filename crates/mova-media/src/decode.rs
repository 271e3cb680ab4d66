//! Source decoding via FFmpeg sidecar.
//!
//! Any audio or video container FFmpeg understands is accepted; the
//! audio stream is downmixed to mono f32 at its native sample rate.

use crate::buffer::AudioBuffer;
use mova_core::{MovaError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Probe the sample rate of the primary audio stream.
fn probe_sample_rate(path: &Path) -> Result<u32> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "a:0",
            "-show_entries",
            "stream=sample_rate",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| MovaError::Decoder(format!("failed to run ffprobe: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MovaError::Decoder(format!(
            "ffprobe failed for {}: {}",
            path.display(),
            stderr.trim()
        )));
    }

    let text = String::from_utf8_lossy(&output.stdout);
    text.trim()
        .parse::<u32>()
        .map_err(|_| MovaError::Decoder(format!("no audio stream in {}", path.display())))
}

/// Decode a source file's audio stream to a mono f32 buffer.
///
/// WAV sources are read directly; everything else goes through the
/// FFmpeg sidecar.
pub fn decode_source(path: &Path) -> Result<AudioBuffer> {
    if !path.exists() {
        return Err(MovaError::NotFound(format!(
            "source file not found: {}",
            path.display()
        )));
    }

    if path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wav"))
    {
        return crate::clip_io::read_clip(path);
    }

    let sample_rate = probe_sample_rate(path)?;
    info!(source = %path.display(), sample_rate, "Decoding source audio");

    let output = Command::new("ffmpeg")
        .arg("-i")
        .arg(path)
        .args(["-vn", "-ac", "1", "-f", "f32le", "-acodec", "pcm_f32le", "pipe:1"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| MovaError::Decoder(format!("failed to run ffmpeg: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MovaError::Decoder(format!(
            "ffmpeg decode failed for {}: {}",
            path.display(),
            stderr.chars().take(500).collect::<String>()
        )));
    }

    let samples: Vec<f32> = output
        .stdout
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    debug!(samples = samples.len(), "Source decode complete");
    Ok(AudioBuffer::new(sample_rate, samples))
}
