//! MovaType Media - audio I/O for the movable-type studio
//!
//! This crate handles:
//! - Decoding arbitrary audio/video containers to mono PCM (FFmpeg sidecar)
//! - Reading and writing the mono 16-bit WAV clip format (hound)
//! - Exporting rendered waveforms, with the container chosen by extension

pub mod buffer;
pub mod clip_io;
pub mod decode;
pub mod export;

pub use buffer::AudioBuffer;
pub use clip_io::{probe_clip_duration, read_clip, write_clip};
pub use decode::decode_source;
pub use export::{export_buffer, ExportTarget};

/// Initialize media support (call once at startup).
///
/// Logs a warning if no FFmpeg binary is reachable; decode and MP3
/// export will fail later with a decoder/encoder error in that case.
pub fn init() {
    if ffmpeg_sidecar::command::ffmpeg_is_installed() {
        tracing::info!("MovaType media initialized (ffmpeg found)");
    } else {
        tracing::warn!("ffmpeg not found on PATH; source decode and mp3 export unavailable");
    }
}
