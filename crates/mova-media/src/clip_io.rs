//! Reading and writing the word-clip WAV format.
//!
//! Clips are mono 16-bit PCM WAV files, one per accepted word. They
//! are written once by the segmenter and never mutated afterwards.

use crate::buffer::AudioBuffer;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use mova_core::{MovaError, Result};
use std::path::Path;

/// Write a mono buffer as a 16-bit PCM WAV file.
pub fn write_clip(path: &Path, buffer: &AudioBuffer) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)
        .map_err(|e| MovaError::Encoder(format!("{}: {e}", path.display())))?;
    for &sample in &buffer.samples {
        let clamped = sample.clamp(-1.0, 1.0);
        let value = (clamped * i16::MAX as f32) as i16;
        writer
            .write_sample(value)
            .map_err(|e| MovaError::Encoder(format!("{}: {e}", path.display())))?;
    }
    writer
        .finalize()
        .map_err(|e| MovaError::Encoder(format!("{}: {e}", path.display())))?;
    Ok(())
}

/// Read a clip file back into a mono f32 buffer.
///
/// Multi-channel files are downmixed by averaging; both integer and
/// float sample formats are accepted.
pub fn read_clip(path: &Path) -> Result<AudioBuffer> {
    let mut reader = WavReader::open(path)
        .map_err(|e| MovaError::Decoder(format!("{}: {e}", path.display())))?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| MovaError::Decoder(format!("{}: {e}", path.display())))?,
        SampleFormat::Int => {
            let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max))
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| MovaError::Decoder(format!("{}: {e}", path.display())))?
        }
    };

    let samples = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    Ok(AudioBuffer::new(spec.sample_rate, samples))
}

/// Probe a clip's duration in seconds without decoding its samples.
pub fn probe_clip_duration(path: &Path) -> Result<f64> {
    let reader = WavReader::open(path)
        .map_err(|e| MovaError::Decoder(format!("{}: {e}", path.display())))?;
    let spec = reader.spec();
    let frames = reader.duration() as f64;
    Ok(frames / spec.sample_rate as f64)
}
