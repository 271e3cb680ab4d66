//! PCM audio buffers.
//!
//! All in-memory audio is mono f32. Clips keep the sample rate of the
//! source they were sliced from; the composition engine resamples at
//! render time if rates differ.

use mova_core::{MovaError, Result};

/// A mono PCM audio buffer.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Mono samples in `[-1.0, 1.0]`.
    pub samples: Vec<f32>,
}

impl AudioBuffer {
    /// Create a buffer from samples.
    pub fn new(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    /// Create a silent buffer covering `duration` seconds.
    pub fn silent(sample_rate: u32, duration: f64) -> Self {
        let len = (duration * sample_rate as f64).ceil() as usize;
        Self {
            sample_rate,
            samples: vec![0.0; len],
        }
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Slice out `[start, end)` seconds as a new buffer.
    ///
    /// The range is clamped to the buffer's extent; an inverted or
    /// fully out-of-range slice is an error.
    pub fn slice_seconds(&self, start: f64, end: f64) -> Result<AudioBuffer> {
        if end <= start || start < 0.0 {
            return Err(MovaError::InvalidParameter(format!(
                "invalid slice range [{start}, {end})"
            )));
        }
        let a = (start * self.sample_rate as f64).floor() as usize;
        let b = ((end * self.sample_rate as f64).floor() as usize).min(self.samples.len());
        if a >= b {
            return Err(MovaError::InvalidParameter(format!(
                "slice [{start}, {end}) outside buffer of {:.3}s",
                self.duration()
            )));
        }
        Ok(AudioBuffer {
            sample_rate: self.sample_rate,
            samples: self.samples[a..b].to_vec(),
        })
    }

    /// Linearly resample to `target_rate`. Returns a clone if the rate
    /// already matches.
    pub fn resampled(&self, target_rate: u32) -> AudioBuffer {
        if target_rate == self.sample_rate || self.samples.is_empty() {
            return AudioBuffer {
                sample_rate: target_rate,
                samples: self.samples.clone(),
            };
        }
        let ratio = self.sample_rate as f64 / target_rate as f64;
        let out_len = (self.samples.len() as f64 / ratio).floor() as usize;
        let mut out = Vec::with_capacity(out_len);
        for i in 0..out_len {
            let pos = i as f64 * ratio;
            let idx = pos.floor() as usize;
            let frac = (pos - idx as f64) as f32;
            let a = self.samples[idx];
            let b = *self.samples.get(idx + 1).unwrap_or(&a);
            out.push(a + (b - a) * frac);
        }
        AudioBuffer {
            sample_rate: target_rate,
            samples: out,
        }
    }
}
