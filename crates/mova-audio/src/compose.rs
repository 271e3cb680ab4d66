//! Flattening a timeline into one rendered buffer.

use crate::cache::ClipCache;
use mova_media::AudioBuffer;
use mova_timeline::TimelineModel;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Silence appended after the last block, seconds.
pub const TAIL_SECONDS: f64 = 0.1;

#[derive(Debug, Error)]
pub enum ComposeError {
    /// Nothing placed; there is no arrangement to render.
    #[error("timeline is empty")]
    EmptyTimeline,

    /// A block's clip file could not be read.
    #[error("failed to decode clip {path}: {source}")]
    ClipDecode {
        path: PathBuf,
        #[source]
        source: mova_core::MovaError,
    },
}

pub type ComposeResult<T> = std::result::Result<T, ComposeError>;

/// Render parameters.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Output sample rate; clips at other rates are resampled.
    pub sample_rate: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { sample_rate: 44_100 }
    }
}

/// Deterministic additive-overlay renderer.
///
/// The output is silence spanning the arrangement extent plus
/// [`TAIL_SECONDS`], with every block's clip summed in at its start
/// offset. Overlapping blocks mix additively with no gain
/// compensation or clipping.
#[derive(Debug, Default)]
pub struct CompositionEngine {
    pub config: RenderConfig,
}

impl CompositionEngine {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Flatten the timeline into a single mono buffer.
    pub fn render(&self, timeline: &TimelineModel, cache: &ClipCache) -> ComposeResult<AudioBuffer> {
        if timeline.is_empty() {
            return Err(ComposeError::EmptyTimeline);
        }
        let rate = self.config.sample_rate;
        let total = timeline.extent() + TAIL_SECONDS;
        let mut out = AudioBuffer::silent(rate, total);

        for block in timeline.blocks() {
            let clip = cache.load(&block.clip_ref).map_err(|source| {
                ComposeError::ClipDecode {
                    path: block.clip_ref.clone(),
                    source,
                }
            })?;
            let clip = clip.resampled(rate);
            let offset = (block.start_time * rate as f64).floor() as usize;
            mix_at(&mut out.samples, &clip.samples, offset);
        }

        debug!(
            blocks = timeline.blocks().len(),
            duration = format_args!("{total:.3}s"),
            "rendered composition"
        );
        Ok(out)
    }
}

/// Add `src` into `dst` starting at `offset`, extending `dst` if the
/// source runs past its end.
fn mix_at(dst: &mut Vec<f32>, src: &[f32], offset: usize) {
    let needed = offset + src.len();
    if needed > dst.len() {
        dst.resize(needed, 0.0);
    }
    for (d, s) in dst[offset..needed].iter_mut().zip(src) {
        *d += s;
    }
}
