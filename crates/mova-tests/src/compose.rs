//! End-to-end test: segment a source, arrange clips, render the mix.

use mova_audio::{ClipCache, CompositionEngine, TAIL_SECONDS};
use mova_engine::{EngineResult, Segmenter, Transcribe, Word};
use mova_media::{read_clip, write_clip, AudioBuffer};
use mova_timeline::TimelineModel;
use std::path::Path;
use tempfile::TempDir;

const RATE: u32 = 16_000;

struct ScriptedRecognizer(Vec<Word>);

impl Transcribe for ScriptedRecognizer {
    fn transcribe(&self, _path: &Path, _language: &str) -> EngineResult<Vec<Word>> {
        Ok(self.0.clone())
    }
}

fn word(text: &str, start: f64, end: f64) -> Word {
    Word {
        text: text.into(),
        start,
        end,
    }
}

#[test]
fn segmented_clips_flow_into_a_rendered_mix() {
    let dir = TempDir::new().unwrap();

    // A 1s source with distinct levels in each word's interval.
    let samples: Vec<f32> = (0..RATE)
        .map(|i| if i < RATE / 2 { 0.2 } else { 0.4 })
        .collect();
    let source = dir.path().join("take.wav");
    write_clip(&source, &AudioBuffer::new(RATE, samples)).unwrap();

    let recognizer = ScriptedRecognizer(vec![word("你", 0.0, 0.5), word("好", 0.5, 1.0)]);
    let outcome = Segmenter::new(recognizer, "zh")
        .segment(&source, &dir.path().join("clips"), |_, _| {})
        .unwrap();
    assert_eq!(outcome.clips.len(), 2);

    // Arrange the two words in reverse order, back to back.
    let mut timeline = TimelineModel::new();
    timeline
        .place(&outcome.clips[1].file_path, 0, 0.0, outcome.clips[1].duration())
        .unwrap();
    timeline
        .place(&outcome.clips[0].file_path, 0, 0.5, outcome.clips[0].duration())
        .unwrap();

    let engine = CompositionEngine::default();
    let mix = engine.render(&timeline, &ClipCache::new()).unwrap();
    assert!((mix.duration() - (1.0 + TAIL_SECONDS)).abs() < 1e-2);

    // "好" (level 0.4) now plays first, "你" (level 0.2) second.
    let rate = mix.sample_rate as f64;
    assert!((mix.samples[(0.25 * rate) as usize] - 0.4).abs() < 0.02);
    assert!((mix.samples[(0.75 * rate) as usize] - 0.2).abs() < 0.02);

    // And the mix survives an export round trip.
    let out = dir.path().join("mix.wav");
    mova_media::export_buffer(&out, &mix).unwrap();
    let back = read_clip(&out).unwrap();
    assert_eq!(back.len(), mix.len());
}

#[test]
fn stacked_words_sum_in_the_mix() {
    let dir = TempDir::new().unwrap();
    let clip = dir.path().join("word.wav");
    write_clip(&clip, &AudioBuffer::new(RATE, vec![0.25; RATE as usize / 2])).unwrap();

    let mut timeline = TimelineModel::new();
    timeline.place(&clip, 0, 0.0, 0.5).unwrap();
    timeline.place(&clip, 1, 0.0, 0.5).unwrap();
    timeline.place(&clip, 2, 0.0, 0.5).unwrap();

    let mix = CompositionEngine::default()
        .render(&timeline, &ClipCache::new())
        .unwrap();
    let mid = (0.25 * mix.sample_rate as f64) as usize;
    assert!((mix.samples[mid] - 0.75).abs() < 0.02);
}
