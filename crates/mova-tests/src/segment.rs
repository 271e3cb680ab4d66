//! Integration tests for the segmentation pipeline.
//!
//! Exercises the full path from a WAV source through transcription,
//! dedup and clip export, using a scripted recognizer in place of the
//! whisper.cpp sidecar.

use mova_engine::{EngineResult, Segmenter, Transcribe, Word};
use mova_media::{read_clip, write_clip, AudioBuffer};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const RATE: u32 = 16_000;

// ── Helpers ────────────────────────────────────────────────────

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

/// A 2-second ramp so every slice has recognizable content.
fn write_source(dir: &Path) -> PathBuf {
    let samples: Vec<f32> = (0..RATE * 2).map(|i| (i % 100) as f32 / 200.0).collect();
    let path = dir.join("take.wav");
    write_clip(&path, &AudioBuffer::new(RATE, samples)).unwrap();
    path
}

// ── Segmentation end to end ────────────────────────────────────

#[test]
fn segmentation_writes_one_clip_per_accepted_word() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path());

    let recognizer = ScriptedRecognizer(vec![
        word("你", 0.0, 0.3),
        word("你", 0.05, 0.35), // duplicate recognition
        word("好", 0.4, 0.7),
        word("  ", 0.8, 0.9), // blank recognition
    ]);
    let segmenter = Segmenter::new(recognizer, "zh");
    let out_dir = dir.path().join("clips");

    let outcome = segmenter.segment(&source, &out_dir, |_, _| {}).unwrap();
    assert!(!outcome.resumed);
    assert_eq!(outcome.clips.len(), 2);
    assert_eq!(outcome.clip_dir, out_dir.join("take"));

    for clip in &outcome.clips {
        assert!(clip.file_path.exists(), "{} missing", clip.file_path.display());
        let audio = read_clip(&clip.file_path).unwrap();
        assert!((audio.duration() - clip.duration()).abs() < 0.01);
    }
}

#[test]
fn clip_names_are_stable_across_runs() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path());
    let words = vec![word("你", 0.0, 0.3), word("好", 0.4, 0.7)];

    let first = Segmenter::new(ScriptedRecognizer(words.clone()), "zh")
        .segment(&source, &dir.path().join("a"), |_, _| {})
        .unwrap();
    let second = Segmenter::new(ScriptedRecognizer(words), "zh")
        .segment(&source, &dir.path().join("b"), |_, _| {})
        .unwrap();

    let names = |o: &mova_engine::SegmentOutcome| {
        o.clips.iter().map(|c| c.id.clone()).collect::<Vec<_>>()
    };
    assert_eq!(names(&first), names(&second));
}

#[test]
fn progress_reaches_total_exactly() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path());
    let recognizer = ScriptedRecognizer(vec![
        word("一", 0.0, 0.3),
        word("二", 0.4, 0.7),
        word("三", 0.8, 1.1),
    ]);

    let mut calls = Vec::new();
    Segmenter::new(recognizer, "zh")
        .segment(&source, &dir.path().join("clips"), |done, total| {
            calls.push((done, total))
        })
        .unwrap();

    assert_eq!(calls, vec![(1, 3), (2, 3), (3, 3)]);
}

#[test]
fn populated_directory_resumes_without_transcribing() {
    struct PanickingRecognizer;
    impl Transcribe for PanickingRecognizer {
        fn transcribe(&self, _path: &Path, _language: &str) -> EngineResult<Vec<Word>> {
            panic!("resume must not transcribe");
        }
    }

    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path());

    let clip_dir = dir.path().join("clips/take");
    std::fs::create_dir_all(&clip_dir).unwrap();
    write_clip(&clip_dir.join("old.wav"), &AudioBuffer::silent(RATE, 0.1)).unwrap();

    let outcome = Segmenter::new(PanickingRecognizer, "zh")
        .segment(&source, &dir.path().join("clips"), |_, _| {})
        .unwrap();
    assert!(outcome.resumed);
    assert!(outcome.clips.is_empty());
}

#[test]
fn failed_run_publishes_nothing() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path());
    // The second word lies past the end of the 2s source, so its
    // slice fails after the first clip was already staged.
    let recognizer = ScriptedRecognizer(vec![word("你", 0.0, 0.3), word("好", 5.0, 5.3)]);

    let out_dir = dir.path().join("clips");
    let result = Segmenter::new(recognizer, "zh").segment(&source, &out_dir, |_, _| {});
    assert!(result.is_err());
    assert!(!out_dir.join("take").exists());
    assert!(!out_dir.join(".take.partial").exists());
}
