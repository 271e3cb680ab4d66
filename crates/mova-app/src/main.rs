//! MovaType - movable-type audio studio
//!
//! Command-line entry point. `segment` slices a recording into word
//! clips; `compose` lays a clip directory end to end and exports the
//! mix. The interactive editing surface drives [`EditSession`]
//! directly.

mod session;
mod transport;

use anyhow::{bail, Context, Result};
use mova_engine::JobEvent;
use session::EditSession;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    mova_media::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("segment") => {
            let source = PathBuf::from(args.get(1).context(USAGE)?);
            let output_dir = args
                .get(2)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("clips"));
            let language = args.get(3).map(String::as_str).unwrap_or("zh");
            run_segment(source, output_dir, language)
        }
        Some("compose") => {
            let clips_dir = PathBuf::from(args.get(1).context(USAGE)?);
            let output = PathBuf::from(args.get(2).context(USAGE)?);
            run_compose(&clips_dir, &output)
        }
        _ => bail!(USAGE),
    }
}

const USAGE: &str = "usage: mova segment <input> [out_dir] [language]\n       mova compose <clips_dir> <out.wav|out.mp3>";

fn run_segment(source: PathBuf, output_dir: PathBuf, language: &str) -> Result<()> {
    let mut session = EditSession::new();
    let rx = session.start_segmentation(source, output_dir, language)?;

    for event in rx.iter() {
        match event {
            JobEvent::Progress(pct) => info!("segmenting: {pct}%"),
            JobEvent::Finished(outcome) => {
                if outcome.resumed {
                    info!(
                        dir = %outcome.clip_dir.display(),
                        "clip directory already populated, nothing to do"
                    );
                } else {
                    info!(
                        clips = outcome.clips.len(),
                        dir = %outcome.clip_dir.display(),
                        "segmentation finished"
                    );
                }
                return Ok(());
            }
            JobEvent::Failed(message) => bail!("segmentation failed: {message}"),
        }
    }
    bail!("segmentation worker exited without a result")
}

fn run_compose(clips_dir: &Path, output: &Path) -> Result<()> {
    let mut clips: Vec<PathBuf> = std::fs::read_dir(clips_dir)
        .with_context(|| format!("failed to read {}", clips_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|e| e.eq_ignore_ascii_case("wav")))
        .collect();
    clips.sort();
    if clips.is_empty() {
        bail!("no .wav clips in {}", clips_dir.display());
    }

    // Lay the clips end to end on the first lane.
    let mut session = EditSession::new();
    let mut cursor = 0.0;
    for clip in &clips {
        let id = session
            .place_clip(clip, 0, cursor)
            .with_context(|| format!("could not place {}", clip.display()))?;
        if let Some(block) = session.timeline().block(id) {
            cursor = block.start_time + block.duration;
        }
    }

    session.export(output)?;
    info!(clips = clips.len(), out = %output.display(), "composed mix");
    Ok(())
}
