//! Integration tests for timeline arrangement and drag resolution.

use mova_core::TimeSpan;
use mova_timeline::{
    lane_rest_y, CommitOutcome, DragCandidate, TimelineModel, TRACK_HEIGHT, ZoomState,
};

// ── Helpers ────────────────────────────────────────────────────

fn arrangement() -> (TimelineModel, Vec<mova_timeline::BlockId>) {
    let mut timeline = TimelineModel::new();
    let ids = vec![
        timeline.place("clips/你_a1b2c3.wav", 0, 0.0, 0.3).unwrap(),
        timeline.place("clips/好_d4e5f6.wav", 0, 0.3, 0.3).unwrap(),
        timeline.place("clips/吗_778899.wav", 1, 0.1, 0.4).unwrap(),
    ];
    (timeline, ids)
}

// ── Arrangement invariants ─────────────────────────────────────

#[test]
fn extent_is_latest_block_end() {
    let (timeline, _) = arrangement();
    assert!((timeline.extent() - 0.6).abs() < 1e-9);
}

#[test]
fn drag_across_lanes_keeps_time() {
    let (mut timeline, ids) = arrangement();
    timeline.begin_drag(ids[2]);
    let outcome = timeline.commit_drag(
        ids[2],
        DragCandidate {
            start_time: 2.0,
            lane_y: 3.0 * TRACK_HEIGHT + 10.0,
        },
    );
    assert_eq!(outcome, CommitOutcome::Snapped(3));

    let block = timeline.block(ids[2]).unwrap();
    assert!((block.start_time - 2.0).abs() < 1e-9);
    assert_eq!(block.lane_y, lane_rest_y(3));
}

#[test]
fn reverted_drag_restores_committed_state() {
    let (mut timeline, ids) = arrangement();
    timeline.begin_drag(ids[2]);
    // Into the first lane on top of the first block.
    let outcome = timeline.commit_drag(
        ids[2],
        DragCandidate {
            start_time: 0.1,
            lane_y: lane_rest_y(0),
        },
    );
    assert_eq!(outcome, CommitOutcome::Reverted);

    let block = timeline.block(ids[2]).unwrap();
    assert_eq!(block.track(), 1);
    assert!((block.start_time - 0.1).abs() < 1e-9);
}

#[test]
fn paste_lands_on_lane_under_cursor() {
    let (mut timeline, ids) = arrangement();
    let clipboard = timeline.copy(ids[0]).unwrap();
    timeline.move_playhead(5.0);

    let id = timeline.paste(&clipboard, 4.0 * TRACK_HEIGHT + 30.0).unwrap();
    let block = timeline.block(id).unwrap();
    assert_eq!(block.track(), 4);
    assert!((block.start_time - 5.0).abs() < 1e-9);
    assert_eq!(block.clip_ref, timeline.block(ids[0]).unwrap().clip_ref);
}

#[test]
fn same_lane_blocks_have_disjoint_spans() {
    let (timeline, _) = arrangement();
    let blocks = timeline.blocks();
    for (i, a) in blocks.iter().enumerate() {
        for b in &blocks[i + 1..] {
            if a.track() != b.track() {
                continue;
            }
            let sa = TimeSpan::from_start_duration(a.start_time, a.duration);
            let sb = TimeSpan::from_start_duration(b.start_time, b.duration);
            assert!(!sa.overlaps(sb), "{sa} and {sb} share lane {}", a.track());
        }
    }
}

#[test]
fn deleting_a_block_frees_its_span() {
    let (mut timeline, ids) = arrangement();
    assert!(timeline.delete(ids[1]));
    assert!(timeline.place("clips/again.wav", 0, 0.3, 0.3).is_ok());
}

// ── Display mapping ────────────────────────────────────────────

#[test]
fn zoom_changes_pixels_not_times() {
    let (mut timeline, ids) = arrangement();
    let start = timeline.block(ids[1]).unwrap().start_time;

    let mut zoom = ZoomState::new();
    let x_before = zoom.time_to_x(start);
    zoom.rescale(4.0);
    let x_after = zoom.time_to_x(start);
    assert!((x_after - x_before * 4.0).abs() < 1e-9);

    // Model untouched by display scaling.
    timeline.zoom = zoom;
    assert!((timeline.block(ids[1]).unwrap().start_time - start).abs() < 1e-9);
}
