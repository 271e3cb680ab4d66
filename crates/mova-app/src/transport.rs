//! Preview playback transport.
//!
//! The timeline mirrors an external player rather than driving one:
//! whatever actually plays the preview implements [`Transport`] and is
//! asked for its position and state on a fixed polling cadence. A
//! stopped report is terminal whether it came from natural completion
//! or from a player error.

use std::time::{Duration, Instant};

/// Minimum interval between playhead updates.
pub const POLL_INTERVAL: Duration = Duration::from_millis(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// One position report from the playback collaborator.
#[derive(Debug, Clone, Copy)]
pub struct TransportReport {
    pub state: PlaybackState,
    /// Seconds into the preview.
    pub position: f64,
}

/// Playback collaborator contract.
///
/// `now` is supplied by the poller so implementations that derive
/// their position from a clock stay deterministic under test; a
/// player that tracks its own position ignores it.
pub trait Transport {
    /// Begin playback of a preview of `duration` seconds, starting
    /// `origin` seconds into it.
    fn play(&mut self, origin: f64, duration: f64, now: Instant);

    fn stop(&mut self);

    /// Current position and state. Reporting `Stopped` covers both
    /// reaching the end of the preview and a playback error.
    fn report(&mut self, now: Instant) -> TransportReport;
}

/// Wall-clock [`Transport`] for headless runs: the position advances
/// in real time and playback stops at the end of the preview.
#[derive(Debug, Default)]
pub struct WallClockTransport {
    playing: Option<Playing>,
}

#[derive(Debug)]
struct Playing {
    origin: f64,
    duration: f64,
    started: Instant,
}

impl Transport for WallClockTransport {
    fn play(&mut self, origin: f64, duration: f64, now: Instant) {
        self.playing = Some(Playing {
            origin: origin.max(0.0),
            duration: duration.max(0.0),
            started: now,
        });
    }

    fn stop(&mut self) {
        self.playing = None;
    }

    fn report(&mut self, now: Instant) -> TransportReport {
        let Some(playing) = &self.playing else {
            return TransportReport {
                state: PlaybackState::Stopped,
                position: 0.0,
            };
        };
        let position = playing.origin + now.duration_since(playing.started).as_secs_f64();
        if position >= playing.duration {
            let end = playing.duration;
            self.playing = None;
            return TransportReport {
                state: PlaybackState::Stopped,
                position: end,
            };
        }
        TransportReport {
            state: PlaybackState::Playing,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_transport_reports_stopped() {
        let mut transport = WallClockTransport::default();
        let report = transport.report(Instant::now());
        assert_eq!(report.state, PlaybackState::Stopped);
    }

    #[test]
    fn test_report_tracks_elapsed_time() {
        let mut transport = WallClockTransport::default();
        let start = Instant::now();
        transport.play(1.0, 10.0, start);

        let report = transport.report(start + Duration::from_millis(500));
        assert_eq!(report.state, PlaybackState::Playing);
        assert!((report.position - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_playback_stops_at_end() {
        let mut transport = WallClockTransport::default();
        let start = Instant::now();
        transport.play(0.0, 0.5, start);

        let report = transport.report(start + Duration::from_secs(1));
        assert_eq!(report.state, PlaybackState::Stopped);
        assert!((report.position - 0.5).abs() < 1e-6);

        // The stop is terminal.
        let report = transport.report(start + Duration::from_secs(2));
        assert_eq!(report.state, PlaybackState::Stopped);
    }

    #[test]
    fn test_stop_discards_playback() {
        let mut transport = WallClockTransport::default();
        let start = Instant::now();
        transport.play(0.0, 10.0, start);
        transport.stop();

        let report = transport.report(start + Duration::from_millis(100));
        assert_eq!(report.state, PlaybackState::Stopped);
    }
}
