//! Display-only time↔pixel mapping.
//!
//! Zoom never changes block times; it scales the horizontal
//! projection. The control range maps logarithmically so each slider
//! step feels like the same relative change.

/// Minimum pixels per second.
pub const MIN_PPS: f64 = 20.0;
/// Maximum pixels per second.
pub const MAX_PPS: f64 = 800.0;
/// Default pixels per second.
pub const DEFAULT_PPS: f64 = 100.0;

/// Current zoom level as a pixels-per-second scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    pps: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self { pps: DEFAULT_PPS }
    }
}

impl ZoomState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pixels per second.
    #[inline]
    pub fn pixels_per_second(&self) -> f64 {
        self.pps
    }

    /// Set from a linear control position in `0..=100`, interpolated
    /// logarithmically between the scale bounds.
    pub fn set_control(&mut self, value: u8) {
        let v = f64::from(value.min(100)) / 100.0;
        self.pps = (MIN_PPS.ln() + (MAX_PPS.ln() - MIN_PPS.ln()) * v).exp();
    }

    /// Control position `0..=100` corresponding to the current scale.
    pub fn control(&self) -> u8 {
        let v = (self.pps.ln() - MIN_PPS.ln()) / (MAX_PPS.ln() - MIN_PPS.ln());
        (v * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// Scale by `factor`, clamped into bounds. Returns the factor
    /// actually applied so a viewport can recenter by the same amount.
    pub fn rescale(&mut self, factor: f64) -> f64 {
        let before = self.pps;
        self.pps = (self.pps * factor).clamp(MIN_PPS, MAX_PPS);
        self.pps / before
    }

    /// Horizontal pixel position of a time.
    #[inline]
    pub fn time_to_x(&self, time: f64) -> f64 {
        time * self.pps
    }

    /// Time at a horizontal pixel position.
    #[inline]
    pub fn x_to_time(&self, x: f64) -> f64 {
        x / self.pps
    }

    /// Display width of a duration.
    #[inline]
    pub fn width(&self, duration: f64) -> f64 {
        duration * self.pps
    }

    /// New scroll offset that keeps the time at the viewport center
    /// fixed across a scale change of `applied` (from [`rescale`]).
    ///
    /// [`rescale`]: ZoomState::rescale
    pub fn recenter(scroll_x: f64, viewport_width: f64, applied: f64) -> f64 {
        let center = scroll_x + viewport_width / 2.0;
        (center * applied - viewport_width / 2.0).max(0.0)
    }
}

/// Format seconds as `mm:ss.mmm` for the ruler and time label.
pub fn format_clock(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    let millis = ((seconds - seconds.floor()) * 1000.0).floor() as u64;
    format!("{mins:02}:{secs:02}.{millis:03}")
}
