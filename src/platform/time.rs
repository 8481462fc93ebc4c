//! Frame timing
//!
//! Turns monotonic frame timestamps into simulation deltas.

/// Monotonic milliseconds for the session clock
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Monotonic milliseconds since first call
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Delta-time source for the frame loop.
///
/// The first frame after `reset` has no previous timestamp and yields a zero
/// delta instead of the time since the page loaded.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame; the next delta will be zero
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Seconds since the previous frame (never negative)
    pub fn delta_secs(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(prev) => ((now_ms - prev).max(0.0) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    pub fn last_frame_ms(&self) -> Option<f64> {
        self.last_ms
    }
}
