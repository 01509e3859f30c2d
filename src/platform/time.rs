//! Frame timing

use crate::consts::MAX_FRAME_DT_MS;

/// Turns absolute frame timestamps into simulation deltas.
///
/// Deltas are capped so a stalled tab or debugger pause doesn't dump seconds of
/// catch-up into one step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT_MS)
    }
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt: max_dt.max(0.0),
        }
    }

    /// Delta since the previous frame in ms. The first frame yields 0, and a
    /// timestamp going backwards yields 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let last = self.last_ms.replace(now_ms).unwrap_or(now_ms);
        ((now_ms - last).max(0.0) as f32).min(self.max_dt)
    }
}
