use serde::{Deserialize, Serialize};

/// Default focus session length in minutes.
pub const DEFAULT_FOCUS_MIN: u64 = 25;
/// Default break session length in minutes.
pub const DEFAULT_BREAK_MIN: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Focus,
    Break,
}

impl SessionKind {
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Focus => "Focus",
            SessionKind::Break => "Break",
        }
    }
}

/// Per-session countdown state.
///
/// `initial_time_ms` is always `duration_min * 60_000`; `time_left_ms` stays
/// within `0..=initial_time_ms` except transiently between completion
/// detection and reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTimer {
    pub(crate) time_left_ms: u64,
    pub(crate) duration_min: u64,
    pub(crate) initial_time_ms: u64,
}

impl SessionTimer {
    /// Create a fresh session of `duration_min` minutes.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn new(duration_min: u64) -> Self {
        let initial = duration_min.saturating_mul(60).saturating_mul(1000);
        Self {
            time_left_ms: initial,
            duration_min,
            initial_time_ms: initial,
        }
    }

    pub fn time_left_ms(&self) -> u64 {
        self.time_left_ms
    }

    pub fn duration_min(&self) -> u64 {
        self.duration_min
    }

    pub fn initial_time_ms(&self) -> u64 {
        self.initial_time_ms
    }

    /// 0.0 .. 1.0 elapsed fraction of the current countdown.
    pub fn progress(&self) -> f64 {
        if self.initial_time_ms == 0 {
            return 0.0;
        }
        let elapsed = self.initial_time_ms.saturating_sub(self.time_left_ms);
        (elapsed as f64 / self.initial_time_ms as f64).clamp(0.0, 1.0)
    }

    /// Restore the countdown to its nominal length.
    pub(crate) fn reset(&mut self) {
        self.time_left_ms = self.initial_time_ms;
    }

    /// Replace the nominal length, restarting the countdown.
    pub(crate) fn set_duration(&mut self, duration_min: u64) {
        let initial = duration_min.saturating_mul(60).saturating_mul(1000);
        self.duration_min = duration_min;
        self.initial_time_ms = initial;
        self.time_left_ms = initial;
    }

    /// Lengthen both the remaining and nominal time, preserving elapsed time.
    pub(crate) fn extend(&mut self, minutes: u64) {
        let added = minutes.saturating_mul(60).saturating_mul(1000);
        self.time_left_ms = self.time_left_ms.saturating_add(added);
        self.initial_time_ms = self.initial_time_ms.saturating_add(added);
    }
}
