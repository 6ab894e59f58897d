mod engine;
mod session;

pub use engine::{Snapshot, TimerEngine, TICK_PERIOD_MS};
pub use session::{SessionKind, SessionTimer, DEFAULT_BREAK_MIN, DEFAULT_FOCUS_MIN};

/// Current wall-clock time as milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
