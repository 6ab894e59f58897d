//! Timer engine implementation.
//!
//! The timer engine is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()`
//! periodically with the current epoch time. Remaining time is always
//! derived from an absolute end timestamp, never decremented, so irregular
//! tick scheduling accumulates zero drift.
//!
//! ## State Transitions
//!
//! ```text
//! Focus idle -> Focus running -> Break idle -> Break running -> cycle complete
//! ```
//!
//! Focus completion auto-advances the view to Break but never auto-starts
//! it; break completion ends the cycle and waits for an explicit reset.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::session::{SessionKind, SessionTimer, DEFAULT_BREAK_MIN, DEFAULT_FOCUS_MIN};
use crate::events::Event;

/// Fixed tick period the scheduler is expected to drive, in milliseconds.
pub const TICK_PERIOD_MS: u64 = 50;

/// Starting a session with this much time (or less) left restarts it fresh.
const RESTART_EPSILON_MS: u64 = 1_000;

/// Core timer engine.
///
/// Two named sessions, one view mode, at most one active countdown. The
/// active countdown is fully described by `end_epoch_ms`; session
/// `time_left_ms` is a cache written by `tick()` for the rendering layer.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    focus_session: SessionTimer,
    break_session: SessionTimer,
    view_mode: SessionKind,
    active_mode: Option<SessionKind>,
    /// Absolute epoch-ms instant the active countdown reaches zero.
    /// `Some` exactly when `active_mode` is `Some`.
    end_epoch_ms: Option<u64>,
    total_focus_min: u64,
    cycle_completed: bool,
}

/// Pull-based state snapshot of the viewed session, for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub view_mode: SessionKind,
    pub active_mode: Option<SessionKind>,
    pub time_left_ms: u64,
    pub duration_min: u64,
    pub initial_time_ms: u64,
    pub progress: f64,
    pub total_focus_min: u64,
    pub cycle_completed: bool,
    pub at: chrono::DateTime<Utc>,
}

impl TimerEngine {
    /// Create an engine with the default 25/5 minute sessions.
    pub fn new() -> Self {
        Self::with_durations(DEFAULT_FOCUS_MIN, DEFAULT_BREAK_MIN)
    }

    pub fn with_durations(focus_min: u64, break_min: u64) -> Self {
        Self {
            focus_session: SessionTimer::new(focus_min),
            break_session: SessionTimer::new(break_min),
            view_mode: SessionKind::Focus,
            active_mode: None,
            end_epoch_ms: None,
            total_focus_min: 0,
            cycle_completed: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn view_mode(&self) -> SessionKind {
        self.view_mode
    }

    pub fn active_mode(&self) -> Option<SessionKind> {
        self.active_mode
    }

    pub fn is_running(&self) -> bool {
        self.active_mode.is_some()
    }

    pub fn end_epoch_ms(&self) -> Option<u64> {
        self.end_epoch_ms
    }

    pub fn total_focus_min(&self) -> u64 {
        self.total_focus_min
    }

    pub fn cycle_completed(&self) -> bool {
        self.cycle_completed
    }

    pub fn session(&self, kind: SessionKind) -> &SessionTimer {
        match kind {
            SessionKind::Focus => &self.focus_session,
            SessionKind::Break => &self.break_session,
        }
    }

    fn session_mut(&mut self, kind: SessionKind) -> &mut SessionTimer {
        match kind {
            SessionKind::Focus => &mut self.focus_session,
            SessionKind::Break => &mut self.break_session,
        }
    }

    /// Build a full state snapshot of the viewed session.
    pub fn snapshot(&self) -> Snapshot {
        let timer = self.session(self.view_mode);
        Snapshot {
            view_mode: self.view_mode,
            active_mode: self.active_mode,
            time_left_ms: timer.time_left_ms(),
            duration_min: timer.duration_min(),
            initial_time_ms: timer.initial_time_ms(),
            progress: timer.progress(),
            total_focus_min: self.total_focus_min,
            cycle_completed: self.cycle_completed,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Change which session is viewed/edited without touching the countdown.
    pub fn switch_view(&mut self, kind: SessionKind) {
        self.view_mode = kind;
    }

    /// Start (or restart) the viewed session's countdown.
    ///
    /// A session with at most one second left is treated as already
    /// finished and restarts from its nominal length.
    pub fn start(&mut self, now_ms: u64) -> Option<Event> {
        let kind = self.view_mode;
        let timer = self.session_mut(kind);
        if timer.time_left_ms() <= RESTART_EPSILON_MS {
            timer.reset();
        }
        let remaining = timer.time_left_ms();
        self.active_mode = Some(kind);
        self.end_epoch_ms = Some(now_ms.saturating_add(remaining));
        Some(Event::TimerStarted {
            kind,
            remaining_ms: remaining,
            at: Utc::now(),
        })
    }

    /// Stop the active countdown, keeping its remaining time.
    ///
    /// Remaining time is recomputed from the end timestamp rather than read
    /// from the last tick, so pausing between ticks loses nothing.
    pub fn pause(&mut self, now_ms: u64) -> Option<Event> {
        let kind = self.active_mode.take()?;
        let end = self.end_epoch_ms.take()?;
        let remaining = end.saturating_sub(now_ms);
        self.session_mut(kind).time_left_ms = remaining;
        Some(Event::TimerPaused {
            kind,
            remaining_ms: remaining,
            at: Utc::now(),
        })
    }

    /// Pause if the viewed session is the active one, otherwise start it.
    pub fn toggle(&mut self, now_ms: u64) -> Option<Event> {
        if self.active_mode == Some(self.view_mode) {
            self.pause(now_ms)
        } else {
            self.start(now_ms)
        }
    }

    /// Pause, then restore the viewed session to its nominal length.
    pub fn reset(&mut self, now_ms: u64) -> Option<Event> {
        let kind = self.view_mode;
        self.pause(now_ms);
        self.session_mut(kind).reset();
        Some(Event::TimerReset {
            kind,
            at: Utc::now(),
        })
    }

    /// Restore both sessions to their defaults and clear the cycle flag.
    pub fn reset_cycle(&mut self) -> Option<Event> {
        self.focus_session = SessionTimer::new(DEFAULT_FOCUS_MIN);
        self.break_session = SessionTimer::new(DEFAULT_BREAK_MIN);
        self.view_mode = SessionKind::Focus;
        self.active_mode = None;
        self.end_epoch_ms = None;
        self.total_focus_min = 0;
        self.cycle_completed = false;
        Some(Event::CycleReset { at: Utc::now() })
    }

    /// Clear the cycle-complete flag without resetting anything.
    pub fn acknowledge_cycle_complete(&mut self) {
        self.cycle_completed = false;
    }

    /// Lengthen the viewed session by `minutes`.
    ///
    /// If the viewed session is counting down, the deadline shifts by the
    /// same amount, preserving elapsed time instead of resetting progress.
    pub fn add_minutes(&mut self, minutes: u64) -> Option<Event> {
        let kind = self.view_mode;
        self.session_mut(kind).extend(minutes);
        if self.active_mode == Some(kind) {
            let added = minutes.saturating_mul(60).saturating_mul(1000);
            self.end_epoch_ms = self.end_epoch_ms.map(|end| end.saturating_add(added));
        }
        Some(Event::MinutesAdded {
            kind,
            added_min: minutes,
            at: Utc::now(),
        })
    }

    /// Replace the viewed session's duration from raw user input.
    ///
    /// Anything that is not a positive integer is silently rejected: state
    /// is unchanged and `None` is returned so the editing UI stays open.
    /// Valid input pauses the viewed session if it was counting down.
    pub fn set_custom_duration(&mut self, input: &str, now_ms: u64) -> Option<Event> {
        let minutes = match input.trim().parse::<i64>() {
            Ok(m) if m > 0 => m as u64,
            _ => return None,
        };
        let kind = self.view_mode;
        if self.active_mode == Some(kind) {
            self.pause(now_ms);
        }
        self.session_mut(kind).set_duration(minutes);
        Some(Event::DurationChanged {
            kind,
            duration_min: minutes,
            at: Utc::now(),
        })
    }

    /// Force the active session to its deadline; the next tick completes it.
    pub fn complete_now(&mut self, now_ms: u64) {
        if let Some(kind) = self.active_mode {
            self.session_mut(kind).time_left_ms = 0;
            self.end_epoch_ms = Some(now_ms);
        }
    }

    /// Advance the countdown. Call at a fixed period while running.
    ///
    /// Returns `Some` exactly once per completed session: the completion
    /// transition clears the active mode, so later ticks are no-ops until
    /// the next `start()`.
    pub fn tick(&mut self, now_ms: u64) -> Option<Event> {
        let kind = self.active_mode?;
        let end = self.end_epoch_ms?;
        let remaining = end.saturating_sub(now_ms);
        if remaining > 0 {
            self.session_mut(kind).time_left_ms = remaining;
            return None;
        }

        // Completion transition. State is fully settled before the caller
        // sees the event and issues any audio side effects.
        if kind == SessionKind::Focus {
            self.total_focus_min += self.focus_session.initial_time_ms() / 60_000;
        }
        self.session_mut(kind).reset();
        self.active_mode = None;
        self.end_epoch_ms = None;

        match kind {
            SessionKind::Focus => {
                // Auto-advance the view to Break, but never auto-start it.
                self.view_mode = SessionKind::Break;
                Some(Event::SessionCompleted {
                    kind,
                    total_focus_min: self.total_focus_min,
                    at: Utc::now(),
                })
            }
            SessionKind::Break => {
                self.cycle_completed = true;
                Some(Event::CycleCompleted {
                    total_focus_min: self.total_focus_min,
                    at: Utc::now(),
                })
            }
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}
