use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::SessionKind;

/// Every state transition in the engine produces an Event.
/// The rendering layer polls snapshots; events mark the transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        kind: SessionKind,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        kind: SessionKind,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        kind: SessionKind,
        at: DateTime<Utc>,
    },
    /// Both sessions restored to defaults, cycle flag cleared.
    CycleReset {
        at: DateTime<Utc>,
    },
    MinutesAdded {
        kind: SessionKind,
        added_min: u64,
        at: DateTime<Utc>,
    },
    DurationChanged {
        kind: SessionKind,
        duration_min: u64,
        at: DateTime<Utc>,
    },
    /// A focus session reached its deadline; the view advanced to Break.
    SessionCompleted {
        kind: SessionKind,
        total_focus_min: u64,
        at: DateTime<Utc>,
    },
    /// A break session reached its deadline, ending the cycle.
    CycleCompleted {
        total_focus_min: u64,
        at: DateTime<Utc>,
    },
}
