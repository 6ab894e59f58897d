//! Periodic callback facility.
//!
//! The engines never spawn their own timers; whoever owns them registers a
//! periodic callback here and forwards ticks. Keeping the wake-up source
//! external is what lets tests drive the engines with a simulated clock.

use std::time::Duration;

use tokio::task::AbortHandle;

use crate::timer::TICK_PERIOD_MS;

/// The period both the countdown tick and the fade steps run at.
pub const TICK_PERIOD: Duration = Duration::from_millis(TICK_PERIOD_MS);

/// Handle to a registered periodic callback. Dropping it cancels the
/// registration.
pub struct PeriodicHandle {
    abort: AbortHandle,
}

impl PeriodicHandle {
    /// Cancel the registration; no further callbacks fire.
    pub fn cancel(self) {}
}

impl Drop for PeriodicHandle {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

/// Invoke `callback` every `period` until the returned handle is cancelled
/// or dropped.
pub fn register_periodic<F>(period: Duration, mut callback: F) -> PeriodicHandle
where
    F: FnMut() + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            callback();
        }
    });
    PeriodicHandle {
        abort: task.abort_handle(),
    }
}
