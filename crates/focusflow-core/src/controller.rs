//! Command surface tying the timer engine to the audio engine.
//!
//! The controller owns both engines plus the sound settings, and is the
//! single writer for all of them. Within every command and tick, timer
//! state is mutated first and audio side effects are issued after, so an
//! observer reading a snapshot never sees audio inconsistent with session
//! state. The countdown path never waits on a fade; only the explicit
//! sound-switch path does.

use tracing::warn;

use crate::audio::{AmbientSource, AmbientTarget, AudioEngine, SoundCatalog};
use crate::events::Event;
use crate::timer::{SessionKind, Snapshot, TimerEngine};

pub struct Controller {
    engine: TimerEngine,
    audio: AudioEngine,
    catalog: SoundCatalog,
    sound_enabled: bool,
    selected_sound: String,
}

impl Controller {
    pub fn new(catalog: SoundCatalog) -> Self {
        Self::with_engine(TimerEngine::new(), catalog)
    }

    pub fn with_engine(engine: TimerEngine, catalog: SoundCatalog) -> Self {
        let selected_sound = catalog.default_id().to_string();
        Self {
            engine,
            audio: AudioEngine::new(),
            catalog,
            sound_enabled: true,
            selected_sound,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn catalog(&self) -> &SoundCatalog {
        &self.catalog
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn selected_sound(&self) -> &str {
        &self.selected_sound
    }

    pub fn ambient(&self) -> &AmbientSource {
        self.audio.ambient()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn switch_view(&mut self, kind: SessionKind) {
        self.engine.switch_view(kind);
    }

    pub async fn start(&mut self, now_ms: u64) -> Option<Event> {
        let event = self.engine.start(now_ms);
        if event.is_some() && self.sound_enabled {
            self.play_selected().await;
        }
        event
    }

    pub fn pause(&mut self, now_ms: u64) -> Option<Event> {
        let event = self.engine.pause(now_ms);
        if event.is_some() {
            self.audio.stop_ambient();
        }
        event
    }

    pub async fn toggle(&mut self, now_ms: u64) -> Option<Event> {
        if self.engine.active_mode() == Some(self.engine.view_mode()) {
            self.pause(now_ms)
        } else {
            self.start(now_ms).await
        }
    }

    pub fn reset(&mut self, now_ms: u64) -> Option<Event> {
        let event = self.engine.reset(now_ms);
        self.audio.stop_ambient();
        event
    }

    pub fn reset_cycle(&mut self) -> Option<Event> {
        let event = self.engine.reset_cycle();
        self.audio.stop_ambient();
        event
    }

    pub fn acknowledge_cycle_complete(&mut self) {
        self.engine.acknowledge_cycle_complete();
    }

    pub fn add_minutes(&mut self, minutes: u64) -> Option<Event> {
        self.engine.add_minutes(minutes)
    }

    pub fn set_custom_duration(&mut self, input: &str, now_ms: u64) -> Option<Event> {
        let was_active_view = self.engine.active_mode() == Some(self.engine.view_mode());
        let event = self.engine.set_custom_duration(input, now_ms)?;
        // A valid duration paused the viewed countdown; stop its bed too.
        if was_active_view {
            self.audio.stop_ambient();
        }
        Some(event)
    }

    pub fn complete_now(&mut self, now_ms: u64) {
        self.engine.complete_now(now_ms);
    }

    /// Enable or disable all sound. Disabling fades the current bed out;
    /// enabling mid-session starts the selected bed.
    pub async fn set_sound_enabled(&mut self, enabled: bool) {
        if self.sound_enabled == enabled {
            return;
        }
        self.sound_enabled = enabled;
        if !enabled {
            self.audio.stop_ambient();
        } else if self.engine.is_running() {
            self.play_selected().await;
        }
    }

    /// Select a sound by catalog id. Unknown ids are rejected.
    ///
    /// While a session is running with sound on, the bed is switched live:
    /// the outgoing bed's fade is awaited before the new one starts.
    pub async fn set_selected_sound(&mut self, id: &str) -> bool {
        let Some(effect) = self.catalog.get(id) else {
            warn!(id, "unknown sound id");
            return false;
        };
        let target = match &effect.path {
            None => AmbientTarget::Noise,
            Some(path) => AmbientTarget::File(path.clone()),
        };
        self.selected_sound = id.to_string();
        if self.engine.is_running() && self.sound_enabled {
            self.audio.switch_ambient(target).await;
        }
        true
    }

    /// Select the next catalog entry after the current one, wrapping.
    /// Returns the newly selected id.
    pub async fn select_next_sound(&mut self) -> Option<String> {
        let next = self.catalog.next_after(&self.selected_sound)?.id.clone();
        self.set_selected_sound(&next).await;
        Some(next)
    }

    /// Advance the countdown; called by the scheduler at a fixed period.
    ///
    /// On completion the chime fires (if sound is on) and the ambient bed
    /// fades out, both fire-and-forget: ticking never blocks on audio.
    pub fn tick(&mut self, now_ms: u64) -> Option<Event> {
        let event = self.engine.tick(now_ms)?;
        if self.sound_enabled {
            self.audio.play_completion_chime();
        }
        self.audio.stop_ambient();
        Some(event)
    }

    async fn play_selected(&mut self) {
        let Some(effect) = self.catalog.get(&self.selected_sound) else {
            warn!(id = %self.selected_sound, "selected sound missing from catalog");
            return;
        };
        match &effect.path {
            None => self.audio.play_ambient_noise(),
            Some(path) => {
                let path = path.clone();
                self.audio.play_ambient_file(&path).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn start_with_sound_brings_up_default_bed() {
        let mut controller = Controller::new(SoundCatalog::builtin());
        controller.start(0).await;
        assert_eq!(*controller.ambient(), AmbientSource::Noise);
    }

    #[tokio::test]
    async fn muted_start_stays_silent() {
        let mut controller = Controller::new(SoundCatalog::builtin());
        controller.set_sound_enabled(false).await;
        controller.start(0).await;
        assert_eq!(*controller.ambient(), AmbientSource::None);
    }

    #[tokio::test]
    async fn pause_stops_the_bed() {
        let mut controller = Controller::new(SoundCatalog::builtin());
        controller.start(0).await;
        controller.pause(1_000);
        assert_eq!(*controller.ambient(), AmbientSource::None);
    }

    #[tokio::test]
    async fn completion_tick_stops_the_bed() {
        let mut controller = Controller::new(SoundCatalog::builtin());
        controller.start(0).await;
        let event = controller.tick(25 * 60 * 1000);
        assert!(matches!(event, Some(Event::SessionCompleted { .. })));
        assert_eq!(*controller.ambient(), AmbientSource::None);
    }

    #[tokio::test]
    async fn unknown_sound_id_is_rejected() {
        let mut controller = Controller::new(SoundCatalog::builtin());
        assert!(!controller.set_selected_sound("nope").await);
        assert_eq!(controller.selected_sound(), "rain");
    }

    #[tokio::test]
    async fn selecting_while_idle_does_not_play() {
        let mut controller = Controller::new(SoundCatalog::builtin());
        assert!(controller.set_selected_sound("rain").await);
        assert_eq!(*controller.ambient(), AmbientSource::None);
    }

    #[tokio::test]
    async fn muting_mid_session_fades_bed_out() {
        let mut controller = Controller::new(SoundCatalog::builtin());
        controller.start(0).await;
        controller.set_sound_enabled(false).await;
        assert_eq!(*controller.ambient(), AmbientSource::None);
        controller.set_sound_enabled(true).await;
        assert_eq!(*controller.ambient(), AmbientSource::Noise);
    }

    #[tokio::test]
    async fn custom_duration_mid_session_stops_bed() {
        let mut controller = Controller::new(SoundCatalog::builtin());
        controller.start(0).await;
        assert!(controller.set_custom_duration("30", 1_000).is_some());
        assert!(!controller.engine().is_running());
        assert_eq!(*controller.ambient(), AmbientSource::None);
    }
}
