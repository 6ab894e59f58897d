//! Ambient and alert audio playback.
//!
//! The engine owns the audio output stream and all playback sinks, and
//! enforces the one-ambient-bed-at-a-time rule: switching sources always
//! goes through a stop-then-start sequence, never a sink swap that leaves
//! two beds audible at once.
//!
//! A host without an audio device degrades silently: the ambient source
//! state machine keeps working (so callers and tests can reason about
//! which bed is selected) but nothing is played, and timer correctness is
//! never affected.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, warn};

use super::synth::{self, ChimeSweep};
use crate::error::AudioError;

/// Gain of the synthesized noise bed.
const NOISE_GAIN: f32 = 0.15;
/// Volume file-backed ambient sounds start at.
const FILE_VOLUME: f32 = 0.3;
/// Period of one fade step.
const FADE_STEP: Duration = Duration::from_millis(50);
/// Volume removed per step when fading a file bed out.
const FILE_FADE_STEP: f32 = 0.05;
/// Steps in the noise ramp-down (0.5 s total).
const NOISE_FADE_STEPS: u32 = 10;
/// Multiplier per noise ramp step; after ten steps the bed is inaudible.
const NOISE_FADE_FACTOR: f32 = 0.6;

/// Which ambient bed is currently selected/playing. At most one variant
/// other than `None` at any instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmbientSource {
    None,
    Noise,
    File { path: PathBuf },
}

/// Requested ambient bed for a switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmbientTarget {
    Noise,
    File(PathBuf),
}

struct Output {
    // Keeps the device stream alive; playback stops when this drops.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

pub struct AudioEngine {
    output: Option<Output>,
    output_failed: bool,
    ambient: AmbientSource,
    noise_sink: Option<Arc<Sink>>,
    file_sink: Option<Arc<Sink>>,
    /// Cancellation handle for the in-flight fade, if any.
    fade: Option<AbortHandle>,
}

impl AudioEngine {
    pub fn new() -> Self {
        Self {
            output: None,
            output_failed: false,
            ambient: AmbientSource::None,
            noise_sink: None,
            file_sink: None,
            fade: None,
        }
    }

    /// Which ambient bed is currently active.
    pub fn ambient(&self) -> &AmbientSource {
        &self.ambient
    }

    /// True once an output device has been opened.
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// Idempotently open the output device on first use.
    ///
    /// Failure is remembered and logged once; the engine then stays silent.
    pub fn ensure_output(&mut self) {
        if self.output.is_some() || self.output_failed {
            return;
        }
        match OutputStream::try_default() {
            Ok((stream, handle)) => {
                self.output = Some(Output {
                    _stream: stream,
                    handle,
                });
            }
            Err(err) => {
                warn!(error = %AudioError::from(err), "audio unavailable, continuing without sound");
                self.output_failed = true;
            }
        }
    }

    fn cancel_fade(&mut self) {
        if let Some(handle) = self.fade.take() {
            handle.abort();
        }
    }

    /// Start the synthesized noise bed. No-op if it is already playing.
    pub fn play_ambient_noise(&mut self) {
        if self.ambient == AmbientSource::Noise {
            return;
        }
        self.ensure_output();
        self.cancel_fade();
        // A leftover file bed is cut outright here; the graceful path goes
        // through `switch_ambient`, which fades it first.
        if let Some(sink) = self.file_sink.take() {
            sink.stop();
        }
        self.ambient = AmbientSource::Noise;

        let Some(out) = self.output.as_ref() else {
            return;
        };
        match Sink::try_new(&out.handle) {
            Ok(sink) => {
                sink.set_volume(NOISE_GAIN);
                sink.append(synth::noise_source());
                self.noise_sink = Some(Arc::new(sink));
                debug!("ambient noise started");
            }
            Err(err) => warn!(error = %AudioError::from(err), "could not start ambient noise"),
        }
    }

    /// Ramp the noise bed down over 0.5 s, then release it.
    ///
    /// Guarded against double-stop: a second call while the ramp is pending
    /// finds the source already marked inactive and does nothing.
    pub fn stop_ambient_noise(&mut self) {
        if self.ambient != AmbientSource::Noise {
            return;
        }
        self.ambient = AmbientSource::None;
        let Some(sink) = self.noise_sink.take() else {
            return;
        };
        let task = tokio::spawn(async move {
            for _ in 0..NOISE_FADE_STEPS {
                sink.set_volume(sink.volume() * NOISE_FADE_FACTOR);
                tokio::time::sleep(FADE_STEP).await;
            }
            sink.stop();
        });
        self.fade = Some(task.abort_handle());
    }

    /// Start a file-backed ambient bed, replacing whatever is playing.
    ///
    /// An active file bed is faded out to completion first; the noise bed
    /// is ramped down without waiting. Unreadable or undecodable paths are
    /// logged and otherwise ignored.
    pub async fn play_ambient_file(&mut self, path: &Path) {
        self.ensure_output();
        self.cancel_fade();
        match self.ambient {
            AmbientSource::Noise => self.stop_ambient_noise(),
            AmbientSource::File { .. } => self.stop_ambient_file().await,
            AmbientSource::None => {}
        }

        self.ambient = AmbientSource::File {
            path: path.to_path_buf(),
        };
        if let Err(err) = self.start_file_sink(path) {
            warn!(error = %err, "ambient playback failed");
            self.ambient = AmbientSource::None;
        }
    }

    fn start_file_sink(&mut self, path: &Path) -> Result<(), AudioError> {
        let Some(out) = self.output.as_ref() else {
            return Ok(());
        };
        let file = File::open(path).map_err(|source| AudioError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let sink = Sink::try_new(&out.handle)?;
        // Fresh sink per playback: position starts at zero and the volume
        // is back at its nominal value after any previous fade.
        sink.set_volume(FILE_VOLUME);
        sink.append(source.repeat_infinite());
        self.file_sink = Some(Arc::new(sink));
        debug!(path = %path.display(), "ambient file started");
        Ok(())
    }

    fn begin_file_fade(&mut self) -> Option<JoinHandle<()>> {
        let sink = self.file_sink.take()?;
        Some(tokio::spawn(async move {
            let mut volume = sink.volume();
            while volume > 0.01 {
                volume = (volume - FILE_FADE_STEP).max(0.0);
                sink.set_volume(volume);
                tokio::time::sleep(FADE_STEP).await;
            }
            sink.stop();
        }))
    }

    /// Fade the file bed out and wait for the fade to finish.
    ///
    /// Callers that start a replacement bed must await this so the two are
    /// never audible together. A fade superseded by a newer request
    /// completes as cancelled, which is expected and suppressed.
    pub async fn stop_ambient_file(&mut self) {
        let AmbientSource::File { .. } = self.ambient else {
            return;
        };
        self.ambient = AmbientSource::None;
        let Some(task) = self.begin_file_fade() else {
            return;
        };
        self.fade = Some(task.abort_handle());
        match task.await {
            Ok(()) => debug!("ambient file stopped"),
            Err(err) if err.is_cancelled() => debug!("ambient fade superseded"),
            Err(err) => warn!(error = %err, "ambient fade task failed"),
        }
    }

    /// Fire-and-forget stop of whichever ambient bed is active.
    ///
    /// Used on pause/reset/completion, where the countdown path must not
    /// wait on audio.
    pub fn stop_ambient(&mut self) {
        match self.ambient {
            AmbientSource::Noise => self.stop_ambient_noise(),
            AmbientSource::File { .. } => {
                self.ambient = AmbientSource::None;
                if let Some(task) = self.begin_file_fade() {
                    self.fade = Some(task.abort_handle());
                }
            }
            AmbientSource::None => {}
        }
    }

    /// Switch to the requested ambient bed, serialized stop-then-start.
    ///
    /// Requesting the bed that is already playing is a no-op.
    pub async fn switch_ambient(&mut self, target: AmbientTarget) {
        let unchanged = match (&self.ambient, &target) {
            (AmbientSource::Noise, AmbientTarget::Noise) => true,
            (AmbientSource::File { path }, AmbientTarget::File(next)) => path == next,
            _ => false,
        };
        if unchanged {
            return;
        }
        match target {
            AmbientTarget::Noise => {
                if matches!(self.ambient, AmbientSource::File { .. }) {
                    self.stop_ambient_file().await;
                }
                self.play_ambient_noise();
            }
            AmbientTarget::File(path) => self.play_ambient_file(&path).await,
        }
    }

    /// Play the one-shot completion chime.
    ///
    /// Independent of the ambient bed; it is an alert, not a bed, and may
    /// overlap with one.
    pub fn play_completion_chime(&mut self) {
        self.ensure_output();
        let Some(out) = self.output.as_ref() else {
            return;
        };
        match Sink::try_new(&out.handle) {
            Ok(sink) => {
                sink.append(ChimeSweep::new());
                sink.detach();
            }
            Err(err) => warn!(error = %AudioError::from(err), "could not play completion chime"),
        }
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}
