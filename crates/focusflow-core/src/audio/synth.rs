//! Procedurally synthesized audio sources.
//!
//! Two sounds are generated rather than shipped as files: the default
//! ambient bed (looped filtered noise) and the session-completion chime
//! (a descending sine sweep).

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use rodio::buffer::SamplesBuffer;
use rodio::Source;

pub const SAMPLE_RATE: u32 = 44_100;

/// Length of the looped noise buffer in seconds.
const NOISE_SECONDS: u32 = 2;
/// Low-pass cutoff that turns white noise into a rain-like wash.
const NOISE_CUTOFF_HZ: u32 = 400;

const CHIME_START_HZ: f32 = 440.0;
const CHIME_END_HZ: f32 = 110.0;
const CHIME_SWEEP_SECS: f32 = 2.0;
const CHIME_ATTACK_SECS: f32 = 0.05;
const CHIME_TOTAL_SECS: f32 = 4.0;
const CHIME_PEAK_GAIN: f32 = 0.5;
const CHIME_FLOOR_GAIN: f32 = 0.001;

/// Two seconds of uniform random samples in [-1, 1].
pub fn noise_samples(seed: u64) -> Vec<f32> {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    (0..(SAMPLE_RATE * NOISE_SECONDS) as usize)
        .map(|_| rng.gen_range(-1.0f32..1.0))
        .collect()
}

/// The looping ambient noise bed: white noise, low-pass filtered at 400 Hz.
///
/// Overall gain is applied by the playback sink, mirroring a gain node.
pub fn noise_source() -> impl Source<Item = f32> + Send {
    let samples = noise_samples(rand::random());
    SamplesBuffer::new(1, SAMPLE_RATE, samples)
        .repeat_infinite()
        .low_pass(NOISE_CUTOFF_HZ)
}

/// One-shot completion chime.
///
/// A sine oscillator sweeping exponentially from 440 Hz down to 110 Hz over
/// two seconds, with a 50 ms linear attack and an exponential decay to
/// silence at four seconds, where the source ends.
pub struct ChimeSweep {
    sample_idx: usize,
    total_samples: usize,
    phase: f32,
}

impl ChimeSweep {
    pub fn new() -> Self {
        Self {
            sample_idx: 0,
            total_samples: (CHIME_TOTAL_SECS * SAMPLE_RATE as f32) as usize,
            phase: 0.0,
        }
    }
}

impl Default for ChimeSweep {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for ChimeSweep {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.sample_idx >= self.total_samples {
            return None;
        }

        let t = self.sample_idx as f32 / SAMPLE_RATE as f32;

        let freq = if t < CHIME_SWEEP_SECS {
            CHIME_START_HZ * (CHIME_END_HZ / CHIME_START_HZ).powf(t / CHIME_SWEEP_SECS)
        } else {
            CHIME_END_HZ
        };

        let gain = if t < CHIME_ATTACK_SECS {
            CHIME_PEAK_GAIN * t / CHIME_ATTACK_SECS
        } else {
            let decay = (t - CHIME_ATTACK_SECS) / (CHIME_TOTAL_SECS - CHIME_ATTACK_SECS);
            CHIME_PEAK_GAIN * (CHIME_FLOOR_GAIN / CHIME_PEAK_GAIN).powf(decay)
        };

        // Continuous phase across the frequency sweep.
        self.phase = (self.phase + 2.0 * std::f32::consts::PI * freq / SAMPLE_RATE as f32)
            % (2.0 * std::f32::consts::PI);
        self.sample_idx += 1;
        Some(self.phase.sin() * gain)
    }
}

impl Source for ChimeSweep {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total_samples - self.sample_idx)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(CHIME_TOTAL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_buffer_is_two_seconds_in_range() {
        let samples = noise_samples(7);
        assert_eq!(samples.len(), 2 * SAMPLE_RATE as usize);
        assert!(samples.iter().all(|s| (-1.0..1.0).contains(s)));
    }

    #[test]
    fn noise_is_deterministic_per_seed() {
        assert_eq!(noise_samples(42), noise_samples(42));
        assert_ne!(noise_samples(42), noise_samples(43));
    }

    #[test]
    fn chime_lasts_four_seconds() {
        let chime = ChimeSweep::new();
        assert_eq!(chime.total_duration(), Some(Duration::from_secs(4)));
        assert_eq!(chime.count(), 4 * SAMPLE_RATE as usize);
    }

    #[test]
    fn chime_starts_silent_and_stays_bounded() {
        let samples: Vec<f32> = ChimeSweep::new().collect();
        assert_eq!(samples[0], 0.0);
        assert!(samples.iter().all(|s| s.abs() <= CHIME_PEAK_GAIN));
    }

    #[test]
    fn chime_decays_to_near_silence() {
        let samples: Vec<f32> = ChimeSweep::new().collect();
        let tail = &samples[samples.len() - SAMPLE_RATE as usize / 10..];
        assert!(tail.iter().all(|s| s.abs() < 0.01));
    }
}
