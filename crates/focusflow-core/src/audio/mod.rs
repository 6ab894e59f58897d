mod catalog;
mod engine;
mod synth;

pub use catalog::{SoundCatalog, SoundEffect};
pub use engine::{AmbientSource, AmbientTarget, AudioEngine};
pub use synth::ChimeSweep;
