use std::time::Duration;

use focusflow_core::{AudioEngine, CoreError};

pub async fn run() -> Result<(), CoreError> {
    let mut engine = AudioEngine::new();
    engine.ensure_output();
    if !engine.has_output() {
        eprintln!("no audio output available");
        return Ok(());
    }
    engine.play_completion_chime();
    // Keep the output stream alive until the sweep finishes.
    tokio::time::sleep(Duration::from_millis(4_200)).await;
    Ok(())
}
