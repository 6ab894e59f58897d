use focusflow_core::{CoreError, SoundCatalog};

pub fn run(json: bool) -> Result<(), CoreError> {
    let catalog = SoundCatalog::builtin();
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }
    for sound in catalog.iter() {
        let source = match &sound.path {
            None => "synthesized".to_string(),
            Some(path) => path.display().to_string(),
        };
        println!("{:<12} {:<20} {source}", sound.id, sound.name);
    }
    println!("\nAdd your own with `run --ambient-file <path>` (wav/ogg/mp3/flac).");
    Ok(())
}
