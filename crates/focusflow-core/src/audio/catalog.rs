use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One selectable ambient sound.
///
/// `path == None` denotes the synthesized default bed; file-backed entries
/// carry the path handed to the playback engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundEffect {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Ordered list of available ambient sounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundCatalog {
    sounds: Vec<SoundEffect>,
}

impl SoundCatalog {
    /// The built-in catalog: only the synthesized rain bed.
    pub fn builtin() -> Self {
        Self {
            sounds: vec![SoundEffect {
                id: "rain".into(),
                name: "Gentle Rain".into(),
                path: None,
            }],
        }
    }

    /// Append a file-backed sound.
    pub fn add_file(&mut self, id: impl Into<String>, name: impl Into<String>, path: PathBuf) {
        self.sounds.push(SoundEffect {
            id: id.into(),
            name: name.into(),
            path: Some(path),
        });
    }

    pub fn get(&self, id: &str) -> Option<&SoundEffect> {
        self.sounds.iter().find(|s| s.id == id)
    }

    /// Id of the first (default) entry.
    pub fn default_id(&self) -> &str {
        self.sounds.first().map(|s| s.id.as_str()).unwrap_or("rain")
    }

    /// Entry following `id` in catalog order, wrapping around.
    pub fn next_after(&self, id: &str) -> Option<&SoundEffect> {
        let pos = self.sounds.iter().position(|s| s.id == id)?;
        self.sounds.get((pos + 1) % self.sounds.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SoundEffect> {
        self.sounds.iter()
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}

impl Default for SoundCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_default_is_synthesized() {
        let catalog = SoundCatalog::builtin();
        let first = catalog.get(catalog.default_id()).unwrap();
        assert!(first.path.is_none());
    }

    #[test]
    fn lookup_by_id() {
        let mut catalog = SoundCatalog::builtin();
        catalog.add_file("ocean", "Ocean Waves", PathBuf::from("sounds/ocean.ogg"));
        assert!(catalog.get("ocean").is_some());
        assert!(catalog.get("nope").is_none());
    }

    #[test]
    fn next_after_wraps() {
        let mut catalog = SoundCatalog::builtin();
        catalog.add_file("ocean", "Ocean Waves", PathBuf::from("sounds/ocean.ogg"));
        assert_eq!(catalog.next_after("rain").unwrap().id, "ocean");
        assert_eq!(catalog.next_after("ocean").unwrap().id, "rain");
        assert!(catalog.next_after("nope").is_none());
    }
}
