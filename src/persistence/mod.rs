//! JSON persistence for preferences and high scores
//!
//! Files live in `$MAZE_CHASE_DATA_DIR` (or the working directory). Writes
//! go to a temporary file first and are renamed over the old one, so a
//! crash mid-write never leaves a truncated save behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Environment variable overriding the storage directory
pub const DATA_DIR_ENV: &str = "MAZE_CHASE_DATA_DIR";

/// Directory holding all save files
pub fn data_dir() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Read `dir/name` as JSON. A missing file is `Ok(None)`.
pub fn load_json<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Option<T>> {
    let path = dir.join(name);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&text)?))
}

/// Write `value` to `dir/name` as pretty JSON, atomically
pub fn save_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<()> {
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(value)?;
    let tmp = dir.join(format!("{name}.tmp"));
    fs::write(&tmp, json)?;
    fs::rename(&tmp, dir.join(name))?;
    Ok(())
}

/// Load or fall back to a default, logging why
pub fn load_or_default<T: DeserializeOwned + Default>(dir: &Path, name: &str) -> T {
    match load_json(dir, name) {
        Ok(Some(value)) => {
            log::info!("Loaded {}", name);
            value
        }
        Ok(None) => {
            log::info!("No {} found, using defaults", name);
            T::default()
        }
        Err(e) => {
            log::warn!("Could not read {}: {}; using defaults", name, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Option<BTreeMap<String, u32>> = load_json(dir.path(), "nope.json").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut value = BTreeMap::new();
        value.insert("easy".to_string(), 120u32);
        save_json(dir.path(), "scores.json", &value).unwrap();
        let loaded: Option<BTreeMap<String, u32>> = load_json(dir.path(), "scores.json").unwrap();
        assert_eq!(loaded, Some(value));
        assert!(!dir.path().join("scores.json.tmp").exists());
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("data");
        save_json(&nested, "settings.json", &vec![1u8, 2, 3]).unwrap();
        let loaded: Option<Vec<u8>> = load_json(&nested, "settings.json").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        assert!(load_json::<BTreeMap<String, u32>>(dir.path(), "bad.json").is_err());
        let value: BTreeMap<String, u32> = load_or_default(dir.path(), "bad.json");
        assert!(value.is_empty());
    }
}
