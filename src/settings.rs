use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::modules::tag_input::DEFAULT_COMMIT_KEYS;

pub const SETTINGS_FILE: &str = "accounts_settings.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreSettings {
    /// Keys that commit the pending tag text, matched against `KeyboardEvent.key`.
    pub tag_commit_keys: Vec<String>,
    /// Also drop the password visibility flag when an account is removed.
    pub clear_visibility_on_remove: bool,
    pub log_level: String, // "error", "warn", "info", "debug", "trace"
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            tag_commit_keys: DEFAULT_COMMIT_KEYS.iter().map(|k| k.to_string()).collect(),
            clear_visibility_on_remove: false,
            log_level: "info".to_string(),
        }
    }
}

impl StoreSettings {
    pub fn get_path(dir: &Path) -> PathBuf {
        dir.join(SETTINGS_FILE)
    }

    pub fn load(dir: &Path) -> Self {
        let path = Self::get_path(dir);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    log::warn!("[Settings] Failed to parse settings: {}, returning defaults", e);
                    Self::default()
                }),
                Err(e) => {
                    log::warn!("[Settings] Failed to read file: {}, returning defaults", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    pub fn save(&self, dir: &Path) -> Result<(), String> {
        let path = Self::get_path(dir);
        let tmp_path = path.with_extension("tmp");

        fs::create_dir_all(dir).map_err(|e| e.to_string())?;

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        // Write to tmp, then rename, so a crash never leaves a half-written file.
        fs::write(&tmp_path, json).map_err(|e| e.to_string())?;
        fs::rename(tmp_path, path).map_err(|e| e.to_string())?;

        Ok(())
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
