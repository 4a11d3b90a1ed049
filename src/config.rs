// File: src/config.rs
use crate::core::types::WordOrder;
use crate::error::ConfigError;
use crate::speller::DictionaryOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for a review run. Every field has a default, so a config file
/// only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Language tag of the dictionary to build when no saved one exists.
    pub language: String,
    /// Where `<language>.txt` / `<language>.json` frequency lists live.
    pub dictionary_dir: PathBuf,
    /// Where the dictionary, fix table and new-word list are kept between runs.
    pub state_dir: PathBuf,
    pub case_sensitive: bool,
    pub max_edit_distance: usize,
    pub word_order: WordOrder,
    pub start_index: usize,
    pub color: bool,
    pub log_level: String,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            dictionary_dir: PathBuf::from("dictionaries"),
            state_dir: PathBuf::from("spell_state"),
            case_sensitive: false,
            max_edit_distance: 2,
            word_order: WordOrder::default(),
            start_index: 0,
            color: true,
            log_level: "info".to_string(),
        }
    }
}

impl ReviewConfig {
    /// Reads a TOML config. With no path, the defaults are returned.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|reason| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    pub fn dictionary_options(&self) -> DictionaryOptions {
        DictionaryOptions {
            max_edit_distance: self.max_edit_distance,
            case_sensitive: self.case_sensitive,
        }
    }

    /// Parses `log_level`, falling back to `Info` on anything unrecognized.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
