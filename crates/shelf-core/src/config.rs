//! Application configuration
//!
//! A `Config` is built in three layers, later ones winning:
//!
//! 1. Built-in defaults
//! 2. The TOML file at `SHELF_CONFIG`, or `~/.config/shelf/config.toml`
//! 3. `SHELF_DATA_DIR` and `SHELF_LOG` from the environment
//!
//! The storage adapter itself never reads configuration; frontends use it
//! to decide where the file store lives.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::storage::{keys, FileStore, LocalStorageAdapter};

/// Environment variables that override the config file
pub mod vars {
    /// Path of the config file itself
    pub const CONFIG: &str = "SHELF_CONFIG";
    /// Overrides `data_dir`
    pub const DATA_DIR: &str = "SHELF_DATA_DIR";
    /// Overrides `log_level`; an empty value turns logging off
    pub const LOG: &str = "SHELF_LOG";
}

/// Reads one variable by name
type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Directory holding `bookmarks.json` and `categories.json`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log filter (e.g. "debug" or "shelf_core=trace"); logging is off when unset
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: None,
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::set`], in display order
    pub const KEYS: &'static [&'static str] = &["data_dir", "log_level"];

    /// Load from the default location, then apply environment overrides
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load from an explicit path when given, otherwise the default location
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load from a specific file; a missing file means defaults
    pub fn load_from_path(path: &Path) -> Result<Self> {
        Self::read(path, &process_env)
    }

    /// Parse TOML text, then apply environment overrides
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        Self::parse(toml_content, &process_env)
    }

    fn read(path: &Path, env: Lookup) -> Result<Self> {
        if !path.exists() {
            let mut config = Self::default();
            config.apply_overrides(env);
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::parse(&content, env)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    fn parse(toml_content: &str, env: Lookup) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_overrides(env);
        Ok(config)
    }

    fn apply_overrides(&mut self, env: Lookup) {
        if let Some(dir) = env(vars::DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = env(vars::LOG) {
            self.log_level = Some(level).filter(|l| !l.is_empty());
        }
    }

    /// Change one setting by key
    ///
    /// `log_level` accepts an empty value or `none` to turn logging off.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data_dir" => {
                if value.trim().is_empty() {
                    bail!("data_dir cannot be empty");
                }
                self.data_dir = value.into();
            }
            "log_level" => {
                self.log_level = match value.trim() {
                    "" | "none" => None,
                    level => Some(level.to_string()),
                };
            }
            _ => bail!(
                "Unknown configuration key: '{}'\nValid keys: {}",
                key,
                Self::KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Every setting as a `(key, value)` pair, unset values as `None`
    pub fn entries(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("data_dir", Some(self.data_dir.display().to_string())),
            ("log_level", self.log_level.clone()),
        ]
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Path of the config file, honoring `SHELF_CONFIG`
    pub fn config_file_path() -> PathBuf {
        locate_config_file(&process_env)
    }

    /// Get the path of the stored bookmarks collection
    pub fn bookmarks_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", keys::BOOKMARKS))
    }

    /// Get the path of the stored categories collection
    pub fn categories_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", keys::CATEGORIES))
    }

    /// File store rooted at the data directory
    pub fn file_store(&self) -> FileStore {
        FileStore::new(self.data_dir.clone())
    }

    /// Storage adapter over the data directory
    pub fn storage_adapter(&self) -> LocalStorageAdapter<FileStore> {
        LocalStorageAdapter::new(self.file_store())
    }
}

fn locate_config_file(env: Lookup) -> PathBuf {
    if let Some(path) = env(vars::CONFIG) {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shelf")
        .join("config.toml")
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shelf")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use tempfile::TempDir;

    /// A fixed environment, so tests never touch the process one
    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn at(dir: &str) -> Config {
        Config {
            data_dir: PathBuf::from(dir),
            log_level: None,
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.log_level.is_none());
        assert!(config.data_dir.ends_with("shelf"));
    }

    #[test]
    fn test_collection_paths_match_file_store() {
        let config = at("/data/shelf");
        let store = config.file_store();

        assert_eq!(
            config.bookmarks_path(),
            PathBuf::from("/data/shelf/bookmarks.json")
        );
        assert_eq!(store.root(), Path::new("/data/shelf"));
        assert_eq!(
            store.path_for(keys::BOOKMARKS).unwrap(),
            config.bookmarks_path()
        );
        assert_eq!(
            store.path_for(keys::CATEGORIES).unwrap(),
            config.categories_path()
        );
    }

    #[test]
    fn test_env_overrides_file_values() {
        let toml = r#"
            data_dir = "/from/file"
            log_level = "warn"
        "#;

        let config = Config::parse(toml, &env_of(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/from/file"));
        assert_eq!(config.log_level.as_deref(), Some("warn"));

        let env = env_of(&[(vars::DATA_DIR, "/from/env"), (vars::LOG, "debug")]);
        let config = Config::parse(toml, &env).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/from/env"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_empty_log_var_turns_logging_off() {
        let env = env_of(&[(vars::LOG, "")]);
        let config = Config::parse(r#"log_level = "info""#, &env).unwrap();
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = Path::new("/nonexistent/config.toml");
        assert_eq!(Config::read(path, &env_of(&[])).unwrap(), Config::default());

        let env = env_of(&[(vars::DATA_DIR, "/srv/shelf")]);
        assert_eq!(Config::read(path, &env).unwrap(), at("/srv/shelf"));
    }

    #[test]
    fn test_malformed_file_names_the_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = [").unwrap();

        let err = Config::read(&path, &env_of(&[])).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            data_dir: temp_dir.path().join("data"),
            log_level: Some("info".to_string()),
        };
        config.save_to_path(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("data_dir"));
        assert_eq!(Config::read(&path, &env_of(&[])).unwrap(), config);
    }

    #[test]
    fn test_config_file_location() {
        let env = env_of(&[(vars::CONFIG, "/etc/shelf/custom.toml")]);
        assert_eq!(
            locate_config_file(&env),
            PathBuf::from("/etc/shelf/custom.toml")
        );
        assert!(locate_config_file(&env_of(&[])).ends_with("shelf/config.toml"));
    }

    #[test]
    fn test_set_known_keys() {
        let mut config = at("/data/shelf");

        config.set("data_dir", "/srv/shelf").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/shelf"));

        config.set("log_level", "debug").unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));

        config.set("log_level", "none").unwrap();
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = at("/data/shelf");

        let err = config.set("sync_url", "ws://x").unwrap_err();
        assert!(err.to_string().contains("data_dir, log_level"));
        assert!(config.set("data_dir", " ").is_err());
        assert_eq!(config, at("/data/shelf"));
    }

    #[test]
    fn test_entries_follow_keys() {
        let config = at("/data/shelf");
        let entries = config.entries();

        let keys: Vec<_> = entries.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, Config::KEYS);
        assert_eq!(entries[0].1.as_deref(), Some("/data/shelf"));
        assert_eq!(entries[1].1, None);
    }
}
