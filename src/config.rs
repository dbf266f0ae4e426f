//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `$FIGYA_CONFIG`
//! 2. `config.toml` in the platform config directory
//! 3. Built-in defaults (every key is optional)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub repl:    ReplConfig,
}

/// Where and when session state is written.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory. Default: platform-specific data dir.
    pub data_dir: Option<PathBuf>,
    /// Save the variable store after every change and at exit.
    pub autosave: bool,
}

/// Interactive session settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    pub prompt:  String,
    /// Keep line history across sessions.
    pub history: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: None,
               autosave: true, }
    }
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self { prompt:  "figya> ".into(),
               history: true, }
    }
}

impl Config {
    /// The data directory: `$FIGYA_DATA_DIR`, then the configured one, then
    /// the platform default.
    pub fn data_dir(&self) -> PathBuf {
        resolve_data_dir(std::env::var_os("FIGYA_DATA_DIR").map(PathBuf::from),
                         self.storage.data_dir.as_deref())
    }
}

fn resolve_data_dir(from_env: Option<PathBuf>, configured: Option<&Path>) -> PathBuf {
    from_env.or_else(|| configured.map(Path::to_path_buf))
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from(".figya"))
}

/// Load config from disk. Returns defaults if no config file exists.
pub fn load_config() -> Result<Config> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    if !path.exists() {
        return Ok(Config::default());
    }

    let content =
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("FIGYA_CONFIG") {
        return Some(PathBuf::from(path));
    }
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "figya")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.storage.autosave);
        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.repl.prompt, "figya> ");
        assert!(config.repl.history);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: Config = toml::from_str("[repl]\nprompt = \"> \"\n").unwrap();
        assert_eq!(config.repl.prompt, "> ");
        assert!(config.repl.history);
        assert!(config.storage.autosave);
    }

    #[test]
    fn full_toml() {
        let text = r#"
            [storage]
            data_dir = "/tmp/figya"
            autosave = false

            [repl]
            prompt = "= "
            history = false
        "#;
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/figya")));
        assert!(!config.storage.autosave);
        assert!(!config.repl.history);
    }

    #[test]
    fn environment_wins_over_config() {
        let configured = PathBuf::from("/from/config");
        assert_eq!(resolve_data_dir(Some(PathBuf::from("/from/env")), Some(&configured)),
                   PathBuf::from("/from/env"));
        assert_eq!(resolve_data_dir(None, Some(&configured)), configured);
    }
}
