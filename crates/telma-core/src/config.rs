//! Configuration management for telma.
//!
//! Settings are stored in TOML and layered as follows:
//!
//! 1. Built-in defaults
//! 2. The config file (`--config`, `TELMA_CONFIG`, `TELMA_CONFIG_DIR/config.toml`
//!    or the platform config directory)
//! 3. Environment variables with the `TELMA_` prefix
//!
//! ## Example Configuration File
//!
//! ```toml
//! [api]
//! base_url = "https://api.edamam.com/api/recipes/v2"
//! app_id = "0123abcd"
//! app_key = "0123456789abcdef"
//! type = "public"
//! timeout_secs = 30
//!
//! [defaults]
//! meal_types = ["breakfast", "dinner", "lunch", "snack", "teatime"]
//! home_cuisines = ["Asian", "French"]
//! home_cards = 12
//! pages = 1
//!
//! [paths]
//! data_dir = "/home/user/.local/share/telma"
//! ```
//!
//! Loading with an explicit file:
//!
//! ```rust,no_run
//! use std::path::Path;
//! use telma_core::Config;
//!
//! let config = Config::load(Some(Path::new("telma.toml")))?;
//! println!("saved recipes live in {}", config.data_dir()?.display());
//! # Ok::<(), telma_core::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{ApiConfig, DEFAULT_ACCESS_TYPE, DEFAULT_BASE_URL};
use crate::query::DEFAULT_MEAL_TYPES;
use crate::{Error, Result};

/// Config file name inside a config directory.
pub const CONFIG_FILENAME: &str = "config.toml";

const APP_DIR: &str = "telma";
const DOT_DIR: &str = ".telma";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote API connection.
    pub api: ApiSettings,
    /// Listing and home view defaults.
    pub defaults: DefaultsConfig,
    /// File system locations.
    pub paths: PathsConfig,
}

/// `[api]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Recipe search endpoint.
    pub base_url: String,
    /// Application id credential.
    pub app_id: String,
    /// Application key credential.
    pub app_key: String,
    /// Access type sent as `type=`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_id: String::new(),
            app_key: String::new(),
            kind: DEFAULT_ACCESS_TYPE.to_string(),
            timeout_secs: 30,
        }
    }
}

/// `[defaults]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Meal types queried when a listing has no filters.
    pub meal_types: Vec<String>,
    /// Cuisines shown as sliders on the home view.
    pub home_cuisines: Vec<String>,
    /// Cards shown for the home view's meal-type tab.
    pub home_cards: usize,
    /// Pages fetched by `recipes` when `--pages` is not given.
    pub pages: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            meal_types: DEFAULT_MEAL_TYPES.iter().map(ToString::to_string).collect(),
            home_cuisines: vec!["Asian".to_string(), "French".to_string()],
            home_cards: 12,
            pages: 1,
        }
    }
}

/// `[paths]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding `saved-recipes.json`; platform default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from `explicit` or the resolved default location,
    /// then apply environment overrides.
    ///
    /// A missing file at a discovered location yields defaults. A file named
    /// by `explicit` or `TELMA_CONFIG` must exist; an unreadable or malformed
    /// file is always an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_with(explicit, process_env)
    }

    /// [`Config::load`] reading the environment through `env`.
    pub fn load_with(
        explicit: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let named = explicit.is_some() || non_empty(env("TELMA_CONFIG")).is_some();
        let path = Self::config_path_with(explicit, &env)?;
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else if named {
            return Err(Error::Config(format!(
                "Config file {} does not exist",
                path.display()
            )));
        } else {
            debug!("no config at {}; using defaults", path.display());
            Self::default()
        };
        config.apply_env_overrides(&env);
        Ok(config)
    }

    /// Parse a config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        let config = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse config {}: {e}", path.display()))
        })?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config: {e}")))?;
        Ok(())
    }

    /// Resolve the config file path.
    ///
    /// Order: `explicit`, `TELMA_CONFIG`, `TELMA_CONFIG_DIR/config.toml`, the
    /// platform config directory.
    pub fn config_path_with(
        explicit: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Some(file) = non_empty(env("TELMA_CONFIG")) {
            return Ok(PathBuf::from(file));
        }
        if let Some(dir) = non_empty(env("TELMA_CONFIG_DIR")) {
            return Ok(PathBuf::from(dir).join(CONFIG_FILENAME));
        }
        let project_dirs = ProjectDirs::from("food", "telma", APP_DIR)
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// Apply `TELMA_API_URL`, `TELMA_APP_ID`, `TELMA_APP_KEY` and
    /// `TELMA_DATA_DIR` from `env`. Blank values are ignored.
    pub fn apply_env_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(url) = non_empty(env("TELMA_API_URL")) {
            self.api.base_url = url;
        }
        if let Some(id) = non_empty(env("TELMA_APP_ID")) {
            self.api.app_id = id;
        }
        if let Some(key) = non_empty(env("TELMA_APP_KEY")) {
            self.api.app_key = key;
        }
        if let Some(dir) = non_empty(env("TELMA_DATA_DIR")) {
            self.paths.data_dir = Some(PathBuf::from(dir));
        }
    }

    /// Directory for the saved-recipes store.
    pub fn data_dir(&self) -> Result<PathBuf> {
        self.data_dir_with(process_env)
    }

    /// Directory for the saved-recipes store, reading `XDG_DATA_HOME` from
    /// `env`.
    ///
    /// Order: `[paths].data_dir`, `XDG_DATA_HOME/telma`, `~/.telma`.
    pub fn data_dir_with(&self, env: impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
        if let Some(dir) = &self.paths.data_dir {
            return Ok(dir.clone());
        }
        if let Some(xdg) = non_empty(env("XDG_DATA_HOME")) {
            return Ok(PathBuf::from(xdg).join(APP_DIR));
        }
        let home = BaseDirs::new()
            .ok_or_else(|| Error::Storage("Failed to determine home directory".into()))?;
        Ok(home.home_dir().join(DOT_DIR))
    }

    /// Client settings derived from `[api]`.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api.base_url.clone(),
            app_id: self.api.app_id.clone(),
            app_key: self.api.app_key.clone(),
            kind: self.api.kind.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs.max(1)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.kind, "public");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.app_id.is_empty());
        assert_eq!(
            config.defaults.meal_types,
            vec!["breakfast", "dinner", "lunch", "snack", "teatime"]
        );
        assert_eq!(config.defaults.home_cuisines, vec!["Asian", "French"]);
        assert_eq!(config.defaults.home_cards, 12);
        assert_eq!(config.defaults.pages, 1);
        assert!(config.paths.data_dir.is_none());
    }

    #[test]
    fn test_config_save_and_load_roundtrip() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join(CONFIG_FILENAME);

        let mut original = Config::default();
        original.api.app_id = "abc".into();
        original.api.app_key = "secret".into();
        original.defaults.home_cuisines = vec!["Italian".into()];
        original.paths.data_dir = Some(PathBuf::from("/tmp/telma-data"));
        original.save_to(&path)?;

        let loaded = Config::load_from(&path)?;
        assert_eq!(loaded, original);

        let raw = fs::read_to_string(&path)?;
        assert!(raw.contains("type = \"public\""));
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "[api]\napp_id = \"only-id\"\n")?;

        let config = Config::load_from(&path)?;
        assert_eq!(config.api.app_id, "only-id");
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.defaults, DefaultsConfig::default());
        Ok(())
    }

    #[test]
    fn test_config_parse_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("invalid.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        match Config::load_from(&path) {
            Err(Error::Config(msg)) => assert!(msg.contains("Failed to parse config")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_named_file_is_an_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let absent = temp_dir.path().join("absent.toml");

        match Config::load_with(Some(&absent), |_| None) {
            Err(Error::Config(msg)) => assert!(msg.contains("does not exist"), "{msg}"),
            other => panic!("Expected Config error, got {other:?}"),
        }

        let via_env = absent.display().to_string();
        let env = |name: &str| (name == "TELMA_CONFIG").then(|| via_env.clone());
        assert!(matches!(Config::load_with(None, env), Err(Error::Config(_))));
        Ok(())
    }

    #[test]
    fn test_load_missing_discovered_file_gives_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let dir = temp_dir.path().display().to_string();
        let env = |name: &str| (name == "TELMA_CONFIG_DIR").then(|| dir.clone());
        let config = Config::load_with(None, env)?;
        assert_eq!(config.defaults, DefaultsConfig::default());
        Ok(())
    }

    #[test]
    fn test_config_path_resolution_order() -> Result<()> {
        let explicit = PathBuf::from("/etc/telma/explicit.toml");
        let env = env_of(&[
            ("TELMA_CONFIG", "/from/env/file.toml"),
            ("TELMA_CONFIG_DIR", "/from/env/dir"),
        ]);

        assert_eq!(Config::config_path_with(Some(&explicit), &env)?, explicit);
        assert_eq!(
            Config::config_path_with(None, &env)?,
            PathBuf::from("/from/env/file.toml")
        );

        let env = env_of(&[("TELMA_CONFIG", "  "), ("TELMA_CONFIG_DIR", "/from/env/dir")]);
        assert_eq!(
            Config::config_path_with(None, &env)?,
            PathBuf::from("/from/env/dir").join(CONFIG_FILENAME)
        );
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.api.app_id = "from-file".into();
        config.apply_env_overrides(env_of(&[
            ("TELMA_API_URL", "http://localhost:9000/v2"),
            ("TELMA_APP_ID", "from-env"),
            ("TELMA_APP_KEY", ""),
            ("TELMA_DATA_DIR", "/data/telma"),
        ]));

        assert_eq!(config.api.base_url, "http://localhost:9000/v2");
        assert_eq!(config.api.app_id, "from-env");
        assert!(config.api.app_key.is_empty());
        assert_eq!(config.paths.data_dir, Some(PathBuf::from("/data/telma")));
    }

    #[test]
    fn test_data_dir_resolution() -> Result<()> {
        let mut config = Config::default();
        let xdg = env_of(&[("XDG_DATA_HOME", "/xdg/data")]);
        assert_eq!(config.data_dir_with(&xdg)?, PathBuf::from("/xdg/data/telma"));

        config.paths.data_dir = Some(PathBuf::from("/explicit"));
        assert_eq!(config.data_dir_with(&xdg)?, PathBuf::from("/explicit"));

        let fallback = Config::default().data_dir_with(env_of(&[]))?;
        assert!(fallback.ends_with(".telma"));
        Ok(())
    }

    #[test]
    fn test_api_config_conversion() {
        let mut config = Config::default();
        config.api.app_id = "id".into();
        config.api.app_key = "key".into();
        config.api.timeout_secs = 0;

        let api = config.api_config();
        assert_eq!(api.app_id, "id");
        assert_eq!(api.kind, "public");
        assert_eq!(api.timeout, Duration::from_secs(1));
    }
}
