//! Plugin configuration files
//!
//! A plugin describes its settings as a serde struct and implements
//! [`PluginConfig`]. The file lives under a base directory the host hands in,
//! is JSON unless the plugin picks TOML, and is written out with defaults the
//! first time it is loaded.
//!
//! ```ignore
//! #[derive(Default, Serialize, Deserialize)]
//! #[serde(default)]
//! pub struct WaveLimits {
//!     pub max_players: u32,
//! }
//!
//! impl PluginConfig for WaveLimits {
//!     const PLUGIN_NAME: &'static str = "wave_limits";
//! }
//!
//! let limits = WaveLimits::load(Path::new("/srv/game"))?;
//! ```

mod loader;

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

pub use loader::{configs_dir, plugin_config_path, read_config, write_config, ConfigFormat};

/// Why a config file could not be loaded or saved
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading, writing or creating directories failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed JSON, or a value of the wrong type
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Malformed TOML
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// No usable base directory was supplied by the host
    #[error("Config directory not available - no base path supplied")]
    NoConfigDirectory,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A plugin's settings file
///
/// Stored at `<base>/configs/plugins/{PLUGIN_NAME}/{PLUGIN_NAME}.{json|toml}`.
pub trait PluginConfig: Default + Serialize + DeserializeOwned + Send + Sync {
    /// Directory and file stem
    const PLUGIN_NAME: &'static str;

    /// File format used by `load`/`save`
    const FORMAT: ConfigFormat = ConfigFormat::Json;

    /// Resolve this plugin's config path under `base`
    fn path(base: &Path) -> ConfigResult<PathBuf> {
        plugin_config_path(base, Self::PLUGIN_NAME, Self::FORMAT)
    }

    /// Read the file, writing the defaults first if it does not exist
    fn load(base: &Path) -> ConfigResult<Self> {
        Self::load_from(&Self::path(base)?)
    }

    /// Like [`load`](Self::load) for an explicit path; the extension picks the format
    fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            let config: Self = read_config(path)?;
            tracing::debug!("Loaded config for {} from {:?}", Self::PLUGIN_NAME, path);
            Ok(config)
        } else {
            let default = Self::default();
            write_config(path, &default)?;
            tracing::info!(
                "Created default config for {} at {:?}",
                Self::PLUGIN_NAME,
                path
            );
            Ok(default)
        }
    }

    /// Write the current values, creating directories as needed
    fn save(&self, base: &Path) -> ConfigResult<()> {
        let path = Self::path(base)?;
        write_config(&path, self)?;
        tracing::debug!("Saved config for {} to {:?}", Self::PLUGIN_NAME, path);
        Ok(())
    }

    /// Replace `self` with what the file holds now
    fn reload(&mut self, base: &Path) -> ConfigResult<()> {
        let path = Self::path(base)?;
        *self = read_config(&path)?;
        tracing::debug!("Reloaded config for {} from {:?}", Self::PLUGIN_NAME, path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct TestConfig {
        pub value: i32,
        pub name: String,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                value: 7,
                name: "seven".to_string(),
            }
        }
    }

    impl PluginConfig for TestConfig {
        const PLUGIN_NAME: &'static str = "test_plugin";
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "botwaves-config-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_load_creates_default() {
        let base = scratch_dir("default");
        let config = TestConfig::load(&base).unwrap();
        assert_eq!(config, TestConfig::default());
        assert!(TestConfig::path(&base).unwrap().exists());
        std::fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let base = scratch_dir("partial");
        let path = TestConfig::path(&base).unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "value": 42 }"#).unwrap();

        let mut config = TestConfig::load(&base).unwrap();
        assert_eq!(config.value, 42);
        assert_eq!(config.name, "seven");

        std::fs::write(&path, r#"{ "name": "changed" }"#).unwrap();
        config.reload(&base).unwrap();
        assert_eq!(config.value, 7);
        assert_eq!(config.name, "changed");
        std::fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn test_toml_by_extension() {
        let base = scratch_dir("toml");
        let path = base.join("custom.toml");
        std::fs::create_dir_all(&base).unwrap();
        std::fs::write(&path, "value = 3\nname = \"three\"\n").unwrap();

        let config = TestConfig::load_from(&path).unwrap();
        assert_eq!(config.value, 3);
        assert_eq!(config.name, "three");
        std::fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn test_invalid_json_is_error() {
        let base = scratch_dir("invalid");
        let path = TestConfig::path(&base).unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(TestConfig::load(&base), Err(ConfigError::JsonError(_))));
        std::fs::remove_dir_all(&base).unwrap();
    }
}
