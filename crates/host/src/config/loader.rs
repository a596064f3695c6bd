//! Config path resolution and file formats
//!
//! The host decides where its configuration tree lives; everything below it
//! follows a fixed layout:
//!
//! `<base>/configs/plugins/{plugin_name}/{plugin_name}.{json|toml}`

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use super::{ConfigError, ConfigResult};

/// On-disk format of a config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    /// `.json`, pretty-printed
    #[default]
    Json,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }

    /// Pick the format from a path's extension (JSON unless it says `.toml`)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }

    /// Parse file content
    pub fn parse<T: DeserializeOwned>(&self, content: &str) -> ConfigResult<T> {
        match self {
            Self::Json => Ok(serde_json::from_str(content)?),
            Self::Toml => Ok(toml::from_str(content)?),
        }
    }

    /// Render a value for writing to disk
    pub fn render<T: Serialize>(&self, value: &T) -> ConfigResult<String> {
        match self {
            Self::Json => Ok(serde_json::to_string_pretty(value)?),
            Self::Toml => Ok(toml::to_string_pretty(value)?),
        }
    }
}

/// Returns the base configs directory.
///
/// Path: `<base>/configs/`
pub fn configs_dir(base: &Path) -> ConfigResult<PathBuf> {
    if base.as_os_str().is_empty() {
        return Err(ConfigError::NoConfigDirectory);
    }
    Ok(base.join("configs"))
}

/// Returns the path for a plugin's config file.
///
/// Path: `<base>/configs/plugins/{plugin_name}/{plugin_name}.{ext}`
pub fn plugin_config_path(
    base: &Path,
    plugin_name: &str,
    format: ConfigFormat,
) -> ConfigResult<PathBuf> {
    Ok(configs_dir(base)?
        .join("plugins")
        .join(plugin_name)
        .join(format!("{}.{}", plugin_name, format.extension())))
}

/// Read and parse a config file, format chosen by extension
pub fn read_config<T: DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    let content = std::fs::read_to_string(path)?;
    ConfigFormat::from_path(path).parse(&content)
}

/// Write a config file, creating parent directories as needed
pub fn write_config<T: Serialize>(path: &Path, value: &T) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = ConfigFormat::from_path(path).render(value)?;
    std::fs::write(path, content)?;
    Ok(())
}
