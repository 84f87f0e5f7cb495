use crate::time_range::Notation;
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDateTime;
use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "BLUEBILL_CONFIG";

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const KEYS: &[&str] = &[
    "time_range.notation",
    "insert.date_format",
    "insert.time_format",
    "todo.marker",
    "naming.extension",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub time_range: TimeRangeConfig,
    #[serde(default)]
    pub insert: InsertConfig,
    #[serde(default)]
    pub todo: TodoConfig,
    #[serde(default)]
    pub naming: NamingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeRangeConfig {
    #[serde(default)]
    pub notation: Notation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsertConfig {
    pub date_format: String,
    pub time_format: String,
}

impl Default for InsertConfig {
    fn default() -> Self {
        Self { date_format: "%Y-%m-%d".to_string(), time_format: "%H%M".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoConfig {
    pub marker: String,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self { marker: "- []".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub extension: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self { extension: ".md".to_string() }
    }
}

impl Config {
    /// Read the config at `path`, falling back to defaults when it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        validate_time_format(&config.insert.date_format)?;
        validate_time_format(&config.insert.time_format)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context("Failed to write config file")?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "time_range.notation" => self.time_range.notation.to_string(),
            "insert.date_format" => self.insert.date_format.clone(),
            "insert.time_format" => self.insert.time_format.clone(),
            "todo.marker" => self.todo.marker.clone(),
            "naming.extension" => self.naming.extension.clone(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "time_range.notation" => {
                self.time_range.notation = value.parse().map_err(|e: String| anyhow!(e))?;
            }
            "insert.date_format" => {
                validate_time_format(value)?;
                self.insert.date_format = value.to_string();
            }
            "insert.time_format" => {
                validate_time_format(value)?;
                self.insert.time_format = value.to_string();
            }
            "todo.marker" => self.todo.marker = value.to_string(),
            "naming.extension" => self.naming.extension = value.to_string(),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

/// Reject strftime strings chrono cannot parse or cannot render for a
/// local timestamp without an offset (`%Z`, `%z` and friends).
pub fn validate_time_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| item == Item::Error) {
        return Err(anyhow!("Invalid date/time format: {}", format));
    }
    let mut rendered = String::new();
    write!(rendered, "{}", NaiveDateTime::default().format(format))
        .map_err(|_| anyhow!("Date/time format needs a timezone: {}", format))?;
    Ok(())
}

/// Location of `config.toml`, honouring [`CONFIG_ENV`].
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "bluebill", "bluebill")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow!("Unknown config key: {} (known keys: {})", key, KEYS.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.time_range.notation, Notation::Military);
        assert_eq!(config.insert.date_format, "%Y-%m-%d");
        assert_eq!(config.insert.time_format, "%H%M");
        assert_eq!(config.todo.marker, "- []");
        assert_eq!(config.naming.extension, ".md");
    }

    #[test]
    fn test_config_save_load() -> Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("time_range.notation", "standard")?;
        config.set("todo.marker", "* [ ]")?;
        config.save_to(&path)?;

        let loaded = Config::load_from(&path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_missing_file_gives_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let loaded = Config::load_from(&temp_dir.path().join("absent.toml"))?;
        assert_eq!(loaded, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[time_range]\nnotation = \"standard\"\n\n[insert]\ntime_format = \"%H:%M\"\n")?;

        let loaded = Config::load_from(&path)?;
        assert_eq!(loaded.time_range.notation, Notation::Standard);
        assert_eq!(loaded.insert.time_format, "%H:%M");
        assert_eq!(loaded.insert.date_format, "%Y-%m-%d");
        assert_eq!(loaded.todo.marker, "- []");
        Ok(())
    }

    #[test]
    fn test_get_set_keys() -> Result<()> {
        let mut config = Config::default();
        for key in KEYS {
            assert!(config.get(key).is_ok(), "key {} should be readable", key);
        }
        config.set("naming.extension", ".txt")?;
        assert_eq!(config.get("naming.extension")?, ".txt");

        assert!(config.set("time_range.notation", "metric").is_err());
        assert!(config.set("insert.date_format", "%Y-%").is_err());
        assert!(config.get("calendar.default").is_err());
        Ok(())
    }

    #[test]
    fn test_timezone_formats_rejected() {
        let mut config = Config::default();
        for format in ["%Y %Z", "%Y-%m-%d %z", "%H:%M %:z"] {
            assert!(config.set("insert.date_format", format).is_err(), "accepted {}", format);
            assert!(config.set("insert.time_format", format).is_err(), "accepted {}", format);
        }
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_timezone_format_in_file_rejected() -> Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[insert]\ndate_format = \"%Y-%m-%d %Z\"\n")?;

        assert!(Config::load_from(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_config_path_env_override() -> Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("custom.toml");

        std::env::set_var(CONFIG_ENV, &path);
        let resolved = config_path();
        std::env::remove_var(CONFIG_ENV);

        assert_eq!(resolved?, path);
        Ok(())
    }
}
