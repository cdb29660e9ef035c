use crate::errors::{AppError, AppResult};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// What to do when a stored collection cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptPolicy {
    /// Treat the collection as empty; the next write replaces it.
    #[default]
    Reset,
    /// Surface the problem as `AppError::CorruptCollection`.
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_member_id_prefix")]
    pub member_id_prefix: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_time_format")]
    pub time_format: String,
    #[serde(default)]
    pub corrupt_policy: CorruptPolicy,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

/// Keys a complete configuration file is expected to contain.
pub const CONFIG_FIELDS: [&str; 6] = [
    "database",
    "member_id_prefix",
    "date_format",
    "time_format",
    "corrupt_policy",
    "recent_limit",
];

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_member_id_prefix() -> String {
    "LIB".to_string()
}
fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}
fn default_time_format() -> String {
    "%H:%M:%S".to_string()
}
fn default_recent_limit() -> usize {
    10
}

fn is_valid_format(fmt: &str) -> bool {
    !StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            member_id_prefix: default_member_id_prefix(),
            date_format: default_date_format(),
            time_format: default_time_format(),
            corrupt_policy: CorruptPolicy::default(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.libattend`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".libattend")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("libattend.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("libattend.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Self = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject `date_format` / `time_format` values chrono cannot render.
    pub fn validate(&self) -> AppResult<()> {
        for (field, fmt) in [
            ("date_format", &self.date_format),
            ("time_format", &self.time_format),
        ] {
            if !is_valid_format(fmt) {
                return Err(AppError::Config(format!(
                    "{field}: invalid strftime format '{fmt}'"
                )));
            }
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration and database files.
    ///
    /// Returns the resolved database path. When `is_test` is set the config
    /// file is left untouched.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB path: user provided (same resolution as `--db` elsewhere) or default
        let db_path = match custom_db {
            Some(name) => crate::utils::path::expand_tilde(name),
            None => Self::database_file(),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;

            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };

            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(config.to_yaml()?.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        if !db_path.exists() {
            fs::File::create(&db_path).map_err(|e| {
                AppError::from(io::Error::new(
                    e.kind(),
                    format!("cannot create {}: {}", db_path.display(), e),
                ))
            })?;
        }

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_formats_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_formats_rejected() {
        let cfg = Config {
            date_format: "%Q".into(),
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(AppError::Config(ref m)) if m.contains("date_format")));

        let cfg = Config {
            time_format: "%H:%".into(),
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(AppError::Config(ref m)) if m.contains("time_format")));
    }

    #[test]
    fn test_load_from_rejects_bad_format() {
        let path = std::env::temp_dir().join("libattend_bad_format.conf");
        fs::write(&path, "date_format: \"%Y-%Q\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(ref m) if m.contains("date_format")));

        fs::remove_file(&path).ok();
    }
}
