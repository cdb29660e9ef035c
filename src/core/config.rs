use crate::config::{CONFIG_FIELDS, Config};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, success, warning};
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Print the effective configuration (file values merged with defaults).
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration:\n");
        println!("{}", cfg.to_yaml()?);
        Ok(())
    }

    /// Fields a complete config file should define but `content` lacks.
    pub fn missing_fields(content: &str) -> AppResult<Vec<&'static str>> {
        let yaml: Value =
            serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;

        let Some(map) = yaml.as_mapping() else {
            return Ok(CONFIG_FIELDS.to_vec());
        };

        Ok(CONFIG_FIELDS
            .iter()
            .copied()
            .filter(|f| !map.contains_key(*f))
            .collect())
    }

    /// Validation error of the configured date/time formats, if any.
    pub fn format_problem(content: &str) -> Option<String> {
        let cfg: Config = serde_yaml::from_str(content).ok()?;
        cfg.validate().err().map(|e| e.to_string())
    }

    /// Report missing fields and unusable formats of the config file at `path`.
    pub fn check(path: &Path) -> AppResult<Vec<&'static str>> {
        if !path.exists() {
            warning(format!(
                "Config file {} not found: built-in defaults are in use. Run `libattend init`.",
                path.display()
            ));
            return Ok(CONFIG_FIELDS.to_vec());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let missing = Self::missing_fields(&content)?;

        for f in &missing {
            warning(format!("Missing field '{}' (default value is used)", f));
        }

        let problem = Self::format_problem(&content);
        if let Some(p) = &problem {
            error(p);
        }

        if missing.is_empty() && problem.is_none() {
            success("Configuration file is complete.");
        }

        Ok(missing)
    }

    /// Open the config file in `editor`, falling back to $EDITOR/$VISUAL
    /// or the platform default.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = editor.map(str::to_string).unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration file edited successfully using '{}'",
                    editor_to_use
                ));
                return Ok(());
            }
            _ => warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                editor_to_use, default_editor
            )),
        }

        match Command::new(&default_editor).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration file edited successfully using fallback '{}'",
                    default_editor
                ));
                Ok(())
            }
            _ => Err(AppError::Config(format!(
                "failed to edit configuration file using '{}'",
                default_editor
            ))),
        }
    }
}
