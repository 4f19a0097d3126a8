use crate::config::Config;
use crate::config::migrate::{fill_missing_keys, missing_keys};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("📄 Current configuration:\n");
        println!("{}", yaml);
        Ok(())
    }

    fn default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }

    /// Open the file in the requested editor, falling back to $EDITOR / nano.
    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let fallback = Self::default_editor();
        let requested = editor.clone().unwrap_or_else(|| fallback.clone());

        match Command::new(&requested).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{}'", requested));
                return Ok(());
            }
            _ if requested == fallback => {}
            _ => warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                requested, fallback
            )),
        }

        match Command::new(&fallback).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{}'", fallback));
                Ok(())
            }
            Ok(s) => Err(AppError::Config(format!("'{}' exited with {}", fallback, s))),
            Err(e) => Err(AppError::Config(format!("'{}': {}", fallback, e))),
        }
    }

    pub fn check(path: &Path) -> AppResult<Vec<String>> {
        if !path.exists() {
            warning(format!("No configuration file at {}", path.display()));
            return Ok(Vec::new());
        }

        let missing = missing_keys(path)?;
        if missing.is_empty() {
            success("Configuration file is complete.");
        } else {
            warning(format!("Missing keys: {}", missing.join(", ")));
        }
        Ok(missing)
    }

    pub fn migrate(path: &Path) -> AppResult<Vec<String>> {
        if !path.exists() {
            warning(format!("No configuration file at {}", path.display()));
            return Ok(Vec::new());
        }

        let added = fill_missing_keys(path)?;
        if added.is_empty() {
            info("Configuration already up to date.");
        } else {
            success(format!("Added keys with defaults: {}", added.join(", ")));
        }
        Ok(added)
    }
}
