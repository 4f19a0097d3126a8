use crate::core::calculator::hours::RoundingMode;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_employee")]
    pub default_employee: i64,
    /// `local`, `utc` or a fixed offset such as `+02:00`.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub hours_rounding: RoundingMode,
    #[serde(default = "default_week_start")]
    pub week_start: String,
    #[serde(default = "default_weekly_goal")]
    pub weekly_hours_goal: f64,
    #[serde(default = "default_reviewer")]
    pub reviewer: String,
    #[serde(default = "default_min_reason_length")]
    pub min_reason_length: usize,
}

fn default_employee() -> i64 {
    1
}
fn default_timezone() -> String {
    "local".to_string()
}
fn default_week_start() -> String {
    "monday".to_string()
}
fn default_weekly_goal() -> f64 {
    40.0
}
fn default_reviewer() -> String {
    "HR Manager".to_string()
}
fn default_min_reason_length() -> usize {
    crate::core::leave::DEFAULT_MIN_REASON_LENGTH
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            default_employee: default_employee(),
            timezone: default_timezone(),
            hours_rounding: RoundingMode::default(),
            week_start: default_week_start(),
            weekly_hours_goal: default_weekly_goal(),
            reviewer: default_reviewer(),
            min_reason_length: default_min_reason_length(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("hrclock")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".hrclock")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("hrclock.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("hrclock.sqlite")
    }

    /// Load configuration from the standard file, or defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was set up.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() || is_test {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => dir.join("hrclock.sqlite"),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            Self::with_database(db_path.clone()).save_to(&Self::config_file())?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}
