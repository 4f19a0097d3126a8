//! Configuration file upgrades: detect keys missing from an older file and
//! fill them in with their defaults, leaving existing values alone.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(&content) {
        Ok(Value::Mapping(m)) => Ok(m),
        Ok(_) => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
        Err(e) => Err(AppError::Config(format!("{}: {}", path.display(), e))),
    }
}

fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default()) {
        Ok(Value::Mapping(m)) => Ok(m),
        _ => Err(AppError::ConfigSave),
    }
}

/// Keys a complete configuration has that the file at `path` lacks.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    Ok(default_mapping()?
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add every missing key with its default value. Returns the keys added;
/// the file is only rewritten when something changed.
pub fn fill_missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;
    let mut added = Vec::new();

    for (k, v) in default_mapping()? {
        if !current.contains_key(&k) {
            if let Some(name) = k.as_str() {
                added.push(name.to_string());
            }
            current.insert(k, v);
        }
    }

    if !added.is_empty() {
        let yaml =
            serde_yaml::to_string(&Value::Mapping(current)).map_err(|_| AppError::ConfigSave)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;
    }

    Ok(added)
}
