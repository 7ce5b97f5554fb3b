//! Configuration file parsing

use crate::config::types::AppConfig;
use crate::error::{ConfigError, ConfigResult};
use std::fs;
use std::path::Path;

/// Parse a configuration file from a path
pub fn parse_config_file(path: &Path) -> ConfigResult<AppConfig> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_config(&contents)
}

/// Parse configuration from a string; an empty document yields the defaults
pub fn parse_config(yaml: &str) -> ConfigResult<AppConfig> {
    if yaml.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}
