use crate::config::types::Settings;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a settings file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(Settings)` - Successfully loaded and validated settings
/// * `Err(ConfigError)` - Failed to load, parse, or validate the settings
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use linkrank::config::load_settings;
///
/// let settings = load_settings(Path::new("linkrank.toml")).unwrap();
/// println!("Damping: {}", settings.pagerank.damping_factor);
/// ```
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    parse_settings(&content)
}

/// Parses and validates settings from TOML text
pub fn parse_settings(content: &str) -> Result<Settings, ConfigError> {
    let settings: Settings = toml::from_str(content)?;
    validate(&settings)?;
    Ok(settings)
}

/// Loads settings from `path` when given, otherwise returns the defaults
pub fn load_settings_or_default(path: Option<&Path>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) => load_settings(path),
        None => Ok(Settings::default()),
    }
}
