use crate::{
    constants::DEFAULT_BASE_URL,
    errors::{TutorError, TutorResult},
};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub model: Option<String>,
    pub log_level: String,
    pub health_check_on_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: None,
            log_level: "info".to_string(),
            health_check_on_start: true,
        }
    }
}

/// Loads the config file (creating it with defaults if missing) and applies
/// `BOOKTUTOR_*` environment overrides. The result is resolved once at
/// startup and handed to whoever needs it.
pub fn initialize_config() -> TutorResult<Config> {
    let config_path = get_config_path()?;
    let mut config = load_or_create(&config_path)?;
    apply_overrides(&mut config, |key| env::var(key).ok());
    validate_config(&config)?;
    Ok(config)
}

fn get_config_path() -> TutorResult<PathBuf> {
    if let Ok(path) = env::var("BOOKTUTOR_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    let home_dir = dirs::home_dir()
        .ok_or_else(|| TutorError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("booktutor").join("config.json"))
}

fn load_or_create(config_path: &Path) -> TutorResult<Config> {
    if config_path.exists() {
        let config_str = fs::read_to_string(config_path).map_err(|e| {
            TutorError::config_error(format!("Failed to read config file: {}", e))
        })?;

        return serde_json::from_str(&config_str)
            .map_err(|e| TutorError::config_error(format!("Failed to parse config: {}", e)));
    }

    let config = Config::default();

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TutorError::config_error(format!("Failed to create config directory: {}", e))
        })?;
    }

    let config_str = serde_json::to_string_pretty(&config)?;
    fs::write(config_path, config_str)
        .map_err(|e| TutorError::config_error(format!("Failed to write config file: {}", e)))?;

    Ok(config)
}

fn apply_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup("BOOKTUTOR_BASE_URL") {
        config.base_url = url;
    }
    if let Some(model) = lookup("BOOKTUTOR_MODEL") {
        config.model = if model.is_empty() { None } else { Some(model) };
    }
    if let Some(level) = lookup("BOOKTUTOR_LOG_LEVEL") {
        config.log_level = level.to_lowercase();
    }
}

fn validate_config(config: &Config) -> TutorResult<()> {
    let url = Url::parse(&config.base_url).map_err(|e| {
        TutorError::config_error(format!("Invalid base_url '{}': {}", config.base_url, e))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(TutorError::config_error(format!(
            "base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if !LOG_LEVELS.contains(&config.log_level.as_str()) {
        return Err(TutorError::config_error(format!(
            "log_level must be one of {}",
            LOG_LEVELS.join(", ")
        )));
    }

    if config.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
        return Err(TutorError::config_error("model must not be blank"));
    }

    Ok(())
}
