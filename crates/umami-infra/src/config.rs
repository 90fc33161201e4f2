//! Configuration loader for Umami.
//!
//! Reads `config.toml` from the data directory (`~/.umami/` in production)
//! and deserializes it into [`AppConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use umami_types::config::AppConfig;
use umami_types::error::ConfigError;

/// Overrides the data directory.
pub const DATA_DIR_ENV: &str = "UMAMI_DATA_DIR";

/// API key for the OpenAI-compatible endpoint.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Resolve the data directory.
///
/// Checks `UMAMI_DATA_DIR` first, then falls back to `~/.umami`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".umami");
    }

    PathBuf::from(".umami")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`AppConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Resolve a configured path: absolute paths are kept, relative ones are
/// joined onto the data directory.
pub fn resolve_path(data_dir: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    }
}

/// Directory of the LanceDB store holding the restaurant chunk tables.
pub fn vector_store_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("vector_store")
}

/// Read the API key from `OPENAI_API_KEY`.
pub fn api_key_from_env() -> Result<SecretString, ConfigError> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(SecretString::from(key)),
        _ => Err(ConfigError::MissingEnv(API_KEY_ENV)),
    }
}
