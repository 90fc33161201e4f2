//! Application configuration types for Umami.
//!
//! `AppConfig` represents the `config.toml` in the data directory. Every
//! section and field is optional in the file and falls back to a default.

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from `{data_dir}/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub restaurants: RestaurantsConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// HTTP listener settings for `umami serve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Where the restaurant records live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantsConfig {
    /// Path to the restaurants JSON file. Relative paths resolve against
    /// the data directory.
    #[serde(default = "default_restaurants_path")]
    pub path: String,
}

fn default_restaurants_path() -> String {
    "restaurants.json".to_string()
}

impl Default for RestaurantsConfig {
    fn default() -> Self {
        Self {
            path: default_restaurants_path(),
        }
    }
}

/// OpenAI-compatible endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: f64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            embedding_model: default_embedding_model(),
            max_tokens: default_max_tokens(),
            temperature: 0.0,
        }
    }
}

/// Similarity search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of chunks placed in the prompt context.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    4
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

/// Assistant persona settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Name used in the prompt when neither a record nor the request names
    /// the restaurant.
    #[serde(default = "default_restaurant_name")]
    pub default_restaurant_name: String,
}

fn default_restaurant_name() -> String {
    "our restaurant".to_string()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            default_restaurant_name: default_restaurant_name(),
        }
    }
}
