use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Deserializer};

use crate::pipelines::GenericStrategy;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
pub const DEFAULT_FALLBACK_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.4; rv:125.0) Gecko/20100101 Firefox/125.0";

/// Engine configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EngineConfig {
    /// Request timeout, written in seconds (fractions allowed) in config files
    #[serde(default = "default_timeout", deserialize_with = "seconds")]
    pub timeout: Duration,
    /// Primary browser identity
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Identity used once when the primary one is refused with 403
    #[serde(default = "default_fallback_user_agent")]
    pub fallback_user_agent: String,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
    /// Order of the generic strategies tried after any site-specific one
    #[serde(default = "default_generic_order")]
    pub generic_order: Vec<GenericStrategy>,
    /// Elements inspected after an "Instructions" style heading
    #[serde(default = "default_heading_scan_limit")]
    pub heading_scan_limit: usize,
    /// Keyword containers re-scanned by the container fallback
    #[serde(default = "default_keyword_container_limit")]
    pub keyword_container_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            fallback_user_agent: default_fallback_user_agent(),
            accept_language: default_accept_language(),
            generic_order: default_generic_order(),
            heading_scan_limit: default_heading_scan_limit(),
            keyword_container_limit: default_keyword_container_limit(),
        }
    }
}

// Default value functions
fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn seconds<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_fallback_user_agent() -> String {
    DEFAULT_FALLBACK_USER_AGENT.to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

fn default_generic_order() -> Vec<GenericStrategy> {
    vec![
        GenericStrategy::StructuredData,
        GenericStrategy::Heuristic,
        GenericStrategy::KeywordContainer,
        GenericStrategy::EntryContent,
    ]
}

fn default_heading_scan_limit() -> usize {
    50
}

fn default_keyword_container_limit() -> usize {
    200
}

impl EngineConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_EXTRACT__ prefix
    /// 2. recipe_extract.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_EXTRACT__TIMEOUT=20
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<EngineConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe_extract").required(false))
        // Use double underscore for nested keys
        .add_source(
            Environment::with_prefix("RECIPE_EXTRACT")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("generic_order")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
