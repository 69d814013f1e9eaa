use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Base URL of the recipe API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout in seconds; requests race against this deadline
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Number of search results per page
    #[serde(default = "default_results_per_page")]
    pub results_per_page: usize,
    /// API key appended to uploads; recipes created with it are tagged as user-owned
    #[serde(default)]
    pub key: Option<String>,
    /// Path of the JSON record holding persisted bookmarks
    #[serde(default = "default_bookmarks_path")]
    pub bookmarks_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout: default_timeout(),
            results_per_page: default_results_per_page(),
            key: None,
            bookmarks_path: default_bookmarks_path(),
        }
    }
}

// Default value functions
fn default_api_url() -> String {
    "https://forkify-api.herokuapp.com/api/v2/recipes".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_results_per_page() -> usize {
    10
}

fn default_bookmarks_path() -> String {
    "bookmarks.json".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPES__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPES__RESULTS_PER_PAGE
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("RECIPES")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
