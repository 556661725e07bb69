use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Scrape and snapshot configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Site root; listing page identifiers are appended to it verbatim
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Listing pages to scrape, in order
    #[serde(default = "default_pages")]
    pub pages: Vec<String>,
    /// URL path segment to category display label
    #[serde(default = "default_categories")]
    pub categories: HashMap<String, String>,
    /// Where the catalog snapshot is written and read
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            pages: default_pages(),
            categories: default_categories(),
            snapshot_path: default_snapshot_path(),
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://iba-world.com/".to_string()
}

fn default_pages() -> Vec<String> {
    vec![
        "iba-cocktails".to_string(),
        "contemporary-classics".to_string(),
        "new-era-drinks".to_string(),
    ]
}

fn default_categories() -> HashMap<String, String> {
    [
        ("iba-official-cocktails", "The Unforgettables"),
        ("cocktails", "Contemporary Classics"),
        ("new-era-drinks", "New Era Drinks"),
    ]
    .into_iter()
    .map(|(key, label)| (key.to_string(), label.to_string()))
    .collect()
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("Cocktails.json")
}

fn default_timeout() -> u64 {
    30
}

impl CatalogConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with COCKTAILS__ prefix
    /// 2. cocktails.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: COCKTAILS__SNAPSHOT_PATH
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
///
/// See [`CatalogConfig::load`] for the source priority.
pub fn load_config() -> Result<CatalogConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("cocktails").required(false))
        // Use double underscore for nested: COCKTAILS__CATEGORIES__COCKTAILS
        .add_source(
            Environment::with_prefix("COCKTAILS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
