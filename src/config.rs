use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub search: SearchConfig,

    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Path of the XML catalog of extracted records
    pub catalog_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            catalog_path: "data/anime_info.xml".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Result links must start with this prefix (scheme is ignored)
    pub site_prefix: String,

    /// Search result page URLs, tried in order. `{query}` is replaced by the
    /// encoded search term.
    pub providers: Vec<String>,

    pub user_agent: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u32,

    /// Pages fetched at once during a refresh (default: 3)
    pub max_concurrent_lookups: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            site_prefix: "https://www.animenewsnetwork.com/encyclopedia/anime.php".to_string(),
            providers: vec![
                "https://www.google.com/search?q={query}".to_string(),
                "https://www.bing.com/search?q={query}".to_string(),
            ],
            user_agent: "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0"
                .to_string(),
            request_timeout_seconds: 30,
            max_concurrent_lookups: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub table_class: String,

    pub continue_reading_tag: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            table_class: "synopsis".to_string(),
            continue_reading_tag: " <a class=\"continue\" href=\"#\">Continue reading</a>"
                .to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("anninfo").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".anninfo").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.catalog_path.trim().is_empty() {
            anyhow::bail!("Catalog path cannot be empty");
        }

        if self.search.providers.is_empty() {
            anyhow::bail!("At least one search provider must be configured");
        }

        if let Some(provider) = self
            .search
            .providers
            .iter()
            .find(|p| !p.contains("{query}"))
        {
            anyhow::bail!("Search provider '{provider}' has no {{query}} placeholder");
        }

        if self.search.max_concurrent_lookups == 0 {
            anyhow::bail!("max_concurrent_lookups must be > 0");
        }

        Ok(())
    }

    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        PathBuf::from(&self.general.catalog_path)
    }
}
