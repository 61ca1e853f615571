use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{LoaderError, Result};
use crate::style::{BOLD, DIM, RESET};

/// Configuration for the MPK loader
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Language catalog settings
    pub catalog: CatalogConfig,

    /// Local video cache settings
    pub cache: CacheConfig,

    /// Remote download page settings
    pub remote: RemoteConfig,

    /// Interactive selector settings
    pub selector: SelectorConfig,

    /// Terminal surface settings
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the language catalog JSON document
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Root directory scanned for cached videos
    pub root: PathBuf,

    /// Case-insensitive token every cached file name must contain
    pub marker: String,

    /// Accepted video file extensions
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Page address template, `{slug}` is replaced by the language slug
    pub page_url_template: String,

    /// HTTP request timeout in seconds
    pub request_timeout_seconds: u64,

    /// User agent sent with page requests
    pub user_agent: String,

    /// Where to write the raw body of a page that lacks download metadata
    pub dump_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Rows shown per page in selection lists
    pub per_page: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Compositor grid width
    pub columns: u16,

    /// Compositor grid height
    pub rows: u16,

    /// Delay between rendered frames
    pub tick_interval_ms: u64,

    /// Width of the batch progress bar
    pub progress_bar_width: usize,

    /// Components drawn by the splash screen
    pub components: Vec<ComponentConfig>,
}

/// A screen component as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComponentConfig {
    pub content: String,
    pub alignment_horizontal: String,
    pub alignment_vertical: String,
    pub padding: u16,
    pub margin: u16,
    pub x: Option<i32>,
    pub y: Option<i32>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("languages.json"),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("videos"),
            marker: "jesus".to_string(),
            extensions: vec!["mp4".to_string()],
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            page_url_template: "https://www.jesusfilm.org/watch/jesus.html/{slug}.html".to_string(),
            request_timeout_seconds: 30,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            dump_path: None,
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self { per_page: 5 }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            columns: 96,
            rows: 12,
            tick_interval_ms: 1000,
            progress_bar_width: 50,
            components: default_splash_components(),
        }
    }
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            content: String::new(),
            alignment_horizontal: "center".to_string(),
            alignment_vertical: "center".to_string(),
            padding: 0,
            margin: 0,
            x: None,
            y: None,
        }
    }
}

fn default_splash_components() -> Vec<ComponentConfig> {
    vec![
        ComponentConfig {
            content: format!("{BOLD}MPK Loader{RESET}"),
            y: Some(2),
            ..Default::default()
        },
        ComponentConfig {
            content: format!(
                "{DIM}A cool tool for loading {BOLD}Jesus Film Videos{DIM} for the {BOLD}MPK project.{RESET}"
            ),
            y: Some(3),
            ..Default::default()
        },
        ComponentConfig {
            content: "|\n|\n|\n|".to_string(),
            y: Some(6),
            ..Default::default()
        },
    ]
}

impl Config {
    /// Load configuration from an explicit file, the usual locations, or defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => Self::discover().unwrap_or_default(),
        };

        config.apply_env();
        Ok(config)
    }

    fn discover() -> Option<Self> {
        let config_paths = ["mpk-loader.toml", "config/mpk-loader.toml"];

        for path in config_paths {
            let path = Path::new(path);
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(config) => return Some(config),
                Err(e) => tracing::warn!("Failed to parse config file {}: {}", path.display(), e),
            }
        }

        None
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config = toml::from_str(&config_str)
            .map_err(|e| LoaderError::Config(format!("cannot parse {}: {}", path.display(), e)))?;
        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Override values with environment variables
    pub fn apply_env(&mut self) {
        if let Ok(cache_dir) = std::env::var("MPK_LOADER_CACHE_DIR") {
            self.cache.root = PathBuf::from(cache_dir);
        }

        if let Ok(catalog) = std::env::var("MPK_LOADER_CATALOG") {
            self.catalog.path = PathBuf::from(catalog);
        }

        if let Ok(dump) = std::env::var("MPK_LOADER_DUMP_PATH") {
            self.remote.dump_path = Some(PathBuf::from(dump));
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.display.columns == 0 || self.display.rows == 0 {
            return Err(LoaderError::Config("display grid must be at least 1x1".to_string()));
        }

        if self.display.tick_interval_ms == 0 {
            return Err(LoaderError::Config("tick_interval_ms must be greater than 0".to_string()));
        }

        if self.cache.extensions.is_empty() {
            return Err(LoaderError::Config("at least one cache extension is required".to_string()));
        }

        if !self.remote.page_url_template.contains("{slug}") {
            return Err(LoaderError::Config(
                "page_url_template must contain {slug}".to_string(),
            ));
        }

        Url::parse(&self.remote.page_url_template.replace("{slug}", "probe"))
            .map_err(|e| LoaderError::Config(format!("page_url_template is not a URL: {}", e)))?;

        tracing::debug!("Configuration validation passed");
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = toml::to_string_pretty(self)
            .map_err(|e| LoaderError::Config(e.to_string()))?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path.display());
        Ok(())
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_cache_root(mut self, root: PathBuf) -> Self {
        self.config.cache.root = root;
        self
    }

    pub fn with_catalog(mut self, path: PathBuf) -> Self {
        self.config.catalog.path = path;
        self
    }

    pub fn with_marker(mut self, marker: &str) -> Self {
        self.config.cache.marker = marker.to_string();
        self
    }

    pub fn with_page_url_template(mut self, template: &str) -> Self {
        self.config.remote.page_url_template = template.to_string();
        self
    }

    pub fn with_grid(mut self, columns: u16, rows: u16) -> Self {
        self.config.display.columns = columns;
        self.config.display.rows = rows;
        self
    }

    pub fn with_components(mut self, components: Vec<ComponentConfig>) -> Self {
        self.config.display.components = components;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
