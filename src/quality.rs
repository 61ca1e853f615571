//! Download URL resolution from the film's per-language watch page

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::RemoteConfig;
use crate::error::{LoaderError, Result};
use crate::language::{Language, LanguageCatalog};

/// Encoding quality or distribution channel of a downloadable asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTier {
    Highest,
    High,
    DistroHigh,
    Sd,
    DistroLow,
    Low,
    Unknown,
}

impl QualityTier {
    /// Preference order, best first. `Unknown` ranks after all of these.
    pub const PRIORITY: [QualityTier; 6] = [
        QualityTier::Highest,
        QualityTier::High,
        QualityTier::DistroHigh,
        QualityTier::Sd,
        QualityTier::DistroLow,
        QualityTier::Low,
    ];

    pub fn parse(value: &str) -> Self {
        match value {
            "highest" => QualityTier::Highest,
            "high" => QualityTier::High,
            "distroHigh" => QualityTier::DistroHigh,
            "sd" => QualityTier::Sd,
            "distroLow" => QualityTier::DistroLow,
            "low" => QualityTier::Low,
            _ => QualityTier::Unknown,
        }
    }

    fn rank(self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|tier| *tier == self)
            .unwrap_or(Self::PRIORITY.len())
    }
}

/// One downloadable rendition of a language's video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityOption {
    pub tier: QualityTier,
    pub url: String,
}

impl QualityOption {
    pub fn new(tier: &str, url: &str) -> Self {
        Self {
            tier: QualityTier::parse(tier),
            url: url.to_string(),
        }
    }
}

/// Highest-priority option. Among equal tiers the earlier option wins.
pub fn best_option(options: &[QualityOption]) -> Option<&QualityOption> {
    options.iter().min_by_key(|option| option.tier.rank())
}

#[derive(Deserialize)]
struct RawDownload {
    quality: String,
    url: String,
}

const DOWNLOADS_POINTER: &str = "/props/pageProps/content/variant/downloads";

/// Read the download list out of the page's `__NEXT_DATA__` payload
pub fn extract_download_options(html: &str) -> std::result::Result<Vec<QualityOption>, String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script#__NEXT_DATA__").map_err(|e| e.to_string())?;

    let payload = document
        .select(&selector)
        .next()
        .map(|script| script.text().collect::<String>())
        .ok_or_else(|| "page has no __NEXT_DATA__ block".to_string())?;

    let json: serde_json::Value = serde_json::from_str(&payload)
        .map_err(|e| format!("__NEXT_DATA__ is not valid JSON: {}", e))?;

    let downloads = json
        .pointer(DOWNLOADS_POINTER)
        .cloned()
        .ok_or_else(|| format!("payload has no {}", DOWNLOADS_POINTER))?;

    let downloads: Vec<RawDownload> = serde_json::from_value(downloads)
        .map_err(|e| format!("malformed download list: {}", e))?;

    Ok(downloads
        .into_iter()
        .map(|download| QualityOption::new(&download.quality, &download.url))
        .collect())
}

/// Fetches a page body by URL
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// `reqwest` backed page fetcher
#[derive(Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| LoaderError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        info!("📄 Fetching page: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| LoaderError::Http {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(LoaderError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| LoaderError::Http {
            url: url.to_string(),
            source,
        })?;
        debug!("📄 Downloaded {} characters of HTML content", body.len());
        Ok(body)
    }
}

/// Resolves the best download URL for a catalog language
pub struct QualityResolver {
    fetcher: Box<dyn PageFetcher>,
    page_url_template: String,
    dump_path: Option<PathBuf>,
}

impl QualityResolver {
    pub fn new(fetcher: Box<dyn PageFetcher>, config: &RemoteConfig) -> Self {
        Self {
            fetcher,
            page_url_template: config.page_url_template.clone(),
            dump_path: config.dump_path.clone(),
        }
    }

    pub fn page_url(&self, slug: &str) -> String {
        self.page_url_template
            .replace("{slug}", &urlencoding::encode(slug))
    }

    /// Fetch the language's page and return the URL of its best rendition
    pub async fn resolve(&self, catalog: &LanguageCatalog, language: &Language) -> Result<String> {
        if !catalog.contains(&language.slug) {
            return Err(LoaderError::UnknownLanguage {
                slug: language.slug.clone(),
            });
        }

        let url = self.page_url(&language.slug);
        let body = self.fetcher.fetch(&url).await?;

        let no_metadata = |reason: String| LoaderError::NoDownloadMetadata {
            slug: language.slug.clone(),
            url: url.clone(),
            reason,
        };

        let options = match extract_download_options(&body) {
            Ok(options) => options,
            Err(reason) => {
                warn!("No download metadata at {}: {}", url, reason);
                self.dump_body(&body).await;
                return Err(no_metadata(reason));
            }
        };
        debug!("{} download options for {}: {:?}", options.len(), language.slug, options);

        let best = best_option(&options)
            .ok_or_else(|| no_metadata("download list is empty".to_string()))?;

        info!("🌐 Remote video for {} ({:?}): {}", language.slug, best.tier, best.url);
        Ok(best.url.clone())
    }

    async fn dump_body(&self, body: &str) {
        if let Some(path) = &self.dump_path {
            match tokio::fs::write(path, body).await {
                Ok(()) => info!("📝 Wrote raw page to {}", path.display()),
                Err(e) => warn!("Failed to write page dump {}: {}", path.display(), e),
            }
        }
    }
}
