//! Language catalog loaded once at startup

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{LoaderError, Result};

/// A language the film is available in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Stable identifier, unique within a catalog
    pub slug: String,
    /// Localized display name
    pub name: String,
}

impl Language {
    pub fn new(slug: &str, name: &str) -> Self {
        Self {
            slug: slug.to_string(),
            name: name.to_string(),
        }
    }
}

// Shape of the catalog document:
// data.video.variantLanguagesWithSlug[].language.{slug, name[].value}
#[derive(Deserialize)]
struct CatalogDocument {
    data: CatalogData,
}

#[derive(Deserialize)]
struct CatalogData {
    video: CatalogVideo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogVideo {
    variant_languages_with_slug: Vec<CatalogVariant>,
}

#[derive(Deserialize)]
struct CatalogVariant {
    language: CatalogLanguage,
}

#[derive(Deserialize)]
struct CatalogLanguage {
    slug: String,
    name: Vec<CatalogName>,
}

#[derive(Deserialize)]
struct CatalogName {
    value: String,
}

/// Read-only list of every language the catalog offers
#[derive(Debug, Clone, Default)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

impl LanguageCatalog {
    pub fn new(languages: Vec<Language>) -> Self {
        Self { languages }
    }

    /// Load the catalog document from disk
    pub async fn load(path: &Path) -> Result<Self> {
        info!("📚 Loading language catalog from: {}", path.display());

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LoaderError::Catalog {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let catalog = Self::parse(&content).map_err(|reason| LoaderError::Catalog {
            path: path.to_path_buf(),
            reason,
        })?;

        info!("✅ Loaded {} languages", catalog.len());
        Ok(catalog)
    }

    /// Parse a catalog document, taking the first name variant as display name
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let document: CatalogDocument =
            serde_json::from_str(content).map_err(|e| e.to_string())?;

        let languages = document
            .data
            .video
            .variant_languages_with_slug
            .into_iter()
            .map(|variant| {
                let CatalogLanguage { slug, name } = variant.language;
                match name.into_iter().next() {
                    Some(first) => Ok(Language { slug, name: first.value }),
                    None => Err(format!("language \"{}\" has no name", slug)),
                }
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { languages })
    }

    /// Languages whose slug or name contains `query`, case-insensitively
    pub fn search(&self, query: &str) -> Result<Vec<Language>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LoaderError::EmptyQuery);
        }

        let lower_query = query.to_lowercase();
        let matches: Vec<Language> = self
            .languages
            .iter()
            .filter(|language| {
                language.slug.to_lowercase().contains(&lower_query)
                    || language.name.to_lowercase().contains(&lower_query)
            })
            .cloned()
            .collect();

        debug!("Query \"{}\" matched {} languages", query, matches.len());
        Ok(matches)
    }

    pub fn get(&self, slug: &str) -> Option<&Language> {
        self.languages.iter().find(|language| language.slug == slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.get(slug).is_some()
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
