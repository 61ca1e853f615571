//! Per-language resolution: cache first, remote download page on a miss

use tracing::{error, info};

use crate::cache::CacheIndex;
use crate::error::Result;
use crate::language::{Language, LanguageCatalog};
use crate::matcher::FuzzyMatcher;
use crate::quality::QualityResolver;
use crate::select::Selector;
use crate::video::Video;

/// Receives batch progress, one item at a time
pub trait ProgressReporter {
    /// Called before item `index` (1-based) of `total` is resolved
    fn started(&mut self, index: usize, total: usize, language: &Language);

    /// Called once item `index` has produced a video
    fn resolved(&mut self, _index: usize, _total: usize, _video: &Video) {}
}

/// Discards progress
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn started(&mut self, _index: usize, _total: usize, _language: &Language) {}
}

/// Drives cache lookup and remote resolution for a list of languages
pub struct ResolutionOrchestrator<'a> {
    catalog: &'a LanguageCatalog,
    matcher: FuzzyMatcher<'a>,
    resolver: &'a QualityResolver,
    selector: &'a dyn Selector,
}

impl<'a> ResolutionOrchestrator<'a> {
    pub fn new(
        catalog: &'a LanguageCatalog,
        index: &'a CacheIndex,
        resolver: &'a QualityResolver,
        selector: &'a dyn Selector,
    ) -> Self {
        Self {
            catalog,
            matcher: FuzzyMatcher::new(index),
            resolver,
            selector,
        }
    }

    /// Resolve every language in order, one at a time.
    ///
    /// The first failure aborts the batch; videos resolved before it have
    /// already been handed to `progress`.
    pub async fn resolve_all(
        &self,
        languages: &[Language],
        progress: &mut dyn ProgressReporter,
    ) -> Result<Vec<Video>> {
        let total = languages.len();
        let mut videos = Vec::with_capacity(total);

        for (i, language) in languages.iter().enumerate() {
            progress.started(i + 1, total, language);

            let video = self.resolve_one(language).await.map_err(|e| {
                error!("❌ Resolution failed for {}: {}", language.slug, e);
                e
            })?;

            progress.resolved(i + 1, total, &video);
            videos.push(video);
        }

        info!("🎉 Resolved {} videos", videos.len());
        Ok(videos)
    }

    /// Resolve every language, keeping each failure with its language
    pub async fn resolve_isolated(
        &self,
        languages: &[Language],
        progress: &mut dyn ProgressReporter,
    ) -> Vec<(Language, Result<Video>)> {
        let total = languages.len();
        let mut outcomes = Vec::with_capacity(total);

        for (i, language) in languages.iter().enumerate() {
            progress.started(i + 1, total, language);

            let outcome = self.resolve_one(language).await;
            match &outcome {
                Ok(video) => progress.resolved(i + 1, total, video),
                Err(e) => error!("❌ Resolution failed for {}: {}", language.slug, e),
            }
            outcomes.push((language.clone(), outcome));
        }

        outcomes
    }

    /// Local video when the operator confirms a cached match, remote otherwise
    pub async fn resolve_one(&self, language: &Language) -> Result<Video> {
        if let Some(path) = self.matcher.choose(language, self.selector)? {
            return Ok(Video::local(language.clone(), path));
        }

        let url = self.resolver.resolve(self.catalog, language).await?;
        Ok(Video::remote(language.clone(), url))
    }
}
