use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cache::CacheIndex;
use crate::language::Language;
use crate::select::{SelectOption, Selector};
use crate::terms::{label_terms, normalize};
use crate::error::Result;

/// A cached file together with its term overlap score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub entry: PathBuf,
    pub score: usize,
}

/// Maps a language onto cached files by term overlap
pub struct FuzzyMatcher<'a> {
    index: &'a CacheIndex,
}

impl<'a> FuzzyMatcher<'a> {
    pub fn new(index: &'a CacheIndex) -> Self {
        Self { index }
    }

    /// Score every cache entry against the language, best first.
    ///
    /// Zero-score entries are dropped. Equal scores keep cache index order.
    pub fn rank(&self, language: &Language) -> Vec<MatchResult> {
        let query_terms = query_terms(language);
        debug!("Query terms for {}: {:?}", language.slug, query_terms);

        let mut matches: Vec<MatchResult> = self
            .index
            .entries()
            .iter()
            .filter_map(|entry| {
                let score = score_entry(&query_terms, entry);
                (score > 0).then(|| MatchResult {
                    entry: entry.clone(),
                    score,
                })
            })
            .collect();

        // sort_by is stable
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches
    }

    /// Rank the cache and let the operator pick one entry.
    ///
    /// Returns `Ok(None)` when nothing scores above zero, when the operator
    /// chooses the leading "None" row, or when the selection is dismissed.
    pub fn choose(&self, language: &Language, selector: &dyn Selector) -> Result<Option<PathBuf>> {
        let matches = self.rank(language);
        if matches.is_empty() {
            info!("No cached video matches \"{}\"", language.name);
            return Ok(None);
        }

        info!(
            "Found {} matching videos for language \"{}\"",
            matches.len(),
            language.name
        );

        let mut options = Vec::with_capacity(matches.len() + 1);
        options.push(SelectOption::new("None. "));
        options.extend(matches.iter().map(|m| {
            SelectOption::new(&m.entry.to_string_lossy())
                .with_description(&format!("Score: {}", m.score))
        }));

        let header = format!("Select Video for {}", language.name);
        let chosen = match selector.select(&header, &options)? {
            None | Some(0) => None,
            Some(index) => matches.get(index - 1).map(|m| m.entry.clone()),
        };

        if let Some(path) = &chosen {
            info!("✅ Using cached video for {}: {}", language.slug, path.display());
        }
        Ok(chosen)
    }
}

/// Distinct tokens of the language slug and name
fn query_terms(language: &Language) -> Vec<String> {
    let mut seen = HashSet::new();
    label_terms(&language.slug)
        .into_iter()
        .chain(label_terms(&language.name))
        .filter(|term| seen.insert(term.clone()))
        .collect()
}

/// Count query terms that contain, or are contained in, some file name token
fn score_entry(query_terms: &[String], entry: &Path) -> usize {
    let filename = entry
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let file_terms = normalize(&filename);

    query_terms
        .iter()
        .filter(|term| {
            file_terms
                .iter()
                .any(|file_term| file_term.contains(term.as_str()) || term.contains(file_term.as_str()))
        })
        .count()
}
