//! Index of cached video files, built once per run

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::CacheConfig;
use crate::error::{LoaderError, Result};

/// Ordered list of cached video paths.
///
/// Order is the directory walk order with siblings sorted by file name. Match
/// ranking relies on it as the tie-break between equal scores.
#[derive(Debug, Clone, Default)]
pub struct CacheIndex {
    entries: Vec<PathBuf>,
}

impl CacheIndex {
    pub fn from_entries(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    /// Scan the cache root recursively for video files carrying the marker
    pub async fn scan(config: &CacheConfig) -> Result<Self> {
        if !config.root.is_dir() {
            return Err(LoaderError::CacheDirectoryMissing {
                path: config.root.clone(),
            });
        }

        let root = tokio::fs::canonicalize(&config.root).await?;
        info!("🔍 Scanning video cache: {}", root.display());

        let marker = config.marker.to_lowercase();
        let extensions: Vec<String> = config
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect();

        let entries = tokio::task::spawn_blocking(move || walk(&root, &marker, &extensions))
            .await
            .map_err(|e| LoaderError::Io(std::io::Error::other(e)))?;

        info!("📹 Found {} cached videos", entries.len());
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn walk(root: &Path, marker: &str, extensions: &[String]) -> Vec<PathBuf> {
    let mut videos = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable cache entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let has_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false);
        let has_marker = entry
            .file_name()
            .to_string_lossy()
            .to_lowercase()
            .contains(marker);

        if has_extension && has_marker {
            debug!("  - {}", path.display());
            videos.push(path.to_path_buf());
        }
    }

    videos
}
