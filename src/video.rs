use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::language::Language;

/// Where a language's video comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VideoSource {
    Local { path: PathBuf },
    Remote { url: String },
}

/// Resolved video reference for one requested language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub language: Language,
    pub source: VideoSource,
}

impl Video {
    pub fn local(language: Language, path: PathBuf) -> Self {
        Self {
            language,
            source: VideoSource::Local { path },
        }
    }

    pub fn remote(language: Language, url: String) -> Self {
        Self {
            language,
            source: VideoSource::Remote { url },
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self.source, VideoSource::Local { .. })
    }

    pub fn local_path(&self) -> Option<&Path> {
        match &self.source {
            VideoSource::Local { path } => Some(path),
            VideoSource::Remote { .. } => None,
        }
    }

    pub fn remote_url(&self) -> Option<&str> {
        match &self.source {
            VideoSource::Local { .. } => None,
            VideoSource::Remote { url } => Some(url),
        }
    }

    /// Path or URL, whichever this video carries
    pub fn reference(&self) -> String {
        match &self.source {
            VideoSource::Local { path } => path.display().to_string(),
            VideoSource::Remote { url } => url.clone(),
        }
    }
}
