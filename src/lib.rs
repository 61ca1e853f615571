//! MPK Loader
//!
//! Builds the list of localized JESUS film videos for the MPK project: each
//! requested language is matched against a local video cache and, when no
//! cached file is confirmed, resolved to the best remote download URL.

pub mod cache;
pub mod compositor;
pub mod config;
pub mod error;
pub mod language;
pub mod matcher;
pub mod orchestrator;
pub mod quality;
pub mod screen;
pub mod select;
pub mod session;
pub mod style;
pub mod terms;
pub mod video;

// Re-export main types for easy access
pub use crate::cache::CacheIndex;
pub use crate::compositor::{Compositor, RenderTask};
pub use crate::config::Config;
pub use crate::error::{LoaderError, Result};
pub use crate::language::{Language, LanguageCatalog};
pub use crate::matcher::{FuzzyMatcher, MatchResult};
pub use crate::orchestrator::{ProgressReporter, ResolutionOrchestrator};
pub use crate::quality::{HttpPageFetcher, PageFetcher, QualityOption, QualityResolver, QualityTier};
pub use crate::video::{Video, VideoSource};
