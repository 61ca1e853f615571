use async_trait::async_trait;
use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::fs;

use mpk_loader::config::CacheConfig;
use mpk_loader::select::{SelectOption, Selector};
use mpk_loader::{
    CacheIndex, Config, Language, LanguageCatalog, LoaderError, PageFetcher, ProgressReporter,
    QualityResolver, ResolutionOrchestrator, Result, Video,
};

const CATALOG: &str = r#"{
    "data": { "video": { "variantLanguagesWithSlug": [
        { "language": { "slug": "french", "name": [ { "value": "Français" } ] } },
        { "language": { "slug": "tagalog", "name": [ { "value": "Tagalog" } ] } }
    ] } }
}"#;

fn watch_page(downloads: &str) -> String {
    format!(
        r#"<html><body><script id="__NEXT_DATA__" type="application/json">{{"props":{{"pageProps":{{"content":{{"variant":{{"downloads":{}}}}}}}}}}}</script></body></html>"#,
        downloads
    )
}

/// Serves one page body and records every requested URL
struct RecordingFetcher {
    body: String,
    requested: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl PageFetcher for RecordingFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requested.lock().unwrap().push(url.to_string());
        Ok(self.body.clone())
    }
}

/// Picks the top match and remembers what it was shown
struct TopMatch {
    headers: RefCell<Vec<String>>,
}

impl Selector for TopMatch {
    fn select(&self, header: &str, options: &[SelectOption]) -> Result<Option<usize>> {
        self.headers.borrow_mut().push(header.to_string());
        Ok(Some(if options.len() > 1 { 1 } else { 0 }))
    }
}

/// Terminal that closes whenever a choice is requested
struct ClosedTerminal;

impl Selector for ClosedTerminal {
    fn select(&self, header: &str, _options: &[SelectOption]) -> Result<Option<usize>> {
        Err(LoaderError::SelectionFailed {
            context: header.to_string(),
            reason: "terminal closed".to_string(),
        })
    }
}

#[derive(Default)]
struct Recorder {
    started: Vec<(usize, usize, String)>,
    resolved: Vec<Video>,
}

impl ProgressReporter for Recorder {
    fn started(&mut self, index: usize, total: usize, language: &Language) {
        self.started.push((index, total, language.slug.clone()));
    }

    fn resolved(&mut self, _index: usize, _total: usize, video: &Video) {
        self.resolved.push(video.clone());
    }
}

struct Fixture {
    _temp_dir: TempDir,
    catalog: LanguageCatalog,
    index: CacheIndex,
    resolver: QualityResolver,
    requested: Arc<Mutex<Vec<String>>>,
}

async fn fixture(page_body: String) -> Fixture {
    let temp_dir = TempDir::new().unwrap();
    let videos = temp_dir.path().join("videos");
    fs::create_dir_all(&videos).await.unwrap();
    fs::write(videos.join("JESUS_French.mp4"), b"video").await.unwrap();
    fs::write(videos.join("JESUS_Spanish.mp4"), b"video").await.unwrap();
    fs::write(videos.join("notes_French.mp4"), b"video").await.unwrap();

    let catalog_path = temp_dir.path().join("languages.json");
    fs::write(&catalog_path, CATALOG).await.unwrap();
    let catalog = LanguageCatalog::load(&catalog_path).await.unwrap();

    let index = CacheIndex::scan(&CacheConfig {
        root: videos,
        ..CacheConfig::default()
    })
    .await
    .unwrap();

    let requested = Arc::new(Mutex::new(Vec::new()));
    let fetcher = RecordingFetcher {
        body: page_body,
        requested: requested.clone(),
    };
    let resolver = QualityResolver::new(Box::new(fetcher), &Config::default().remote);

    Fixture {
        _temp_dir: temp_dir,
        catalog,
        index,
        resolver,
        requested,
    }
}

#[tokio::test]
async fn test_local_then_unknown_language_aborts_batch() {
    let f = fixture(watch_page("[]")).await;
    let selector = TopMatch { headers: RefCell::new(Vec::new()) };
    let orchestrator = ResolutionOrchestrator::new(&f.catalog, &f.index, &f.resolver, &selector);

    let requested = vec![
        f.catalog.get("french").unwrap().clone(),
        Language::new("klingon", "Klingon"),
    ];
    let mut progress = Recorder::default();
    let result = orchestrator.resolve_all(&requested, &mut progress).await;

    assert!(matches!(result, Err(LoaderError::UnknownLanguage { ref slug }) if slug == "klingon"));

    assert_eq!(progress.resolved.len(), 1);
    let french = &progress.resolved[0];
    assert!(french.is_local());
    assert!(french
        .local_path()
        .unwrap()
        .ends_with(PathBuf::from("videos/JESUS_French.mp4")));

    assert_eq!(
        progress.started,
        vec![(1, 2, "french".to_string()), (2, 2, "klingon".to_string())]
    );
    assert!(f.requested.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cache_miss_resolves_remote_url() {
    let page = watch_page(
        r#"[{"quality":"low","url":"https://cdn/tl-low.mp4"},{"quality":"high","url":"https://cdn/tl-high.mp4"}]"#,
    );
    let f = fixture(page).await;
    let selector = TopMatch { headers: RefCell::new(Vec::new()) };
    let orchestrator = ResolutionOrchestrator::new(&f.catalog, &f.index, &f.resolver, &selector);

    let tagalog = f.catalog.get("tagalog").unwrap().clone();
    let videos = orchestrator
        .resolve_all(&[tagalog], &mut Recorder::default())
        .await
        .unwrap();

    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].remote_url(), Some("https://cdn/tl-high.mp4"));
    assert!(selector.headers.borrow().is_empty());
    assert_eq!(
        f.requested.lock().unwrap().as_slice(),
        ["https://www.jesusfilm.org/watch/jesus.html/tagalog.html"]
    );
}

#[tokio::test]
async fn test_isolated_batch_keeps_going_after_failure() {
    let f = fixture("<html>rate limited</html>".to_string()).await;
    let selector = TopMatch { headers: RefCell::new(Vec::new()) };
    let orchestrator = ResolutionOrchestrator::new(&f.catalog, &f.index, &f.resolver, &selector);

    let requested = vec![
        Language::new("klingon", "Klingon"),
        f.catalog.get("tagalog").unwrap().clone(),
        f.catalog.get("french").unwrap().clone(),
    ];
    let outcomes = orchestrator
        .resolve_isolated(&requested, &mut Recorder::default())
        .await;

    assert_eq!(outcomes.len(), 3);
    assert!(matches!(outcomes[0].1, Err(LoaderError::UnknownLanguage { .. })));
    assert!(matches!(outcomes[1].1, Err(LoaderError::NoDownloadMetadata { .. })));
    assert!(outcomes[2].1.as_ref().unwrap().is_local());
    assert_eq!(outcomes[2].0.slug, "french");
}

#[tokio::test]
async fn test_french_ranks_cached_candidates() {
    let f = fixture(watch_page("[]")).await;
    let ranked = mpk_loader::FuzzyMatcher::new(&f.index).rank(f.catalog.get("french").unwrap());

    // notes_French.mp4 lacks the cache marker and never enters the index
    assert_eq!(f.index.len(), 2);
    assert_eq!(ranked.len(), 1);
    assert!(ranked[0].entry.ends_with("JESUS_French.mp4"));
}

#[tokio::test]
async fn test_selection_failure_aborts_batch() {
    let f = fixture(watch_page(r#"[{"quality":"high","url":"https://cdn/tl-high.mp4"}]"#)).await;
    let orchestrator = ResolutionOrchestrator::new(&f.catalog, &f.index, &f.resolver, &ClosedTerminal);

    let requested = vec![
        f.catalog.get("french").unwrap().clone(),
        f.catalog.get("tagalog").unwrap().clone(),
    ];
    let mut progress = Recorder::default();
    let result = orchestrator.resolve_all(&requested, &mut progress).await;

    assert!(matches!(
        result,
        Err(LoaderError::SelectionFailed { ref context, .. }) if context.contains("Français")
    ));
    assert_eq!(progress.started, vec![(1, 2, "french".to_string())]);
    assert!(progress.resolved.is_empty());
    assert!(f.requested.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_selection_failure_is_isolated_per_language() {
    let f = fixture(watch_page(r#"[{"quality":"high","url":"https://cdn/tl-high.mp4"}]"#)).await;
    let orchestrator = ResolutionOrchestrator::new(&f.catalog, &f.index, &f.resolver, &ClosedTerminal);

    let requested = vec![
        f.catalog.get("french").unwrap().clone(),
        f.catalog.get("tagalog").unwrap().clone(),
    ];
    let outcomes = orchestrator
        .resolve_isolated(&requested, &mut Recorder::default())
        .await;

    assert_eq!(outcomes.len(), 2);
    assert!(matches!(outcomes[0].1, Err(LoaderError::SelectionFailed { .. })));
    assert_eq!(
        outcomes[1].1.as_ref().unwrap().remote_url(),
        Some("https://cdn/tl-high.mp4")
    );
}
