use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mpk_loader::orchestrator::SilentProgress;
use mpk_loader::screen::{self, TerminalProgress};
use mpk_loader::select::{TerminalSelector, TopChoiceSelector};
use mpk_loader::session::Session;
use mpk_loader::{
    CacheIndex, Compositor, Config, HttpPageFetcher, Language, LanguageCatalog, QualityResolver,
    RenderTask, ResolutionOrchestrator,
};

#[derive(Parser)]
#[command(name = "mpk-loader")]
#[command(version, about = "Assemble localized JESUS film videos for the MPK project")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to mpk-loader.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding cached videos
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Language catalog JSON document
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick languages interactively and resolve their videos (default)
    Load,
    /// Resolve the given language slugs without prompting
    Resolve {
        /// Language slugs, e.g. "french"
        #[arg(required = true)]
        slugs: Vec<String>,
        /// Keep going when a language fails
        #[arg(long)]
        isolate: bool,
    },
    /// Show the splash screen until interrupted
    Splash,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "mpk_loader=debug"
    } else {
        "mpk_loader=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(cache_dir) = cli.cache_dir {
        config.cache.root = cache_dir;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog.path = catalog;
    }
    config.validate().context("Invalid configuration")?;

    match cli.command.unwrap_or(Commands::Load) {
        Commands::Load => load(&config).await,
        Commands::Resolve { slugs, isolate } => resolve(&config, &slugs, isolate).await,
        Commands::Splash => splash(&config).await,
    }
}

async fn startup(config: &Config) -> Result<(LanguageCatalog, CacheIndex, QualityResolver)> {
    let catalog = LanguageCatalog::load(&config.catalog.path)
        .await
        .context("Failed to load language catalog")?;
    let index = CacheIndex::scan(&config.cache)
        .await
        .context("Failed to scan video cache")?;
    let fetcher = HttpPageFetcher::new(&config.remote).context("Failed to set up HTTP client")?;
    let resolver = QualityResolver::new(Box::new(fetcher), &config.remote);

    info!("🚀 {} languages, {} cached videos", catalog.len(), index.len());
    Ok((catalog, index, resolver))
}

async fn load(config: &Config) -> Result<()> {
    let (catalog, index, resolver) = startup(config).await?;
    let terminal = TerminalSelector::new(config.selector.per_page);

    let languages = Session::new(&catalog, &terminal, &terminal, io::stdout()).collect()?;
    if languages.is_empty() {
        info!("No languages selected");
        return Ok(());
    }

    let orchestrator = ResolutionOrchestrator::new(&catalog, &index, &resolver, &terminal);
    let mut progress = TerminalProgress::new(io::stdout(), config.display.progress_bar_width);
    let videos = orchestrator.resolve_all(&languages, &mut progress).await?;

    let mut out = io::stdout();
    screen::clear(&mut out)?;
    writeln!(out, "{}", screen::banner())?;
    writeln!(out, "{}", screen::summary(&videos))?;
    Ok(())
}

async fn resolve(config: &Config, slugs: &[String], isolate: bool) -> Result<()> {
    let (catalog, index, resolver) = startup(config).await?;

    // slugs outside the catalog still go through resolution so they fail there
    let languages: Vec<Language> = slugs
        .iter()
        .map(|slug| {
            catalog
                .get(slug)
                .cloned()
                .unwrap_or_else(|| Language::new(slug, slug))
        })
        .collect();

    let orchestrator = ResolutionOrchestrator::new(&catalog, &index, &resolver, &TopChoiceSelector);

    if isolate {
        let outcomes = orchestrator
            .resolve_isolated(&languages, &mut SilentProgress)
            .await;
        let mut videos = Vec::new();
        for (language, outcome) in outcomes {
            match outcome {
                Ok(video) => videos.push(video),
                Err(e) => error!("{}: {}", language.slug, e),
            }
        }
        println!("{}", serde_json::to_string_pretty(&videos)?);
    } else {
        let videos = orchestrator
            .resolve_all(&languages, &mut SilentProgress)
            .await?;
        println!("{}", serde_json::to_string_pretty(&videos)?);
    }

    Ok(())
}

async fn splash(config: &Config) -> Result<()> {
    let compositor = Compositor::from_config(&config.display).context("Invalid screen layout")?;
    let task = RenderTask::new(
        compositor,
        Duration::from_millis(config.display.tick_interval_ms),
    );

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    let mut out = io::stdout();
    task.run(&mut out, &cancel).await?;
    writeln!(out)?;
    Ok(())
}
