//! Full-screen text shown around the interactive widgets

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};
use tracing::warn;

use crate::language::Language;
use crate::orchestrator::ProgressReporter;
use crate::style::{BOLD, CYAN, DIM, MAGENTA, RESET};
use crate::video::Video;

pub fn banner() -> String {
    format!(
        "\n\n                            {BOLD}MPK Loader{RESET}\n  \
         A cool tool for loading {CYAN}{BOLD}Jesus Film Videos{RESET} for the {MAGENTA}{BOLD}MPK project{RESET}.\n  \
         {DIM}by {BOLD}@Lukas1h                                           [ v{} ]{RESET}\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// `  [i/n] [████      ]` with `width` cells between the brackets
pub fn progress_line(index: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (width * index.min(total)) / total
    };
    format!(
        "  [{}/{}] [{}{}]",
        index,
        total,
        "█".repeat(filled),
        " ".repeat(width - filled)
    )
}

pub fn languages_added(languages: &[Language]) -> String {
    let slugs: Vec<&str> = languages.iter().map(|l| l.slug.as_str()).collect();
    format!("  {BOLD}Languages Added: {DIM}[{}]{RESET}", slugs.join(", "))
}

pub fn summary(videos: &[Video]) -> String {
    let local = videos.iter().filter(|v| v.is_local()).count();
    let remote: Vec<&str> = videos
        .iter()
        .filter(|v| !v.is_local())
        .map(|v| v.language.slug.as_str())
        .collect();

    format!(
        "  Found {BOLD}{}{RESET} local videos and {BOLD}{}{RESET} remote videos.\n  \
         {BOLD}Ready to download:{RESET}{DIM} {}{RESET}?",
        local,
        remote.len(),
        remote.join(", ")
    )
}

/// Clear the terminal and move the cursor home
pub fn clear<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

/// Redraws banner and progress bar before each item
pub struct TerminalProgress<W: Write> {
    out: W,
    bar_width: usize,
}

impl<W: Write> TerminalProgress<W> {
    pub fn new(out: W, bar_width: usize) -> Self {
        Self { out, bar_width }
    }

    fn draw(&mut self, index: usize, total: usize) -> io::Result<()> {
        clear(&mut self.out)?;
        writeln!(self.out, "{}", banner())?;
        writeln!(self.out, "{}", progress_line(index, total, self.bar_width))?;
        self.out.flush()
    }
}

impl<W: Write> ProgressReporter for TerminalProgress<W> {
    fn started(&mut self, index: usize, total: usize, _language: &Language) {
        if let Err(e) = self.draw(index, total) {
            warn!("Failed to draw progress: {}", e);
        }
    }
}
