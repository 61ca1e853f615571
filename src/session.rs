use std::io::Write;
use tracing::{info, warn};

use crate::error::Result;
use crate::language::{Language, LanguageCatalog};
use crate::screen;
use crate::select::{LinePrompt, SelectOption, Selector};

/// Interactive loop that collects the languages to load.
///
/// The chosen languages accumulate in the session and are handed back by
/// [`Session::collect`]; nothing outside the session is mutated.
pub struct Session<'a, W: Write> {
    catalog: &'a LanguageCatalog,
    prompt: &'a dyn LinePrompt,
    selector: &'a dyn Selector,
    out: W,
}

impl<'a, W: Write> Session<'a, W> {
    pub fn new(
        catalog: &'a LanguageCatalog,
        prompt: &'a dyn LinePrompt,
        selector: &'a dyn Selector,
        out: W,
    ) -> Self {
        Self {
            catalog,
            prompt,
            selector,
            out,
        }
    }

    /// Prompt for languages until the operator submits an empty line
    pub fn collect(&mut self) -> Result<Vec<Language>> {
        let mut chosen: Vec<Language> = Vec::new();
        let mut notice: Option<String> = None;

        loop {
            self.draw(&chosen, notice.take())?;

            let query = match self.prompt.prompt("Language") {
                Ok(Some(query)) => query,
                Ok(None) => break,
                Err(e) => {
                    warn!("Prompt closed: {}", e);
                    break;
                }
            };

            let matches = match self.catalog.search(&query) {
                Ok(matches) => matches,
                Err(e) => {
                    notice = Some(e.to_string());
                    continue;
                }
            };

            if matches.is_empty() {
                notice = Some(format!("No languages match \"{}\"", query));
                continue;
            }

            let mut options = vec![SelectOption::new("Cancel")];
            options.extend(
                matches
                    .iter()
                    .map(|l| SelectOption::new(&l.slug).with_description(&l.name)),
            );

            match self.selector.select("Select Languages ", &options) {
                Ok(None) | Ok(Some(0)) => {}
                Ok(Some(index)) => {
                    if let Some(language) = matches.get(index - 1) {
                        if chosen.contains(language) {
                            notice = Some(format!("\"{}\" is already added", language.slug));
                        } else {
                            info!("➕ Added language {}", language.slug);
                            chosen.push(language.clone());
                        }
                    }
                }
                Err(e) => {
                    warn!("{}", e);
                    notice = Some(format!("Error: {}", e));
                }
            }
        }

        Ok(chosen)
    }

    fn draw(&mut self, chosen: &[Language], notice: Option<String>) -> Result<()> {
        screen::clear(&mut self.out)?;
        writeln!(self.out, "{}", screen::banner())?;
        writeln!(self.out, "{}", screen::languages_added(chosen))?;
        match notice {
            Some(notice) => writeln!(self.out, "  {}", notice)?,
            None => writeln!(self.out)?,
        }
        self.out.flush()?;
        Ok(())
    }
}
