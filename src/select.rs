//! Interactive list selection and line prompts
//!
//! The loader only depends on the [`Selector`] and [`LinePrompt`] traits. The
//! terminal implementations are backed by `dialoguer`; [`TopChoiceSelector`]
//! serves non-interactive runs.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

use crate::error::{LoaderError, Result};

/// One row of a selection list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub description: Option<String>,
}

impl SelectOption {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Present a list, return the chosen index or `None` when the operator backs out.
///
/// Callers reserve index 0 for a "none/cancel" row they prepend themselves.
pub trait Selector {
    fn select(&self, header: &str, options: &[SelectOption]) -> Result<Option<usize>>;
}

/// Ask for one line of input, `None` when the operator submits nothing or cancels
pub trait LinePrompt {
    fn prompt(&self, message: &str) -> Result<Option<String>>;
}

/// Terminal selector and prompt
pub struct TerminalSelector {
    theme: ColorfulTheme,
    per_page: usize,
}

impl TerminalSelector {
    pub fn new(per_page: usize) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            per_page: per_page.max(1),
        }
    }
}

impl Selector for TerminalSelector {
    fn select(&self, header: &str, options: &[SelectOption]) -> Result<Option<usize>> {
        let items: Vec<String> = options
            .iter()
            .map(|option| match &option.description {
                Some(description) => format!("{}  ({})", option.label, description),
                None => option.label.clone(),
            })
            .collect();

        Select::with_theme(&self.theme)
            .with_prompt(header)
            .items(&items)
            .default(0)
            .max_length(self.per_page)
            .interact_opt()
            .map_err(|e| LoaderError::SelectionFailed {
                context: header.to_string(),
                reason: e.to_string(),
            })
    }
}

impl LinePrompt for TerminalSelector {
    fn prompt(&self, message: &str) -> Result<Option<String>> {
        let input = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true)
            .interact_text();

        match input {
            Ok(value) if value.trim().is_empty() => Ok(None),
            Ok(value) => Ok(Some(value.trim().to_string())),
            Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
            Err(e) => Err(LoaderError::SelectionFailed {
                context: message.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Always picks the first real option after the reserved row 0
pub struct TopChoiceSelector;

impl Selector for TopChoiceSelector {
    fn select(&self, _header: &str, options: &[SelectOption]) -> Result<Option<usize>> {
        Ok(if options.len() > 1 { Some(1) } else { Some(0) })
    }
}
