use std::str::FromStr;

use crate::config::ComponentConfig;
use crate::error::LoaderError;
use crate::style::display_width;

/// Where a component sits along one axis when no explicit position is given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Leading,
    Trailing,
    Center,
}

impl FromStr for Alignment {
    type Err = LoaderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "leading" => Ok(Alignment::Leading),
            "trailing" => Ok(Alignment::Trailing),
            "center" => Ok(Alignment::Center),
            other => Err(LoaderError::InvalidAlignment {
                value: other.to_string(),
            }),
        }
    }
}

/// Explicit position override, each axis independently
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub x: Option<i32>,
    pub y: Option<i32>,
}

/// A block of styled, possibly multi-line text placed on the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub content: String,
    pub alignment_horizontal: Alignment,
    pub alignment_vertical: Alignment,
    pub padding: u16,
    /// Kept with the component but not consulted by layout
    pub margin: u16,
    pub position: Position,
}

impl Component {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            alignment_horizontal: Alignment::Center,
            alignment_vertical: Alignment::Center,
            padding: 0,
            margin: 0,
            position: Position::default(),
        }
    }

    pub fn aligned(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.alignment_horizontal = horizontal;
        self.alignment_vertical = vertical;
        self
    }

    pub fn with_padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    pub fn at_x(mut self, x: i32) -> Self {
        self.position.x = Some(x);
        self
    }

    pub fn at_y(mut self, y: i32) -> Self {
        self.position.y = Some(y);
        self
    }

    /// Content with surrounding whitespace removed, as drawn
    pub fn text(&self) -> &str {
        self.content.trim()
    }

    /// Visible width and line count of the trimmed content
    pub fn size(&self) -> (usize, usize) {
        let lines: Vec<&str> = self.text().split('\n').collect();
        let width = lines.iter().map(|line| display_width(line)).max().unwrap_or(0);
        (width, lines.len())
    }
}

impl TryFrom<&ComponentConfig> for Component {
    type Error = LoaderError;

    fn try_from(config: &ComponentConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            content: config.content.clone(),
            alignment_horizontal: config.alignment_horizontal.parse()?,
            alignment_vertical: config.alignment_vertical.parse()?,
            padding: config.padding,
            margin: config.margin,
            position: Position {
                x: config.x,
                y: config.y,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BOLD, RESET};

    #[test]
    fn test_size_ignores_styling_and_outer_whitespace() {
        let component = Component::new(&format!("\n  {BOLD}AB{RESET}\nxyz  \n"));
        assert_eq!(component.size(), (3, 2));

        let styled = Component::new(&format!("{BOLD}AB{RESET}"));
        assert_eq!(styled.size(), (2, 1));
    }

    #[test]
    fn test_alignment_parse() {
        assert_eq!("trailing".parse::<Alignment>().unwrap(), Alignment::Trailing);
        assert!(matches!(
            "middle".parse::<Alignment>(),
            Err(LoaderError::InvalidAlignment { value }) if value == "middle"
        ));
    }

    #[test]
    fn test_from_config() {
        let config = ComponentConfig {
            content: "HI".to_string(),
            alignment_horizontal: "leading".to_string(),
            padding: 2,
            y: Some(0),
            ..ComponentConfig::default()
        };
        let component = Component::try_from(&config).unwrap();
        assert_eq!(component.alignment_horizontal, Alignment::Leading);
        assert_eq!(component.alignment_vertical, Alignment::Center);
        assert_eq!(component.position, Position { x: None, y: Some(0) });

        let bad = ComponentConfig {
            alignment_vertical: "bottom".to_string(),
            ..ComponentConfig::default()
        };
        assert!(Component::try_from(&bad).is_err());
    }
}
