//! Fixed-size terminal compositor
//!
//! Components are laid out from scratch on every frame and drawn into a fresh
//! [`Grid`]; nothing carries over between frames.

pub mod component;
pub mod grid;
pub mod render;

pub use component::{Alignment, Component, Position};
pub use grid::Grid;
pub use render::RenderTask;

use tracing::debug;

use crate::config::DisplayConfig;
use crate::error::Result;

/// Resolved top-left corner and size of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub width: usize,
    pub height: usize,
}

/// Lays out and draws a static set of components
#[derive(Debug, Clone)]
pub struct Compositor {
    columns: usize,
    rows: usize,
    components: Vec<Component>,
}

impl Compositor {
    pub fn new(columns: usize, rows: usize, components: Vec<Component>) -> Self {
        Self {
            columns,
            rows,
            components,
        }
    }

    /// Build from the display section of the config, validating alignments
    pub fn from_config(display: &DisplayConfig) -> Result<Self> {
        let components = display
            .components
            .iter()
            .map(Component::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(
            display.columns as usize,
            display.rows as usize,
            components,
        ))
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Position of `component` on this compositor's grid.
    ///
    /// Explicit coordinates win over alignment. Fractional results are floored.
    pub fn place(&self, component: &Component) -> Placement {
        let (width, height) = component.size();
        let columns = self.columns as f64;
        let rows = self.rows as f64;
        let padding = component.padding as f64;

        let x = match component.position.x {
            Some(x) => x as f64,
            None => match component.alignment_horizontal {
                Alignment::Leading => padding,
                Alignment::Trailing => columns - width as f64 - padding,
                Alignment::Center => columns / 2.0 - width as f64 / 2.0,
            },
        };

        let y = match component.position.y {
            Some(y) => y as f64,
            None => match component.alignment_vertical {
                Alignment::Leading => padding / 2.0,
                Alignment::Trailing => rows - height as f64 - padding / 2.0,
                Alignment::Center => rows / 2.0 - height as f64 / 2.0,
            },
        };

        Placement {
            x: x.floor() as i64,
            y: y.floor() as i64,
            width,
            height,
        }
    }

    /// Draw every component, in order, into a blank grid
    pub fn compose(&self) -> Grid {
        let mut grid = Grid::new(self.columns, self.rows);

        for component in &self.components {
            let placement = self.place(component);
            debug!(
                "Component at ({}, {}) size {}x{}",
                placement.x, placement.y, placement.width, placement.height
            );
            grid.draw_text(component.text(), placement.y, placement.x);
        }

        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComponentConfig;
    use crate::error::LoaderError;
    use crate::style::{BOLD, RESET};

    #[test]
    fn test_leading_with_padding() {
        let compositor = Compositor::new(10, 4, vec![]);
        let component = Component::new("HI")
            .aligned(Alignment::Leading, Alignment::Leading)
            .with_padding(2);

        let placement = compositor.place(&component);
        assert_eq!(placement.x, 2);
        assert_eq!(placement.y, 1);
    }

    #[test]
    fn test_trailing_with_padding() {
        let compositor = Compositor::new(10, 4, vec![]);
        let component = Component::new("abc")
            .aligned(Alignment::Trailing, Alignment::Trailing)
            .with_padding(2);

        let placement = compositor.place(&component);
        assert_eq!(placement.x, 5);
        assert_eq!(placement.y, 2);
    }

    #[test]
    fn test_center_uses_rows_for_vertical() {
        let compositor = Compositor::new(96, 12, vec![]);
        let component = Component::new("|\n|\n|\n|");

        let placement = compositor.place(&component);
        assert_eq!(placement.x, 47);
        assert_eq!(placement.y, 4);

        // odd widths land on the floor of the half-cell
        let placement = compositor.place(&Component::new("abc"));
        assert_eq!(placement.x, 46);
    }

    #[test]
    fn test_explicit_position_wins_even_at_zero() {
        let compositor = Compositor::new(10, 4, vec![]);
        let component = Component::new("HI")
            .aligned(Alignment::Trailing, Alignment::Trailing)
            .at_x(0)
            .at_y(0);

        let placement = compositor.place(&component);
        assert_eq!((placement.x, placement.y), (0, 0));
    }

    #[test]
    fn test_styled_width_centers_on_visible_text() {
        let compositor = Compositor::new(10, 1, vec![]);
        let placement = compositor.place(&Component::new(&format!("{BOLD}AB{RESET}")));
        assert_eq!(placement.width, 2);
        assert_eq!(placement.x, 4);
    }

    #[test]
    fn test_compose_draws_components_in_order() {
        let compositor = Compositor::new(
            10,
            3,
            vec![
                Component::new("HI")
                    .aligned(Alignment::Leading, Alignment::Leading)
                    .with_padding(2),
                Component::new(&format!("{BOLD}xyz{RESET}"))
                    .aligned(Alignment::Trailing, Alignment::Leading)
                    .with_padding(2),
                Component::new("Z").at_x(3).at_y(1),
                Component::new("over").at_x(2).at_y(2),
                Component::new("!").at_x(3).at_y(2),
            ],
        );

        let grid = compositor.compose();
        assert_eq!(grid.visible_row(0).unwrap(), "          ");
        // later components overwrite earlier ones cell by cell
        assert_eq!(grid.visible_row(1).unwrap(), "  HZ xyz  ");
        assert_eq!(grid.visible_row(2).unwrap(), "  o!er    ");
    }

    #[test]
    fn test_from_config_rejects_bad_alignment() {
        let display = DisplayConfig {
            components: vec![ComponentConfig {
                content: "x".to_string(),
                alignment_horizontal: "left".to_string(),
                ..ComponentConfig::default()
            }],
            ..DisplayConfig::default()
        };

        assert!(matches!(
            Compositor::from_config(&display),
            Err(LoaderError::InvalidAlignment { .. })
        ));
    }

    #[test]
    fn test_default_splash_layout() {
        let compositor = Compositor::from_config(&DisplayConfig::default()).unwrap();
        let grid = compositor.compose();

        assert_eq!(grid.rows(), 12);
        assert_eq!(grid.columns(), 96);
        assert_eq!(grid.visible_row(2).unwrap().trim(), "MPK Loader");
        assert_eq!(grid.visible_row(6).unwrap().trim(), "|");
        assert_eq!(grid.visible_row(9).unwrap().trim(), "|");
        assert_eq!(grid.visible_row(10).unwrap().trim(), "");
    }
}
