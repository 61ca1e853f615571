use crate::style::{strip_styling, styling_prefix_len, RESET};

/// Fixed-size character grid, rebuilt for every frame
#[derive(Debug, Clone)]
pub struct Grid {
    columns: usize,
    rows: usize,
    cells: Vec<Vec<String>>,
}

impl Grid {
    /// Blank grid, every cell a single space
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![vec![" ".to_string(); columns]; rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row)?.get(col).map(String::as_str)
    }

    /// Write one character wrapped in resets. Out-of-bounds writes are dropped.
    pub fn put(&mut self, row: i64, col: i64, ch: char) {
        if row < 0 || col < 0 {
            return;
        }
        if let Some(cell) = self
            .cells
            .get_mut(row as usize)
            .and_then(|cells| cells.get_mut(col as usize))
        {
            *cell = format!("{RESET}{ch}{RESET}");
        }
    }

    /// Draw styled text with its first visible character at (`row`, `col`).
    ///
    /// Styling sequences are consumed without taking up a column.
    pub fn draw_text(&mut self, text: &str, row: i64, col: i64) {
        for (line_index, line) in text.split('\n').enumerate() {
            let target_row = row + line_index as i64;
            let mut visible_col = 0i64;
            let mut i = 0;

            while i < line.len() {
                if let Some(len) = styling_prefix_len(&line[i..]) {
                    i += len;
                    continue;
                }

                let Some(ch) = line[i..].chars().next() else {
                    break;
                };
                self.put(target_row, col + visible_col, ch);
                i += ch.len_utf8();
                visible_col += 1;
            }
        }
    }

    /// Visible text of one row, styling removed
    pub fn visible_row(&self, row: usize) -> Option<String> {
        self.cells
            .get(row)
            .map(|cells| strip_styling(&cells.concat()))
    }

    /// Rows joined by line breaks, cells joined with no separator
    pub fn render(&self) -> String {
        self.cells
            .iter()
            .map(|cells| cells.concat())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
