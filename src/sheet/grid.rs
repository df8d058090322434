//! The in-memory cell grid decoded from a spreadsheet file.

/// A single spreadsheet cell value.
///
/// Cells keep the distinction between text and numbers because exported
/// amounts are numeric while imported files may carry either.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// A text cell.
    Text(String),
    /// A numeric cell.
    Number(f64),
    /// A cell with no value.
    Empty,
}

impl Cell {
    /// The cell's contents as display text.
    ///
    /// Numbers use their shortest decimal representation, so a cell
    /// holding `1000.0` renders as `"1000"`.
    pub fn text(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(number) => number.to_string(),
            Cell::Empty => String::new(),
        }
    }

    /// Whether the cell holds any Cyrillic characters.
    pub(crate) fn has_cyrillic(&self) -> bool {
        match self {
            Cell::Text(text) => text
                .chars()
                .any(|character| matches!(character, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё')),
            _ => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_owned())
    }
}

/// A decoded single-sheet spreadsheet: rows of cells, with row 0 holding
/// the header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    /// The rows of the sheet, in file order.
    pub rows: Vec<Vec<Cell>>,
}
