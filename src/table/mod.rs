pub mod combine;
pub mod normalize;

use std::hash::{Hash, Hasher};

/// Placeholder substituted for any missing cell that survives the
/// empty-row pass during normalization.
pub const FILL_SENTINEL: &str = "Unknown";

/// A single cell value. Fields that parse as `f64` stay numeric in memory;
/// everything is stringified at render/serialize time.
#[derive(Debug, Clone)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl Cell {
    /// Parse a raw delimited-text field: empty → missing, numeric → number,
    /// anything else text.
    pub fn from_field(raw: &str) -> Cell {
        if raw.is_empty() {
            return Cell::Missing;
        }
        match raw.parse::<f64>() {
            Ok(n) => Cell::Number(n),
            Err(_) => Cell::Text(raw.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Stringify for output. Integral floats print without a trailing `.0`;
    /// a missing cell renders as the empty string (normalized tables have
    /// none left).
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            Cell::Missing => String::new(),
        }
    }
}

// Dedup needs a total equivalence over cells, so numbers compare and hash by
// bit pattern rather than by IEEE `==`.
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Text(a), Cell::Text(b)) => a == b,
            (Cell::Number(a), Cell::Number(b)) => a.to_bits() == b.to_bits(),
            (Cell::Missing, Cell::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Cell::Text(s) => {
                0u8.hash(state);
                s.hash(state);
            }
            Cell::Number(n) => {
                1u8.hash(state);
                n.to_bits().hash(state);
            }
            Cell::Missing => 2u8.hash(state),
        }
    }
}

/// An in-memory table: one shared header vector plus positional rows.
/// Invariant: every row is exactly `columns.len()` wide; readers pad or skip
/// to guarantee it, and every transform preserves it.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Table {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Append a row, padding with `Missing` or truncating to the declared
    /// width. Callers that want to reject over-wide rows check first.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Missing);
        self.rows.push(row);
    }
}
