use std::ops::Range;

use crate::error::{PipelineError, Result};
use crate::table::Table;

// A4 portrait, points.
pub const PAGE_WIDTH: f64 = 595.28;
pub const PAGE_HEIGHT: f64 = 841.89;

pub const MARGIN_LEFT: f64 = 20.0;
pub const MARGIN_RIGHT: f64 = 20.0;
pub const MARGIN_TOP: f64 = 30.0;
pub const MARGIN_BOTTOM: f64 = 30.0;

pub const TITLE_FONT_SIZE: f64 = 18.0;
/// Gap between the title baseline block and the table on page one.
pub const TITLE_GAP: f64 = 30.0;

pub const BODY_FONT_SIZE: f64 = 9.0;
pub const CELL_PADDING: f64 = 6.0;
/// The header row carries extra bottom padding.
pub const HEADER_BOTTOM_PADDING: f64 = 10.0;

pub const BODY_ROW_HEIGHT: f64 = BODY_FONT_SIZE + 2.0 * CELL_PADDING;
pub const HEADER_ROW_HEIGHT: f64 = BODY_FONT_SIZE + CELL_PADDING + HEADER_BOTTOM_PADDING;

pub const GRID_LINE_WIDTH: f64 = 0.5;

/// Table geometry shared by every page, plus the row span each page shows.
/// The header row is implicit: it repeats at the top of every page.
#[derive(Debug, PartialEq)]
pub struct Layout {
    pub col_width: f64,
    /// Row index ranges into the table, one per page. Always at least one
    /// page, even for a table with zero rows (header + title still render).
    pub pages: Vec<Range<usize>>,
}

/// Compute the shared column width and the per-page row spans.
///
/// Column widths are uniform: usable width divided by column count, so a
/// zero-column table is a defined failure rather than a division by zero.
pub fn paginate(table: &Table) -> Result<Layout> {
    if table.is_empty() {
        return Err(PipelineError::EmptyTable);
    }
    let usable_width = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let col_width = usable_width / table.width() as f64;

    let usable_height = PAGE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let first_capacity = rows_fitting(usable_height - TITLE_FONT_SIZE - TITLE_GAP);
    let rest_capacity = rows_fitting(usable_height);

    let total = table.rows.len();
    let mut pages = Vec::new();
    let mut start = 0usize;
    loop {
        let capacity = if pages.is_empty() {
            first_capacity
        } else {
            rest_capacity
        };
        let end = total.min(start + capacity);
        pages.push(start..end);
        if end == total {
            break;
        }
        start = end;
    }

    Ok(Layout { col_width, pages })
}

/// How many body rows fit under one header row in `height` points. At least
/// one, so pagination always makes progress.
fn rows_fitting(height: f64) -> usize {
    let body = height - HEADER_ROW_HEIGHT;
    ((body / BODY_ROW_HEIGHT).floor() as usize).max(1)
}
