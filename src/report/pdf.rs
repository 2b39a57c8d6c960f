use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::error::Result;
use crate::report::layout::{
    Layout, BODY_FONT_SIZE, BODY_ROW_HEIGHT, CELL_PADDING, GRID_LINE_WIDTH, HEADER_ROW_HEIGHT,
    MARGIN_LEFT, MARGIN_TOP, PAGE_HEIGHT, PAGE_WIDTH, TITLE_FONT_SIZE, TITLE_GAP,
};
use crate::table::Table;

// Light grey header fill.
const HEADER_FILL: [f64; 3] = [0.827, 0.827, 0.827];
// Average glyph advance as a fraction of the font size, for Helvetica.
// Close enough for clipping and centering; exact metrics are not worth
// carrying for a fixed-layout report.
const AVG_GLYPH_ADVANCE: f64 = 0.5;

/// Resource names for the two fonts installed in the page tree.
const FONT_BODY: &str = "F1";
const FONT_BOLD: &str = "F2";

/// Assemble the paginated document: one content stream per page span, a
/// shared Helvetica/Helvetica-Bold resource dictionary, the title centered
/// on page one only and the header row repeated on every page.
pub fn build_document(table: &Table, layout: &Layout, title: &str) -> Result<Document> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let body_font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_BODY => body_font,
            FONT_BOLD => bold_font,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for (page_no, span) in layout.pages.iter().enumerate() {
        let ops = page_operations(table, layout, title, page_no == 0, span.clone());
        let content_id = doc.add_object(Stream::new(dictionary! {}, Content { operations: ops }.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    Ok(doc)
}

/// Content stream for one page: optional title block, header row, body rows.
fn page_operations(
    table: &Table,
    layout: &Layout,
    title: &str,
    first_page: bool,
    span: std::ops::Range<usize>,
) -> Vec<Operation> {
    let mut ops = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN_TOP;

    if first_page {
        y -= TITLE_FONT_SIZE;
        let title_width = title.chars().count() as f64 * TITLE_FONT_SIZE * AVG_GLYPH_ADVANCE;
        let x = ((PAGE_WIDTH - title_width) / 2.0).max(MARGIN_LEFT);
        text_op(&mut ops, FONT_BOLD, TITLE_FONT_SIZE, x, y, title);
        y -= TITLE_GAP;
    }

    // header row: grey fill behind, then bold cell text
    y -= HEADER_ROW_HEIGHT;
    ops.push(Operation::new(
        "rg",
        HEADER_FILL.iter().map(|&v| real(v)).collect(),
    ));
    ops.push(Operation::new(
        "re",
        vec![
            real(MARGIN_LEFT),
            real(y),
            real(layout.col_width * table.width() as f64),
            real(HEADER_ROW_HEIGHT),
        ],
    ));
    ops.push(Operation::new("f", vec![]));
    ops.push(Operation::new("g", vec![real(0.0)])); // back to black fill

    for (col, name) in table.columns.iter().enumerate() {
        let x = MARGIN_LEFT + col as f64 * layout.col_width;
        cell_text(&mut ops, FONT_BOLD, x, y, layout.col_width, name);
    }
    grid_row(&mut ops, y, HEADER_ROW_HEIGHT, layout.col_width, table.width());

    // body rows
    for row in &table.rows[span] {
        y -= BODY_ROW_HEIGHT;
        for (col, cell) in row.iter().enumerate() {
            let x = MARGIN_LEFT + col as f64 * layout.col_width;
            cell_text(&mut ops, FONT_BODY, x, y, layout.col_width, &cell.render());
        }
        grid_row(&mut ops, y, BODY_ROW_HEIGHT, layout.col_width, table.width());
    }

    ops
}

/// One cell's text, left-aligned with padding, clipped to the column.
fn cell_text(ops: &mut Vec<Operation>, font: &str, x: f64, row_y: f64, col_width: f64, text: &str) {
    let clipped = clip_to_width(text, col_width - 2.0 * CELL_PADDING);
    let baseline = row_y + CELL_PADDING;
    text_op(ops, font, BODY_FONT_SIZE, x + CELL_PADDING, baseline, &clipped);
}

/// Stroke one row's cell borders: 0.5pt black grid.
fn grid_row(ops: &mut Vec<Operation>, y: f64, height: f64, col_width: f64, cols: usize) {
    ops.push(Operation::new("w", vec![real(GRID_LINE_WIDTH)]));
    ops.push(Operation::new("G", vec![real(0.0)]));
    for col in 0..cols {
        let x = MARGIN_LEFT + col as f64 * col_width;
        ops.push(Operation::new(
            "re",
            vec![real(x), real(y), real(col_width), real(height)],
        ));
    }
    ops.push(Operation::new("S", vec![]));
}

fn text_op(ops: &mut Vec<Operation>, font: &str, size: f64, x: f64, y: f64, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), real(size)]));
    ops.push(Operation::new("Td", vec![real(x), real(y)]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(latin1_bytes(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

/// Clip to the glyphs that fit in `width` points, appending "..." when
/// anything was dropped.
fn clip_to_width(text: &str, width: f64) -> String {
    let max_chars = (width / (BODY_FONT_SIZE * AVG_GLYPH_ADVANCE)).floor() as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut clipped: String = text.chars().take(keep).collect();
    clipped.push_str("...");
    clipped
}

/// The base-14 fonts take single-byte encodings; anything outside Latin-1
/// degrades to `?`.
fn latin1_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
        .collect()
}

fn real(v: f64) -> Object {
    Object::Real(v as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clips_long_text_with_ellipsis() {
        let wide = "a".repeat(500);
        let clipped = clip_to_width(&wide, 90.0);
        assert!(clipped.ends_with("..."));
        assert!(clipped.chars().count() <= 20);
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(clip_to_width("abc", 90.0), "abc");
    }

    #[test]
    fn latin1_degrades_unencodable_chars() {
        assert_eq!(latin1_bytes("naïve"), b"na\xefve".to_vec());
        assert_eq!(latin1_bytes("東京"), b"??".to_vec());
    }
}
