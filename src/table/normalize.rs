use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::table::{Cell, Table, FILL_SENTINEL};

/// Canonical form of a raw header: trimmed and lower-cased.
pub fn canonical_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Run the full normalization pass over `table`, in place:
///
/// 1. trim + lowercase column names (collisions: last writer wins),
/// 2. drop rows that duplicate an earlier row (first occurrence kept),
/// 3. drop rows where every cell is missing,
/// 4. fill the remaining missing cells with [`FILL_SENTINEL`].
///
/// Fill runs last so the sentinel never participates in dedup comparisons.
#[tracing::instrument(level = "debug", skip(table), fields(rows = table.rows.len()))]
pub fn normalize(table: &mut Table) {
    canonicalize_headers(table);
    dedup_rows(table);
    drop_empty_rows(table);
    fill_missing(table);
    debug!(rows = table.rows.len(), "normalized");
}

/// Trim + lowercase every column name. If two raw headers collapse to the
/// same canonical name, the later column's values overwrite the earlier
/// column's slot and the duplicate column is removed, keeping column order
/// stable.
fn canonicalize_headers(table: &mut Table) {
    let canonical: Vec<String> = table.columns.iter().map(|c| canonical_name(c)).collect();

    // slot each name lands in; later duplicates overwrite the first slot
    let mut slot_of: HashMap<&str, usize> = HashMap::new();
    let mut keep: Vec<usize> = Vec::with_capacity(canonical.len());
    let mut overwrite: Vec<(usize, usize)> = Vec::new(); // (source col, target slot)

    for (idx, name) in canonical.iter().enumerate() {
        match slot_of.get(name.as_str()) {
            Some(&slot) => overwrite.push((idx, slot)),
            None => {
                slot_of.insert(name.as_str(), keep.len());
                keep.push(idx);
            }
        }
    }

    if overwrite.is_empty() && keep.len() == canonical.len() {
        table.columns = canonical;
        return;
    }

    table.columns = keep.iter().map(|&i| canonical[i].clone()).collect();
    for row in &mut table.rows {
        let mut projected: Vec<Cell> = keep.iter().map(|&i| row[i].clone()).collect();
        for &(src, slot) in &overwrite {
            projected[slot] = row[src].clone();
        }
        *row = projected;
    }
}

/// Remove rows that are full duplicates of an earlier row.
fn dedup_rows(table: &mut Table) {
    let mut seen: HashSet<Vec<Cell>> = HashSet::with_capacity(table.rows.len());
    table.rows.retain(|row| seen.insert(row.clone()));
}

/// Remove rows where every cell is missing.
fn drop_empty_rows(table: &mut Table) {
    table.rows.retain(|row| !row.iter().all(Cell::is_missing));
}

/// Replace every remaining missing cell with the fill sentinel.
fn fill_missing(table: &mut Table) {
    for row in &mut table.rows {
        for cell in row {
            if cell.is_missing() {
                *cell = Cell::Text(FILL_SENTINEL.to_string());
            }
        }
    }
}
