use std::collections::HashSet;
use tracing::debug;

use crate::table::normalize::normalize;
use crate::table::{Cell, Table, FILL_SENTINEL};

/// Merge two tables: normalize each independently, take the union of their
/// column names (first table's order, then any new columns from the second),
/// concatenate rows in argument order with the sentinel filling cells a
/// source never had, then dedup the combined set.
///
/// Differing column sets are not an error; this never overwrites values
/// positionally.
#[tracing::instrument(level = "debug", skip(first, second))]
pub fn combine(mut first: Table, mut second: Table) -> Table {
    normalize(&mut first);
    normalize(&mut second);

    let mut columns = first.columns.clone();
    for name in &second.columns {
        if !columns.contains(name) {
            columns.push(name.clone());
        }
    }

    let mut combined = Table::new(columns);
    append_projected(&mut combined, &first);
    append_projected(&mut combined, &second);

    let mut seen: HashSet<Vec<Cell>> = HashSet::with_capacity(combined.rows.len());
    combined.rows.retain(|row| seen.insert(row.clone()));

    debug!(
        columns = combined.columns.len(),
        rows = combined.rows.len(),
        "combined"
    );
    combined
}

/// Copy `source`'s rows into `target`, re-ordering cells into the target's
/// column layout and sentinel-filling columns the source does not have.
fn append_projected(target: &mut Table, source: &Table) {
    let slots: Vec<Option<usize>> = target
        .columns
        .iter()
        .map(|name| source.columns.iter().position(|c| c == name))
        .collect();

    for row in &source.rows {
        let projected: Vec<Cell> = slots
            .iter()
            .map(|slot| match slot {
                Some(i) => row[*i].clone(),
                None => Cell::Text(FILL_SENTINEL.to_string()),
            })
            .collect();
        target.rows.push(projected);
    }
}
