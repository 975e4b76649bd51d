//! Row selection
//!
//! Predicates are ANDed. The first predicate scans the whole table; each
//! following predicate narrows the rows that survived so far, so the result
//! is independent of predicate order.

use civet_meta::{MetadataFile, MetadataRow};

use super::filter::Predicate;
use crate::{Error, Result};

/// Rows of `metadata` that satisfy every predicate, in file order.
///
/// An empty predicate list is [`Error::NoFilters`], not "all rows".
pub fn select_rows(metadata: &MetadataFile, predicates: &[Predicate]) -> Result<Vec<MetadataRow>> {
    let Some((first, rest)) = predicates.split_first() else {
        return Err(Error::NoFilters);
    };

    let mut selected = Vec::new();
    for row in metadata.rows()? {
        let row = row?;
        if first.matches(&row)? {
            selected.push(row);
        }
    }
    tracing::debug!(column = first.column(), kept = selected.len(), "Scanned metadata");

    for predicate in rest {
        selected = narrow(selected, predicate)?;
        tracing::debug!(column = predicate.column(), kept = selected.len(), "Narrowed rows");
    }

    Ok(selected)
}

fn narrow(rows: Vec<MetadataRow>, predicate: &Predicate) -> Result<Vec<MetadataRow>> {
    let mut kept = Vec::with_capacity(rows.len());
    for row in rows {
        if predicate.matches(&row)? {
            kept.push(row);
        }
    }
    Ok(kept)
}
