//! Metadata filter expressions
//!
//! A filter is `column=value`. Several filters may be given as separate
//! arguments or joined with `,`. The value is either matched literally or,
//! when it looks like `YYYY-MM-DD:YYYY-MM-DD`, read as an inclusive date
//! range.
//!
//! Only values whose start begins with `2019-`, `2020-` or `2021-` are read
//! as date ranges. Any other value containing `:` is matched literally, so a
//! range such as `2022-01-01:2022-02-01` never matches a date column.

use std::path::Path;

use chrono::NaiveDate;
use civet_meta::{MetadataFile, MetadataRow};

use crate::{Error, Result};

/// Date format used by filter bounds and metadata date columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Year prefixes that mark a value as a date range.
pub const DATE_RANGE_YEARS: [&str; 3] = ["2019-", "2020-", "2021-"];

/// How a [`Predicate`] tests a column value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Exact string equality.
    Exact(String),
    /// `start <= date <= end`.
    DateRange { start: NaiveDate, end: NaiveDate },
}

/// A column-scoped test on metadata rows.
///
/// The column is checked against the table when the predicate is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    column: String,
    matcher: Matcher,
}

impl Predicate {
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Test `row`.
    ///
    /// For a date range, a row value that is not `YYYY-MM-DD` is an error
    /// carrying the row number; it is never skipped.
    pub fn matches(&self, row: &MetadataRow) -> Result<bool> {
        let value = row.get(&self.column).unwrap_or_default();
        match &self.matcher {
            Matcher::Exact(expected) => Ok(value == expected),
            Matcher::DateRange { start, end } => {
                let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
                    Error::DateParse {
                        column: self.column.clone(),
                        value: value.to_string(),
                        row: row.number(),
                    }
                })?;
                Ok(*start <= date && date <= *end)
            }
        }
    }
}

/// Parse filter expressions against the columns of `metadata`.
///
/// Order is preserved and repeated filters are kept.
pub fn parse_filters<S: AsRef<str>>(expressions: &[S], metadata: &MetadataFile) -> Result<Vec<Predicate>> {
    parse_against(expressions, metadata.columns(), metadata.path())
}

fn parse_against<S: AsRef<str>>(
    expressions: &[S],
    columns: &[String],
    table: &Path,
) -> Result<Vec<Predicate>> {
    let mut predicates = Vec::new();

    for expression in expressions.iter().flat_map(|e| e.as_ref().split(',')) {
        let expression = expression.trim();
        if expression.is_empty() {
            continue;
        }
        let predicate = parse_filter(expression, columns, table)?;
        tracing::debug!(column = %predicate.column, matcher = ?predicate.matcher, "Parsed metadata filter");
        predicates.push(predicate);
    }

    Ok(predicates)
}

fn parse_filter(expression: &str, columns: &[String], table: &Path) -> Result<Predicate> {
    let invalid = || Error::InvalidFilter {
        expression: expression.to_string(),
    };

    let (column, value) = expression.split_once('=').ok_or_else(invalid)?;
    let (column, value) = (column.trim(), value.trim());
    if column.is_empty() || value.is_empty() {
        return Err(invalid());
    }

    if !columns.iter().any(|c| c == column) {
        return Err(Error::UnknownColumn {
            column: column.to_string(),
            table: table.to_path_buf(),
            available: columns.to_vec(),
        });
    }

    let matcher = if is_date_range(value) {
        parse_date_range(column, value)?
    } else {
        Matcher::Exact(value.to_string())
    };

    Ok(Predicate {
        column: column.to_string(),
        matcher,
    })
}

/// `true` when `value` contains `:` and starts with an allow-listed year.
pub fn is_date_range(value: &str) -> bool {
    value.contains(':') && DATE_RANGE_YEARS.iter().any(|year| value.starts_with(year))
}

fn parse_date_range(column: &str, value: &str) -> Result<Matcher> {
    let invalid = || Error::InvalidDateFormat {
        column: column.to_string(),
        value: value.to_string(),
    };

    let mut bounds = value.split(':');
    let (Some(start), Some(end), None) = (bounds.next(), bounds.next(), bounds.next()) else {
        return Err(invalid());
    };

    let start = NaiveDate::parse_from_str(start, DATE_FORMAT).map_err(|_| invalid())?;
    let end = NaiveDate::parse_from_str(end, DATE_FORMAT).map_err(|_| invalid())?;

    Ok(Matcher::DateRange { start, end })
}
