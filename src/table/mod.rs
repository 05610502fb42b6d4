//! Tabular model for imported data: header handling, row width policy, and
//! the preview/import builders layered over the tokenizer.

use crate::tokenizer::RawRow;
use thiserror::Error;

pub(crate) mod classifier;
pub(crate) mod column;
pub(crate) mod importer;
pub(crate) mod preview;

/// Ordered column names for an imported table.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub names: Vec<String>,
}

impl Header {
    pub(crate) fn from_row(fields: Vec<String>) -> Self {
        Header { names: fields }
    }

    /// Generates placeholder names (`Column1`, `Column2`, ...) when the
    /// source has no header row to read.
    pub(crate) fn synthesized(count: usize) -> Self {
        Header {
            names: (1..=count).map(|index| format!("Column{index}")).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Non-fatal note recorded for a data row whose field count differed from the
/// header width. The row itself is padded or truncated and kept.
#[derive(Error, Clone, Debug, PartialEq)]
#[error("Row {row} has {actual} fields, expected {expected}")]
pub struct RowWidthWarning {
    /// 0-based source row index
    pub row: usize,
    /// Header column count
    pub expected: usize,
    /// Field count actually found
    pub actual: usize,
}

/// A fully materialized table. Owned by the caller after commit; rows appear
/// in source file order and every row has exactly `header.len()` fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub header: Header,
    pub rows: Vec<Vec<String>>,
    pub warnings: Vec<RowWidthWarning>,
}

/// Applies the row width policy: short rows are padded with empty values,
/// long rows are truncated, and either case records a warning.
pub(crate) fn normalize_row(
    row: RawRow,
    expected: usize,
    warnings: &mut Vec<RowWidthWarning>,
) -> Vec<String> {
    let RawRow { index, mut fields } = row;
    if fields.len() != expected {
        tracing::warn!(row = index, actual = fields.len(), expected, "row width mismatch");
        warnings.push(RowWidthWarning {
            row: index,
            expected,
            actual: fields.len(),
        });
        fields.resize(expected, String::new());
    }
    fields
}
