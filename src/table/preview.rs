use crate::table::column::infer_columns;
use crate::table::column::Column;
use crate::table::normalize_row;
use crate::table::Header;
use crate::table::RowWidthWarning;
use crate::tokenizer::TokenizeError;
use crate::tokenizer::Tokenizer;

/// Default number of sample rows in a preview.
pub const DEFAULT_PREVIEW_LIMIT: usize = 50;

/// A bounded sample of the parsed table, for display before committing to a
/// full import. Ephemeral; one display cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewResult {
    pub header: Header,
    /// Columns with kinds inferred from the sampled rows
    pub columns: Vec<Column>,
    pub sample_rows: Vec<Vec<String>>,
    /// Data rows actually read, never the full file count
    pub total_rows_scanned: usize,
    pub warnings: Vec<RowWidthWarning>,
}

/// Builds a preview of at most `limit` data rows. Stops pulling from the
/// tokenizer as soon as the limit is reached, so large files are never
/// scanned past the sample.
pub(crate) fn build_preview(
    tokenizer: &mut Tokenizer<'_>,
    header: Header,
    limit: usize,
) -> Result<PreviewResult, TokenizeError> {
    let expected = header.len();
    let mut sample_rows = Vec::new();
    let mut warnings = Vec::new();
    let mut total_rows_scanned = 0;
    while sample_rows.len() < limit {
        match tokenizer.next_row()? {
            Some(row) => {
                total_rows_scanned += 1;
                sample_rows.push(normalize_row(row, expected, &mut warnings));
            }
            None => break,
        }
    }
    let columns = infer_columns(&header, &sample_rows);
    Ok(PreviewResult {
        header,
        columns,
        sample_rows,
        total_rows_scanned,
        warnings,
    })
}
