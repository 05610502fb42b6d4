use crate::config::ValidatedConfig;
use crate::table::Header;
use crate::tokenizer::TokenizeError;
use crate::tokenizer::Tokenizer;

/// Partitions the row stream: captures the header row, discards preamble rows
/// strictly between the header and the data start, and leaves the tokenizer
/// positioned at the first data row.
///
/// A header row index beyond the end of the file yields a synthesized (empty)
/// header; a data start beyond the end simply leaves no data rows. Neither is
/// an error.
pub(crate) fn classify(
    tokenizer: &mut Tokenizer<'_>,
    plan: &ValidatedConfig,
) -> Result<Header, TokenizeError> {
    let mut header: Option<Header> = None;
    for index in 0..plan.data_start_row_index {
        match tokenizer.next_row()? {
            Some(row) => {
                if index == plan.header_row_index {
                    header = Some(Header::from_row(row.fields));
                }
                // Rows between header and data start are preamble, dropped
            }
            None => break,
        }
    }
    Ok(header.unwrap_or_else(|| Header::synthesized(0)))
}
