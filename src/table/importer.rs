use crate::table::normalize_row;
use crate::table::Header;
use crate::table::Table;
use crate::tokenizer::TokenizeError;
use crate::tokenizer::Tokenizer;

/// Materializes the complete table from the data-row stream. Row order
/// matches the source file; width mismatches are normalized and recorded,
/// never fatal. Only malformed tokenization aborts.
pub(crate) fn materialize(
    tokenizer: &mut Tokenizer<'_>,
    header: Header,
) -> Result<Table, TokenizeError> {
    let expected = header.len();
    let mut rows = Vec::new();
    let mut warnings = Vec::new();
    while let Some(row) = tokenizer.next_row()? {
        rows.push(normalize_row(row, expected, &mut warnings));
    }
    Ok(Table { header, rows, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImportConfig;
    use crate::helpers::reader::ImportSource;
    use crate::table::classifier::classify;
    use crate::table::RowWidthWarning;

    fn import(config: &ImportConfig, input: &[u8]) -> Result<Table, TokenizeError> {
        let plan = config.validate().unwrap();
        let source = ImportSource::memory(input);
        let opened = source.open().unwrap();
        let mut tokenizer = Tokenizer::new(opened, &plan);
        let header = classify(&mut tokenizer, &plan)?;
        materialize(&mut tokenizer, header)
    }

    #[test]
    fn rows_keep_source_order() {
        let table = import(&ImportConfig::default(), b"a,b,c\n1,2,3\n4,5,6\n").unwrap();
        assert_eq!(table.header.names, vec!["a", "b", "c"]);
        assert_eq!(table.rows, vec![vec!["1", "2", "3"], vec!["4", "5", "6"]]);
        assert!(table.warnings.is_empty());
    }

    #[test]
    fn short_row_padded_with_warning() {
        let table = import(&ImportConfig::default(), b"a,b,c\n1,2\n").unwrap();
        assert_eq!(table.rows, vec![vec!["1", "2", ""]]);
        assert_eq!(
            table.warnings,
            vec![RowWidthWarning { row: 1, expected: 3, actual: 2 }]
        );
    }

    #[test]
    fn long_row_truncated_with_warning() {
        let table = import(&ImportConfig::default(), b"a,b\n1,2,3,4\n").unwrap();
        assert_eq!(table.rows, vec![vec!["1", "2"]]);
        assert_eq!(
            table.warnings,
            vec![RowWidthWarning { row: 1, expected: 2, actual: 4 }]
        );
    }

    #[test]
    fn unterminated_quote_aborts_without_partial_table() {
        let result = import(&ImportConfig::default(), b"a,b\n1,2\n\"oops");
        assert!(matches!(result, Err(TokenizeError::UnterminatedQuote { row: 2 })));
    }

    #[test]
    fn empty_data_produces_empty_table() {
        let table = import(&ImportConfig::default(), b"a,b\n").unwrap();
        assert_eq!(table.header.names, vec!["a", "b"]);
        assert!(table.rows.is_empty());
    }
}
