//! Import session orchestration.
//!
//! A session moves through `Unvalidated -> Validated -> {Previewed |
//! Committed}`. Validation happens once, before any I/O; previews are
//! re-runnable and reopen the source each time; committing consumes the
//! session, so each session materializes at most one table.

use crate::config::ConfigError;
use crate::config::ImportConfig;
use crate::config::ValidatedConfig;
use crate::error::ImportError;
use crate::helpers::reader::ImportSource;
use crate::table::classifier::classify;
use crate::table::importer::materialize;
use crate::table::preview::build_preview;
use crate::table::preview::PreviewResult;
use crate::table::Table;
use crate::tokenizer::Tokenizer;
use anyhow::Context;

/// A validated import configuration, ready to preview or commit.
#[derive(Clone, Debug)]
pub struct ImportSession {
    plan: ValidatedConfig,
}

impl ImportSession {
    /// Validates the configuration. A failed validation is terminal: no
    /// session is created and nothing has been parsed.
    pub fn validate(config: ImportConfig) -> Result<Self, ConfigError> {
        Ok(ImportSession {
            plan: config.validate()?,
        })
    }

    /// Generates a bounded preview. Re-runnable: the source is reopened on
    /// every call, so two previews over an unchanged source are identical.
    pub fn preview(
        &self,
        source: &ImportSource,
        limit: usize,
    ) -> Result<PreviewResult, ImportError> {
        tracing::debug!(source = %source.name(), limit, "generating import preview");
        let mut tokenizer = Tokenizer::new(source.open()?, &self.plan);
        let header = classify(&mut tokenizer, &self.plan)?;
        let result = build_preview(&mut tokenizer, header, limit)?;
        tracing::debug!(
            rows = result.total_rows_scanned,
            warnings = result.warnings.len(),
            "preview complete"
        );
        Ok(result)
    }

    /// Imports the full file into a caller-owned table. Consumes the
    /// session; independent tables come from independent sessions.
    pub fn commit(self, source: &ImportSource) -> Result<Table, ImportError> {
        tracing::debug!(source = %source.name(), "importing table");
        let mut tokenizer = Tokenizer::new(source.open()?, &self.plan);
        let header = classify(&mut tokenizer, &self.plan)?;
        let table = materialize(&mut tokenizer, header)?;
        tracing::debug!(
            columns = table.header.len(),
            rows = table.rows.len(),
            warnings = table.warnings.len(),
            "import complete"
        );
        Ok(table)
    }
}

/// Expands a glob pattern and imports every matched file with the same
/// configuration, one table per file.
pub fn import_files(config: &ImportConfig, pattern: &str) -> Result<Vec<Table>, ImportError> {
    let sources = ImportSource::expand(pattern)?;
    sources
        .iter()
        .map(|source| {
            let session = ImportSession::validate(config.clone())?;
            let table = session.commit(source).with_context(|| source.name())?;
            Ok(table)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RowWidthWarning;
    use crate::tokenizer::TokenizeError;
    use std::io::Write;

    #[test]
    fn invalid_config_is_rejected_before_parsing() {
        let config = ImportConfig::default().with_header_row(2).with_data_start_row(2);
        assert!(matches!(
            ImportSession::validate(config),
            Err(ConfigError::RowOrder { .. })
        ));
    }

    #[test]
    fn simple_csv_commit() {
        let session = ImportSession::validate(ImportConfig::default()).unwrap();
        let source = ImportSource::memory("a,b,c\n1,2,3\n4,5,6\n");
        let table = session.commit(&source).unwrap();
        assert_eq!(table.header.names, vec!["a", "b", "c"]);
        assert_eq!(table.rows, vec![vec!["1", "2", "3"], vec!["4", "5", "6"]]);
    }

    #[test]
    fn preview_is_idempotent() {
        let session = ImportSession::validate(ImportConfig::default()).unwrap();
        let source = ImportSource::memory("a,b\n1,2\n3,4\n5,6\n");
        let first = session.preview(&source, 2).unwrap();
        let second = session.preview(&source, 2).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.total_rows_scanned, 2);
    }

    #[test]
    fn preview_then_commit_shares_one_session_config() {
        let session = ImportSession::validate(ImportConfig::default()).unwrap();
        let source = ImportSource::memory("a,b\n1,2\n");
        let preview = session.preview(&source, 50).unwrap();
        assert_eq!(preview.sample_rows, vec![vec!["1", "2"]]);
        let table = session.commit(&source).unwrap();
        assert_eq!(table.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn width_mismatch_surfaces_as_warning_not_error() {
        let session = ImportSession::validate(ImportConfig::default()).unwrap();
        let source = ImportSource::memory("a,b,c\n1,2\n");
        let table = session.commit(&source).unwrap();
        assert_eq!(table.rows, vec![vec!["1", "2", ""]]);
        assert_eq!(
            table.warnings,
            vec![RowWidthWarning { row: 1, expected: 3, actual: 2 }]
        );
    }

    #[test]
    fn unterminated_quote_fails_commit_with_row_index() {
        let session = ImportSession::validate(ImportConfig::default()).unwrap();
        let source = ImportSource::memory("a,b\n\"abc");
        let error = session.commit(&source).unwrap_err();
        assert!(matches!(
            error,
            ImportError::Tokenize(TokenizeError::UnterminatedQuote { row: 1 })
        ));
        assert_eq!(error.source_row(), Some(1));
    }

    #[test]
    fn indexes_beyond_file_are_not_errors() {
        let session = ImportSession::validate(
            ImportConfig::default().with_header_row(10).with_data_start_row(11),
        )
        .unwrap();
        let source = ImportSource::memory("a,b\n1,2\n");
        let table = session.commit(&source).unwrap();
        assert!(table.header.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn missing_file_fails_with_source_error() {
        let session = ImportSession::validate(ImportConfig::default()).unwrap();
        let source = ImportSource::path("no_such_file.csv");
        assert!(matches!(
            session.commit(&source),
            Err(ImportError::Source(_))
        ));
    }

    #[test]
    fn commit_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name,age\nalice,30\nbob,25\n").unwrap();
        file.flush().unwrap();

        let session = ImportSession::validate(ImportConfig::default()).unwrap();
        let source = ImportSource::path(file.path());
        let table = session.commit(&source).unwrap();
        assert_eq!(table.header.names, vec!["name", "age"]);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn import_files_expands_a_pattern() {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in [("one.csv", "a,b\n1,2\n"), ("two.csv", "a,b\n3,4\n")] {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        let pattern = dir.path().join("*.csv");
        let tables = import_files(&ImportConfig::default(), pattern.to_str().unwrap()).unwrap();
        assert_eq!(tables.len(), 2);
        for table in &tables {
            assert_eq!(table.header.names, vec!["a", "b"]);
            assert_eq!(table.rows.len(), 1);
        }
    }

    #[test]
    fn import_files_reports_unmatched_patterns() {
        let result = import_files(&ImportConfig::default(), "src/*.does-not-exist");
        assert!(matches!(result, Err(ImportError::Source(_))));
    }

    #[test]
    fn tab_delimited_by_symbolic_name() {
        let config = ImportConfig::default().with_delimiter_name("tab").unwrap();
        let session = ImportSession::validate(config).unwrap();
        let source = ImportSource::memory("a\tb\n1\t2\n");
        let table = session.commit(&source).unwrap();
        assert_eq!(table.header.names, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1", "2"]]);
    }
}
