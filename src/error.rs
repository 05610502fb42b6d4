use crate::config::ConfigError;
use crate::helpers::reader::SourceError;
use crate::tokenizer::TokenizeError;
use thiserror::Error;

/// Crate-level failure type for preview and commit operations.
/// Aggregates the typed errors from each import stage; nothing here is ever
/// thrown across the boundary as a panic.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    Tokenize(#[from] TokenizeError),
}

impl ImportError {
    /// The 0-based source row index, for failures tied to a specific row.
    pub fn source_row(&self) -> Option<usize> {
        match self {
            ImportError::Tokenize(TokenizeError::UnterminatedQuote { row }) => Some(*row),
            _ => None,
        }
    }
}
