//! # delimport
//!
//! A streaming CSV preview/import engine. Given a configuration (delimiter,
//! quote, escape, header row, data start row) and a byte source, it either
//! produces a bounded preview for display or materializes the whole file
//! into an in-memory table.
//!
//! ## Features
//!
//! - **Streaming tokenizer**: quoted fields with embedded delimiters and
//!   newlines, escaped quotes, CRLF/CR/LF terminators, no whole-file
//!   buffering
//! - **Row classification**: configurable header row and data start row,
//!   with preamble rows in between discarded
//! - **Preview before commit**: bounded, re-runnable samples with inferred
//!   column kinds
//! - **Lenient width policy**: short rows padded, long rows truncated, each
//!   recorded as a warning alongside the result
//! - **Encodings**: any label `encoding_rs` knows, with BOM sniffing;
//!   undecodable bytes become replacement characters
//! - **Typed failures**: configuration, source, and tokenization errors are
//!   returned, never panicked across the boundary
//!
//! ## Example
//!
//! ```
//! use delimport::{ImportConfig, ImportSession, ImportSource};
//!
//! let session = ImportSession::validate(ImportConfig::default())?;
//! let source = ImportSource::memory("a,b,c\n1,2,3\n4,5,6\n");
//!
//! let preview = session.preview(&source, 50)?;
//! assert_eq!(preview.header.names, vec!["a", "b", "c"]);
//!
//! let table = session.commit(&source)?;
//! assert_eq!(table.rows.len(), 2);
//! # Ok::<(), delimport::ImportError>(())
//! ```

mod config;
mod error;
mod helpers;
mod session;
mod table;
mod tokenizer;

pub use crate::config::ConfigError;
pub use crate::config::DelimiterName;
pub use crate::config::ImportConfig;
pub use crate::error::ImportError;
pub use crate::helpers::reader::ImportSource;
pub use crate::helpers::reader::SourceError;
pub use crate::session::import_files;
pub use crate::session::ImportSession;
pub use crate::table::column::Column;
pub use crate::table::column::ColumnKind;
pub use crate::table::preview::PreviewResult;
pub use crate::table::preview::DEFAULT_PREVIEW_LIMIT;
pub use crate::table::Header;
pub use crate::table::RowWidthWarning;
pub use crate::table::Table;
pub use crate::tokenizer::RawRow;
pub use crate::tokenizer::TokenizeError;
