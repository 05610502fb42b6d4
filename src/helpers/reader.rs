use glob::glob;
use std::fs::File;
use std::io::BufReader;
use std::io::Cursor;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Cannot open '{name}': {source}")]
    Open {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Read from source failed: {0}")]
    Read(#[from] std::io::Error),

    #[error("{0}")]
    Pattern(#[from] glob::PatternError),

    #[error("{0}")]
    Glob(#[from] glob::GlobError),

    #[error("No files match pattern '{0}'")]
    NoMatches(String),
}

/// Locator for a byte source. Opening yields a fresh reader each time, so a
/// session can re-run previews against the same locator.
#[derive(Clone, Debug)]
pub enum ImportSource {
    /// A file on the local filesystem
    Path(PathBuf),
    /// An in-memory buffer
    Memory(Vec<u8>),
}

impl ImportSource {
    pub fn path<P: AsRef<Path>>(path: P) -> Self {
        ImportSource::Path(path.as_ref().to_path_buf())
    }

    pub fn memory<B: Into<Vec<u8>>>(bytes: B) -> Self {
        ImportSource::Memory(bytes.into())
    }

    /// Opens the source for reading. The handle is scoped to one preview or
    /// commit pass and dropped on every exit path.
    pub fn open(&self) -> Result<ByteSource<'_>, SourceError> {
        match self {
            ImportSource::Path(path) => {
                let file = File::open(path).map_err(|source| SourceError::Open {
                    name: path.to_string_lossy().to_string(),
                    source,
                })?;
                Ok(ByteSource::Local(BufReader::new(file)))
            }
            ImportSource::Memory(bytes) => Ok(ByteSource::Memory(Cursor::new(bytes.as_slice()))),
        }
    }

    /// Expands a glob pattern into one source per matched file.
    pub fn expand(pattern: &str) -> Result<Vec<ImportSource>, SourceError> {
        let mut sources = Vec::new();
        for entry in glob(pattern)? {
            sources.push(ImportSource::Path(entry?));
        }
        if sources.is_empty() {
            return Err(SourceError::NoMatches(pattern.to_string()));
        }
        Ok(sources)
    }

    /// Display name used in log events and error context.
    pub fn name(&self) -> String {
        match self {
            ImportSource::Path(path) => path.to_string_lossy().to_string(),
            ImportSource::Memory(bytes) => format!("<memory:{} bytes>", bytes.len()),
        }
    }
}

/// An opened byte source feeding the tokenizer.
pub enum ByteSource<'a> {
    /// Local file reader
    Local(BufReader<File>),
    /// In-memory buffer reader
    Memory(Cursor<&'a [u8]>),
}

impl Read for ByteSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            ByteSource::Local(reader) => reader.read(buf),
            ByteSource::Memory(reader) => reader.read(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_reads_back_its_bytes() {
        let source = ImportSource::memory("a,b,c");
        let mut content = String::new();
        source.open().unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "a,b,c");

        // Reopening yields the same bytes again
        let mut content = String::new();
        source.open().unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "a,b,c");
    }

    #[test]
    fn open_local_file() {
        // Cargo.toml always exists relative to the crate root
        assert!(ImportSource::path("Cargo.toml").open().is_ok());

        let source = ImportSource::path("no_such_file.csv");
        let result = source.open();
        assert!(matches!(result, Err(SourceError::Open { .. })));
    }

    #[test]
    fn expand_matches_local_files() {
        let sources = ImportSource::expand("src/*.rs").unwrap();
        assert!(!sources.is_empty());

        let result = ImportSource::expand("src/*.does-not-exist");
        assert!(matches!(result, Err(SourceError::NoMatches(_))));
    }

    #[test]
    fn source_names_identify_the_origin() {
        assert_eq!(ImportSource::path("data.csv").name(), "data.csv");
        assert_eq!(ImportSource::memory("abc").name(), "<memory:3 bytes>");
    }
}
