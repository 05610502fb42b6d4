use encoding_rs::Encoding;
use thiserror::Error;

/// Errors related to import configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Data start row {data_start} must be greater than header row {header}")]
    RowOrder { header: usize, data_start: usize },

    #[error("Unknown delimiter name '{0}'")]
    UnknownDelimiter(String),

    #[error("Unknown encoding label '{0}'")]
    UnknownEncoding(String),

    #[error("Delimiter and quote character are both '{0}'")]
    DelimiterQuoteClash(char),

    #[error("'{0:?}' cannot be used as a delimiter")]
    ReservedDelimiter(char),
}

/// Closed set of symbolic delimiter names accepted from user input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DelimiterName {
    Comma,
    Tab,
    Space,
    Semicolon,
    Pipe,
}

impl DelimiterName {
    /// Returns the delimiter character this name stands for.
    pub const fn as_char(&self) -> char {
        match self {
            Self::Comma => ',',
            Self::Tab => '\t',
            Self::Space => ' ',
            Self::Semicolon => ';',
            Self::Pipe => '|',
        }
    }

    /// Returns the canonical string representation of the name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comma => "comma",
            Self::Tab => "tab",
            Self::Space => "space",
            Self::Semicolon => "semicolon",
            Self::Pipe => "pipe",
        }
    }
}

impl TryFrom<&str> for DelimiterName {
    type Error = ConfigError;

    /// Parses a symbolic delimiter name. The set is closed: anything outside
    /// it is rejected instead of falling through to a default.
    fn try_from(name: &str) -> Result<Self, Self::Error> {
        match name.to_ascii_lowercase().as_str() {
            "comma" => Ok(Self::Comma),
            "tab" => Ok(Self::Tab),
            "space" => Ok(Self::Space),
            "semicolon" => Ok(Self::Semicolon),
            "pipe" => Ok(Self::Pipe),
            _ => Err(ConfigError::UnknownDelimiter(name.to_string())),
        }
    }
}

/// User-supplied import configuration, unvalidated.
#[derive(Clone, Debug)]
pub struct ImportConfig {
    /// Field separator character
    pub delimiter: char,
    /// Field-quoting character, enables embedded delimiters and newlines
    pub quote: char,
    /// Literal-quote escape inside quoted fields
    pub escape: char,
    /// 0-based row supplying column names
    pub header_row_index: usize,
    /// 0-based row where data begins; must be greater than the header row
    pub data_start_row_index: usize,
    /// Optional encoding label (e.g. "utf-8", "windows-1252"); UTF-8 when None
    pub encoding: Option<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            delimiter: ',',
            quote: '"',
            escape: '\\',
            header_row_index: 0,
            data_start_row_index: 1,
            encoding: None,
        }
    }
}

impl ImportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the delimiter from a symbolic name ("comma", "tab", "space",
    /// "semicolon", "pipe").
    pub fn with_delimiter_name(self, name: &str) -> Result<Self, ConfigError> {
        let name = DelimiterName::try_from(name)?;
        Ok(self.with_delimiter(name.as_char()))
    }

    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_escape(mut self, escape: char) -> Self {
        self.escape = escape;
        self
    }

    pub fn with_header_row(mut self, index: usize) -> Self {
        self.header_row_index = index;
        self
    }

    pub fn with_data_start_row(mut self, index: usize) -> Self {
        self.data_start_row_index = index;
        self
    }

    pub fn with_encoding(mut self, label: &str) -> Self {
        self.encoding = Some(label.to_string());
        self
    }

    /// Checks the configuration invariants and resolves the encoding label.
    /// Nothing is parsed before this succeeds.
    pub(crate) fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        if self.data_start_row_index <= self.header_row_index {
            return Err(ConfigError::RowOrder {
                header: self.header_row_index,
                data_start: self.data_start_row_index,
            });
        }
        if self.delimiter == self.quote {
            return Err(ConfigError::DelimiterQuoteClash(self.delimiter));
        }
        if self.delimiter == '\n' || self.delimiter == '\r' {
            return Err(ConfigError::ReservedDelimiter(self.delimiter));
        }
        let encoding = match &self.encoding {
            Some(label) => Encoding::for_label(label.as_bytes())
                .ok_or_else(|| ConfigError::UnknownEncoding(label.to_owned()))?,
            None => encoding_rs::UTF_8,
        };
        Ok(ValidatedConfig {
            delimiter: self.delimiter,
            quote: self.quote,
            escape: self.escape,
            header_row_index: self.header_row_index,
            data_start_row_index: self.data_start_row_index,
            encoding,
        })
    }
}

/// Configuration that has passed invariant checks.
#[derive(Clone, Debug)]
pub(crate) struct ValidatedConfig {
    pub(crate) delimiter: char,
    pub(crate) quote: char,
    pub(crate) escape: char,
    pub(crate) header_row_index: usize,
    pub(crate) data_start_row_index: usize,
    pub(crate) encoding: &'static Encoding,
}
