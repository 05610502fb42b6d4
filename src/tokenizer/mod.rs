//! Streaming CSV tokenizer.
//!
//! Splits a byte source into rows of string fields honoring the configured
//! delimiter, quote, and escape characters. Bytes are read incrementally and
//! decoded through `encoding_rs`, so arbitrarily large files tokenize without
//! unbounded memory growth. Quote and escape state carries across chunk
//! boundaries, including newlines embedded inside quoted fields.

use crate::config::ValidatedConfig;
use crate::helpers::reader::ByteSource;
use crate::helpers::reader::SourceError;
use encoding_rs::Decoder;
use std::io::BufRead;
use std::io::BufReader;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenizeError {
    /// A quoted field was still open when the stream ended. The row index is
    /// the 0-based source row where the field started.
    #[error("Unterminated quoted field starting at row {row}")]
    UnterminatedQuote { row: usize },

    #[error("{0}")]
    Source(#[from] SourceError),
}

/// A tokenized source row: ordered fields tagged with the 0-based row index.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRow {
    pub index: usize,
    pub fields: Vec<String>,
}

/// Pull-based tokenizer over an opened byte source.
pub(crate) struct Tokenizer<'a> {
    reader: BufReader<ByteSource<'a>>,
    decoder: Decoder,
    /// Decoded characters not yet consumed
    text: String,
    /// Byte offset of the next character in `text`
    pos: usize,
    /// Set once the decoder has been flushed at end of stream
    done: bool,
    /// Index of the next row to emit
    row_index: usize,
    delimiter: char,
    quote: char,
    escape: char,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(source: ByteSource<'a>, plan: &ValidatedConfig) -> Self {
        Tokenizer {
            reader: BufReader::new(source),
            // BOM-sniffing decoder: a UTF-8/UTF-16 BOM overrides the label
            decoder: plan.encoding.new_decoder(),
            text: String::new(),
            pos: 0,
            done: false,
            row_index: 0,
            delimiter: plan.delimiter,
            quote: plan.quote,
            escape: plan.escape,
        }
    }

    /// Tokenizes the next source row. Returns `Ok(None)` at a clean end of
    /// stream; a quoted field left open at that point is an error, never
    /// silently dropped data.
    pub(crate) fn next_row(&mut self) -> Result<Option<RawRow>, TokenizeError> {
        let row_index = self.row_index;
        let mut fields: Vec<String> = Vec::new();
        let mut field = String::new();
        let mut quoted = false;
        let mut in_quotes = false;
        loop {
            let character = match self.next_char()? {
                Some(character) => character,
                None => {
                    if in_quotes {
                        return Err(TokenizeError::UnterminatedQuote { row: row_index });
                    }
                    if fields.is_empty() && field.is_empty() && !quoted {
                        return Ok(None);
                    }
                    // Final line without a trailing newline
                    fields.push(field);
                    self.row_index += 1;
                    return Ok(Some(RawRow { index: row_index, fields }));
                }
            };
            if in_quotes {
                if character == self.escape && self.escape != self.quote {
                    match self.peek_char()? {
                        Some(next) if next == self.quote || next == self.escape => {
                            self.next_char()?;
                            field.push(next);
                        }
                        _ => field.push(character),
                    }
                } else if character == self.quote {
                    if self.peek_char()? == Some(self.quote) {
                        // Doubled quote is a literal quote
                        self.next_char()?;
                        field.push(self.quote);
                    } else {
                        in_quotes = false;
                    }
                } else {
                    // Embedded delimiters and newlines stay literal
                    field.push(character);
                }
            } else if character == self.quote && field.is_empty() && !quoted {
                quoted = true;
                in_quotes = true;
            } else if character == self.delimiter {
                fields.push(std::mem::take(&mut field));
                quoted = false;
            } else if character == '\n' {
                fields.push(field);
                self.row_index += 1;
                return Ok(Some(RawRow { index: row_index, fields }));
            } else if character == '\r' {
                if self.peek_char()? == Some('\n') {
                    self.next_char()?;
                }
                fields.push(field);
                self.row_index += 1;
                return Ok(Some(RawRow { index: row_index, fields }));
            } else {
                field.push(character);
            }
        }
    }

    fn next_char(&mut self) -> Result<Option<char>, TokenizeError> {
        if !self.refill()? {
            return Ok(None);
        }
        match self.text[self.pos..].chars().next() {
            Some(character) => {
                self.pos += character.len_utf8();
                Ok(Some(character))
            }
            None => Ok(None),
        }
    }

    fn peek_char(&mut self) -> Result<Option<char>, TokenizeError> {
        if !self.refill()? {
            return Ok(None);
        }
        Ok(self.text[self.pos..].chars().next())
    }

    /// Ensures at least one decoded character is pending. Returns false once
    /// the source is drained and the decoder flushed.
    fn refill(&mut self) -> Result<bool, TokenizeError> {
        loop {
            if self.pos < self.text.len() {
                return Ok(true);
            }
            if self.done {
                return Ok(false);
            }
            self.text.clear();
            self.pos = 0;
            let chunk = self.reader.fill_buf().map_err(SourceError::from)?;
            if chunk.is_empty() {
                // Flush any partial sequence held by the decoder
                let capacity = self.decoder.max_utf8_buffer_length(0).unwrap_or(16);
                self.text.reserve(capacity);
                let _ = self.decoder.decode_to_string(&[], &mut self.text, true);
                self.done = true;
            } else {
                let length = chunk.len();
                let capacity = self
                    .decoder
                    .max_utf8_buffer_length(length)
                    .unwrap_or(length * 3 + 16);
                self.text.reserve(capacity);
                let (_result, read, _had_errors) =
                    self.decoder.decode_to_string(chunk, &mut self.text, false);
                self.reader.consume(read);
            }
        }
    }
}
