//! Raw row reading.
//!
//! Tokenizing, quoting and line splitting belong to the [`csv`] crate. This
//! module configures a `csv::Reader` from [`CsvOptions`] and collects its
//! output into [`RawRow`]s: every row keeps its own length (rows may be
//! ragged), no row is treated as a header, and reader errors are passed
//! through as [`Error::Syntax`].
//!
//! The `csv` crate only opens a quoted field at the field's first byte, so
//! with leading-space trimming on, the whitespace in front of a quote is
//! removed before the input reaches it.

use std::borrow::Cow;

use crate::{CsvOptions, Error, Result};

/// One tokenized row with the line it started on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the input.
    pub line: u64,
    pub cells: Vec<String>,
}

impl RawRow {
    /// Returns `true` if every cell is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(String::is_empty)
    }
}

/// Reader settings already narrowed to what the `csv` crate accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReaderConfig {
    pub delimiter: u8,
    pub comment: u8,
    pub trim_leading_space: bool,
}

impl ReaderConfig {
    /// Narrows validated options to byte-sized reader settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] if the options fail
    /// [`CsvOptions::validate`].
    pub fn from_options(options: &CsvOptions) -> Result<Self> {
        options.validate()?;
        Ok(ReaderConfig {
            delimiter: ascii_byte(options.delimiter)?,
            comment: ascii_byte(options.comment)?,
            trim_leading_space: options.trim_leading_space,
        })
    }

    /// Reads every row of `data`.
    ///
    /// Blank lines are skipped by the reader. A line starting with the comment
    /// byte is skipped too, but only when the comment is the very first byte
    /// of the line; callers that need to drop indented comments must check
    /// the first cell themselves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] if the reader rejects the input (for example
    /// invalid UTF-8).
    pub fn read_rows(&self, data: &[u8]) -> Result<Vec<RawRow>> {
        let data = self.strip_space_before_quotes(data);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .comment(Some(self.comment))
            .from_reader(&*data);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, csv::Position::line);
            let cells = record
                .iter()
                .map(|cell| {
                    if self.trim_leading_space {
                        cell.trim_start().to_string()
                    } else {
                        cell.to_string()
                    }
                })
                .collect();
            rows.push(RawRow { line, cells });
        }
        Ok(rows)
    }

    /// Drops spaces and tabs between the start of a field and its opening
    /// quote. Everything else, line breaks included, is copied unchanged so
    /// line numbers still match the input.
    fn strip_space_before_quotes<'a>(&self, data: &'a [u8]) -> Cow<'a, [u8]> {
        if !self.trim_leading_space || !data.contains(&b'"') {
            return Cow::Borrowed(data);
        }

        let mut out = Vec::with_capacity(data.len());
        let mut state = FieldState::Start;
        let mut line_start = true;
        let mut i = 0;
        while i < data.len() {
            let b = data[i];
            if is_line_end(b) && state != FieldState::Quoted {
                state = FieldState::Start;
                line_start = true;
                out.push(b);
                i += 1;
                continue;
            }

            match state {
                FieldState::Start => {
                    if line_start && b == self.comment {
                        let end = data[i..]
                            .iter()
                            .position(|&c| is_line_end(c))
                            .map_or(data.len(), |n| i + n);
                        out.extend_from_slice(&data[i..end]);
                        i = end;
                        continue;
                    }
                    line_start = false;
                    if self.is_space(b) {
                        let run = data[i..].iter().take_while(|&&c| self.is_space(c)).count();
                        if data.get(i + run) == Some(&b'"') {
                            i += run;
                            continue;
                        }
                        state = FieldState::Unquoted;
                    } else if b == b'"' {
                        state = FieldState::Quoted;
                    } else if b != self.delimiter {
                        state = FieldState::Unquoted;
                    }
                }
                FieldState::Unquoted => {
                    if b == self.delimiter {
                        state = FieldState::Start;
                    }
                }
                FieldState::Quoted => {
                    if b == b'"' {
                        state = FieldState::ClosingQuote;
                    }
                }
                FieldState::ClosingQuote => {
                    state = if b == b'"' {
                        FieldState::Quoted
                    } else if b == self.delimiter {
                        FieldState::Start
                    } else {
                        FieldState::Unquoted
                    };
                }
            }
            out.push(b);
            i += 1;
        }
        Cow::Owned(out)
    }

    fn is_space(&self, b: u8) -> bool {
        b != self.delimiter && matches!(b, b' ' | b'\t')
    }
}

/// Where the pre-pass is within the current field.
#[derive(Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Start,
    Unquoted,
    Quoted,
    /// A quote inside a quoted field; either an escaped quote or the end.
    ClosingQuote,
}

fn is_line_end(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

fn ascii_byte(c: char) -> Result<u8> {
    u8::try_from(c)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| Error::InvalidOptions(format!("{:?} is not an ASCII character", c)))
}
