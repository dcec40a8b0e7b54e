//! Configuration options for decoding.
//!
//! - [`CsvOptions`]: delimiter, comment character, trimming and skip policy
//! - [`Mode`]: whether the second row of the document declares column types
//!
//! Every option has a concrete default (`,` delimiter, `#` comment, untyped)
//! from the moment the value is created. Options are plain data: build them
//! once and hand them to as many [`Decoder`](crate::Decoder)s or threads as
//! needed.
//!
//! ## Examples
//!
//! ```rust
//! use csvx::{CsvOptions, Mode};
//!
//! let options = CsvOptions::typed()
//!     .with_delimiter(';')
//!     .with_skip_empty_columns(true);
//!
//! assert_eq!(options.mode, Mode::Typed);
//! assert_eq!(options.delimiter, ';');
//! assert_eq!(options.comment, '#');
//! ```

use crate::{Error, Result};

/// Decode mode.
///
/// - **Untyped**: the first row names the columns, every cell is a string
/// - **Typed**: the first row names the columns, the second row declares their
///   types (see [`TypeKind`](crate::TypeKind))
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Untyped,
    Typed,
}

impl Mode {
    /// Number of header rows the mode consumes before data rows start.
    #[must_use]
    pub const fn header_rows(&self) -> usize {
        match self {
            Mode::Untyped => 1,
            Mode::Typed => 2,
        }
    }
}

/// Configuration options for decoding.
#[derive(Clone, Debug, PartialEq)]
pub struct CsvOptions {
    pub delimiter: char,
    /// Lines starting with this character are ignored.
    pub comment: char,
    pub trim_leading_space: bool,
    /// In typed mode, leave columns without a declared type out of the records.
    pub skip_empty_columns: bool,
    pub mode: Mode,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: ',',
            comment: '#',
            trim_leading_space: false,
            skip_empty_columns: false,
            mode: Mode::default(),
        }
    }
}

impl CsvOptions {
    /// Creates default options (comma delimiter, `#` comments, untyped).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use csvx::{CsvOptions, Mode};
    ///
    /// let options = CsvOptions::new();
    /// assert_eq!(options.delimiter, ',');
    /// assert_eq!(options.mode, Mode::Untyped);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates default options in untyped mode.
    #[must_use]
    pub fn untyped() -> Self {
        Self::default()
    }

    /// Creates default options in typed mode.
    #[must_use]
    pub fn typed() -> Self {
        CsvOptions {
            mode: Mode::Typed,
            ..Default::default()
        }
    }

    /// Sets the field delimiter. Must be a single-byte ASCII character.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the comment character. Must be a single-byte ASCII character.
    #[must_use]
    pub fn with_comment(mut self, comment: char) -> Self {
        self.comment = comment;
        self
    }

    /// Strips leading whitespace from every cell.
    #[must_use]
    pub fn with_trim_leading_space(mut self, trim: bool) -> Self {
        self.trim_leading_space = trim;
        self
    }

    /// Omits columns with an empty type declaration (typed mode only).
    #[must_use]
    pub fn with_skip_empty_columns(mut self, skip: bool) -> Self {
        self.skip_empty_columns = skip;
        self
    }

    /// Sets the decode mode.
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Checks that the options can drive the CSV reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] if the delimiter or comment is not a
    /// single ASCII byte, is a quote or line break, or if both are the same.
    pub fn validate(&self) -> Result<()> {
        check_special("delimiter", self.delimiter)?;
        check_special("comment", self.comment)?;
        if self.delimiter == self.comment {
            return Err(Error::invalid_options(
                "delimiter and comment must be different characters",
            ));
        }
        Ok(())
    }
}

fn check_special(name: &str, c: char) -> Result<()> {
    if !c.is_ascii() {
        return Err(Error::InvalidOptions(format!(
            "{} {:?} is not a single-byte ASCII character",
            name, c
        )));
    }
    if matches!(c, '"' | '\r' | '\n') {
        return Err(Error::InvalidOptions(format!(
            "{} {:?} conflicts with CSV quoting or line breaks",
            name, c
        )));
    }
    Ok(())
}
