//! Error types for decoding.
//!
//! Decoding is all-or-nothing: the first error aborts the whole document and
//! no partial records are returned.
//!
//! ## Error Categories
//!
//! - **Document shape**: [`Error::DocumentTooShort`] when the header (and type)
//!   rows are missing
//! - **Reader errors**: [`Error::Syntax`] passed through from the CSV reader
//! - **Coercion errors**: [`Error::NumericParse`], [`Error::ArrayMultiRow`],
//!   [`Error::EmbeddedDocument`], [`Error::UnsupportedType`]
//! - **Configuration**: [`Error::InvalidOptions`]
//!
//! Coercion errors raised while decoding a document arrive wrapped in
//! [`Error::Cell`], which adds the line, column and field name. Use
//! [`Error::root`] to look at the underlying error.
//!
//! ## Examples
//!
//! ```rust
//! use csvx::{from_str_typed, Error};
//!
//! let err = from_str_typed("id\nint64\nabc").unwrap_err();
//! assert!(err.to_string().contains("line 3"));
//! assert!(matches!(err.root(), Error::NumericParse { .. }));
//! ```

use crate::schema::ScalarKind;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while decoding a document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The document has fewer header rows than the decode mode needs
    #[error("document is too short: expected at least {required} header row(s), found {found}")]
    DocumentTooShort { required: usize, found: usize },

    /// Error reported by the underlying CSV reader
    #[error("CSV syntax error: {0}")]
    Syntax(String),

    /// An embedded array cell decoded to more than one row
    #[error("only one row is allowed for type '{element},array'")]
    ArrayMultiRow { element: ScalarKind },

    /// A `json` cell could not be parsed
    #[error("unable to parse json in csv: {message}")]
    EmbeddedDocument { message: String },

    /// A cell could not be parsed as its declared type. Covers the numeric
    /// types and `bool`.
    #[error("cannot parse {value:?} as {ty}")]
    NumericParse { value: String, ty: String },

    /// The type row declares a type outside the supported vocabulary
    #[error("unsupported type format type: {ty}")]
    UnsupportedType { ty: String },

    /// The decoder options cannot be used with the CSV reader
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// IO error while buffering input
    #[error("IO error: {0}")]
    Io(String),

    /// A cell failed to decode; carries its location
    #[error("line {line}, column {column} ({field:?}): {source}")]
    Cell {
        line: u64,
        column: usize,
        field: String,
        source: Box<Error>,
    },
}

impl Error {
    /// Creates a [`Error::NumericParse`] for `value` declared as `ty`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use csvx::Error;
    ///
    /// let err = Error::numeric_parse("abc", "int64");
    /// assert_eq!(err.to_string(), "cannot parse \"abc\" as int64");
    /// ```
    pub fn numeric_parse(value: &str, ty: &str) -> Self {
        Error::NumericParse {
            value: value.to_string(),
            ty: ty.to_string(),
        }
    }

    /// Creates a [`Error::UnsupportedType`] naming the offending tag.
    pub fn unsupported_type(ty: &str) -> Self {
        Error::UnsupportedType { ty: ty.to_string() }
    }

    /// Creates a [`Error::EmbeddedDocument`] from the JSON parser's message.
    pub fn embedded_document<T: fmt::Display>(msg: T) -> Self {
        Error::EmbeddedDocument {
            message: msg.to_string(),
        }
    }

    /// Creates a [`Error::Syntax`] from a reader error.
    pub fn syntax<T: fmt::Display>(msg: T) -> Self {
        Error::Syntax(msg.to_string())
    }

    /// Creates an invalid options error.
    pub fn invalid_options(msg: &str) -> Self {
        Error::InvalidOptions(msg.to_string())
    }

    /// Creates an I/O error for reading failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Attaches a cell location to a coercion error.
    pub(crate) fn at_cell(self, line: u64, column: usize, field: &str) -> Self {
        Error::Cell {
            line,
            column,
            field: field.to_string(),
            source: Box::new(self),
        }
    }

    /// Returns the error without any location wrapper.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use csvx::Error;
    ///
    /// let err = Error::unsupported_type("date");
    /// assert_eq!(err.root(), &err);
    /// ```
    #[must_use]
    pub fn root(&self) -> &Error {
        match self {
            Error::Cell { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::syntax(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
