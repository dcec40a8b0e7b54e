//! # csvx
//!
//! Decode delimited text into dynamically-typed records.
//!
//! The first row of a document names the columns. In **typed** mode the second
//! row declares a type for each column, and every cell is converted to that
//! type; in **untyped** mode every cell stays a string.
//!
//! ```text
//! name,age,scores,meta
//! string,*int,"float64,array",json
//! Alice,30,"1.5,2","{""team"": ""red""}"
//! Bob,,,
//! ```
//!
//! decodes to
//!
//! ```text
//! [{name: "Alice", age: 30,   scores: [1.5, 2.0], meta: {team: "red"}},
//!  {name: "Bob",   age: null, scores: [],         meta: null}]
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use csvx::{from_str, from_str_typed, Value};
//!
//! let records = from_str("foo,bar\nfirst,second").unwrap();
//! assert_eq!(records[0].get("bar"), Some(&Value::from("second")));
//!
//! let records = from_str_typed("foo,bar\n*string,*int\n,10").unwrap();
//! assert_eq!(records[0].get("foo"), Some(&Value::Null));
//! assert_eq!(records[0].get("bar"), Some(&Value::from(10)));
//! ```
//!
//! ## Type Declarations
//!
//! | Declaration | Decodes to |
//! |-------------|------------|
//! | `string` | string |
//! | `int`, `int64` | integer |
//! | `float64` | float |
//! | `bool` | boolean |
//! | `<type>,array` | array; the cell holds one delimited row |
//! | `json` | any value parsed from the embedded JSON document |
//! | `*<type>` | nullable: an empty cell is `null` instead of the zero value |
//!
//! See [`schema`] for the grammar and [`coerce`] for the conversion rules.
//!
//! ## Options
//!
//! ```rust
//! use csvx::{from_slice_with_options, CsvOptions};
//!
//! let options = CsvOptions::typed()
//!     .with_delimiter(';')
//!     .with_trim_leading_space(true);
//! let records = from_slice_with_options(b"a;b\nint;bool\n 1; true", options).unwrap();
//! assert_eq!(records.len(), 1);
//! ```
//!
//! Rows whose first cell starts with the comment character (`#` by default)
//! and rows whose cells are all empty are skipped. Decoding is all-or-nothing:
//! the first bad cell fails the whole document.
//!
//! ## Logging
//!
//! The decoder emits `tracing` events (`debug` per document, `trace` per
//! skipped row, `warn` for duplicate column names). Install a subscriber in
//! the application to see them.

pub mod coerce;
pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod reader;
pub mod schema;
pub mod value;

pub use de::Decoder;
pub use error::{Error, Result};
pub use map::{Map, Record};
pub use options::{CsvOptions, Mode};
pub use schema::{Field, FieldType, ScalarKind, Schema, TypeKind};
pub use value::{Number, Value};

use std::io;

/// Decode untyped CSV text: one header row, every cell a string.
///
/// # Examples
///
/// ```rust
/// use csvx::{from_str, Value};
///
/// let records = from_str("foo,bar\nfirst,second\n\n#comment").unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].get("foo"), Some(&Value::from("first")));
/// ```
///
/// # Errors
///
/// Returns an error if the document has no header row or the CSV reader
/// rejects it.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Vec<Record>> {
    from_slice(s.as_bytes())
}

/// Decode typed CSV text: a header row, a type row, then data.
///
/// # Examples
///
/// ```rust
/// use csvx::{from_str_typed, Value};
///
/// let records = from_str_typed("foo,bar\nstring,int64\nfirst,10").unwrap();
/// assert_eq!(records[0].get("bar"), Some(&Value::from(10)));
/// ```
///
/// # Errors
///
/// Returns an error if the document has fewer than two header rows, the CSV
/// reader rejects it, or any cell cannot be converted to its declared type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_typed(s: &str) -> Result<Vec<Record>> {
    from_slice_typed(s.as_bytes())
}

/// Decode untyped CSV bytes.
///
/// # Errors
///
/// See [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Vec<Record>> {
    from_slice_with_options(v, CsvOptions::untyped())
}

/// Decode typed CSV bytes.
///
/// # Errors
///
/// See [`from_str_typed`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice_typed(v: &[u8]) -> Result<Vec<Record>> {
    from_slice_with_options(v, CsvOptions::typed())
}

/// Decode CSV bytes with custom options.
///
/// # Errors
///
/// Returns [`Error::InvalidOptions`] for unusable options, otherwise see
/// [`Decoder::decode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice_with_options(v: &[u8], options: CsvOptions) -> Result<Vec<Record>> {
    Decoder::new(options)?.decode(v)
}

/// Read all of `reader`, then decode it as untyped CSV.
///
/// The input is buffered completely before decoding starts.
///
/// # Examples
///
/// ```rust
/// use csvx::from_reader;
/// use std::io::Cursor;
///
/// let records = from_reader(Cursor::new(b"a,b\n1,2")).unwrap();
/// assert_eq!(records.len(), 1);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise see [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R: io::Read>(reader: R) -> Result<Vec<Record>> {
    from_reader_with_options(reader, CsvOptions::untyped())
}

/// Read all of `reader`, then decode it as typed CSV.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise see [`from_str_typed`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_typed<R: io::Read>(reader: R) -> Result<Vec<Record>> {
    from_reader_with_options(reader, CsvOptions::typed())
}

/// Read all of `reader`, then decode it with custom options.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise see
/// [`from_slice_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_options<R: io::Read>(
    mut reader: R,
    options: CsvOptions,
) -> Result<Vec<Record>> {
    let decoder = Decoder::new(options)?;
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .map_err(|e| Error::io(&e.to_string()))?;
    decoder.decode(&buf)
}
