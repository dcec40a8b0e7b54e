//! Document decoding.
//!
//! A [`Decoder`] turns a whole document into a `Vec<Record>`:
//!
//! 1. the CSV reader splits the bytes into rows
//! 2. the first row (and in typed mode, the second) becomes the [`Schema`]
//! 3. every remaining row is decoded against the schema
//!
//! ## Row policy
//!
//! - A row whose first cell starts with the comment character is dropped,
//!   even when it is indented and the reader did not recognize it
//! - A row whose cells are all empty is dropped
//! - Only the first `schema.len()` cells of a row are looked at; extra cells
//!   are ignored and missing cells are simply absent from the record
//! - In typed mode with `skip_empty_columns`, columns without a declared type
//!   are left out of the record
//!
//! The first failing cell aborts the decode; no records are returned.
//!
//! ## Usage
//!
//! ```rust
//! use csvx::{CsvOptions, Decoder, Value};
//!
//! let decoder = Decoder::new(CsvOptions::typed()).unwrap();
//! let records = decoder.decode(b"foo,bar\nstring,int64\nfirst,10").unwrap();
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].get("foo"), Some(&Value::from("first")));
//! assert_eq!(records[0].get("bar"), Some(&Value::from(10)));
//! ```

use crate::coerce::coerce;
use crate::reader::{RawRow, ReaderConfig};
use crate::{CsvOptions, Error, FieldType, Mode, Record, Result, Schema, Value};
use tracing::{debug, trace};

/// A configured, reusable document decoder.
///
/// The decoder never changes after construction and holds no per-call state,
/// so one instance can serve any number of threads.
#[derive(Clone, Debug)]
pub struct Decoder {
    options: CsvOptions,
    reader: ReaderConfig,
}

impl Decoder {
    /// Creates a decoder, checking the options up front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] if the delimiter or comment character
    /// cannot be used by the CSV reader.
    pub fn new(options: CsvOptions) -> Result<Self> {
        let reader = ReaderConfig::from_options(&options)?;
        Ok(Decoder { options, reader })
    }

    /// The options this decoder was built with.
    #[must_use]
    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    /// Decodes a whole document.
    ///
    /// # Errors
    ///
    /// - [`Error::Syntax`] if the CSV reader rejects the input
    /// - [`Error::DocumentTooShort`] if the header rows are missing
    /// - [`Error::Cell`] wrapping the coercion error of the first bad cell
    pub fn decode(&self, data: &[u8]) -> Result<Vec<Record>> {
        let rows = self.reader.read_rows(data)?;
        let (schema, body) = self.split_header(rows)?;
        self.decode_rows(&schema, body)
    }

    /// Decodes a whole document held in a string.
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode`].
    pub fn decode_str(&self, data: &str) -> Result<Vec<Record>> {
        self.decode(data.as_bytes())
    }

    /// Reads only the header rows and returns the resulting schema.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`] or [`Error::DocumentTooShort`], as for
    /// [`Decoder::decode`].
    pub fn schema(&self, data: &[u8]) -> Result<Schema> {
        let rows = self.reader.read_rows(data)?;
        self.split_header(rows).map(|(schema, _)| schema)
    }

    /// Coerces one cell using a type declaration from the type-row grammar,
    /// with this decoder's reader settings for array cells.
    ///
    /// An empty `tag` returns the cell as a string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use csvx::{CsvOptions, Decoder, Value};
    ///
    /// let decoder = Decoder::new(CsvOptions::new()).unwrap();
    /// assert_eq!(
    ///     decoder.coerce("10,11", "int64,array").unwrap(),
    ///     Value::Array(vec![Value::from(10), Value::from(11)])
    /// );
    /// assert_eq!(decoder.coerce("", "*int").unwrap(), Value::Null);
    /// ```
    ///
    /// # Errors
    ///
    /// The coercion errors listed in [`coerce`](crate::coerce::coerce).
    pub fn coerce(&self, raw: &str, tag: &str) -> Result<Value> {
        match FieldType::parse(tag) {
            Some(ty) => coerce(raw, &ty, &self.reader),
            None => Ok(Value::String(raw.to_string())),
        }
    }

    fn split_header(&self, rows: Vec<RawRow>) -> Result<(Schema, Vec<RawRow>)> {
        let required = self.options.mode.header_rows();
        if rows.len() < required {
            return Err(Error::DocumentTooShort {
                required,
                found: rows.len(),
            });
        }

        let mut rows = rows.into_iter();
        let names = rows.next().map(|row| row.cells).unwrap_or_default();
        let types = match self.options.mode {
            Mode::Typed => rows.next().map(|row| row.cells),
            Mode::Untyped => None,
        };
        let schema = Schema::extract(&names, types.as_deref());
        debug!(
            "Extracted schema with {} columns ({:?} mode)",
            schema.len(),
            self.options.mode
        );

        Ok((schema, rows.collect()))
    }

    fn decode_rows(&self, schema: &Schema, rows: Vec<RawRow>) -> Result<Vec<Record>> {
        let typed = self.options.mode == Mode::Typed;
        let mut records = Vec::with_capacity(rows.len());
        let mut skipped = 0usize;

        for row in rows {
            if self.is_comment(&row) {
                trace!("Skipping comment row at line {}", row.line);
                skipped += 1;
                continue;
            }

            let cells = &row.cells[..row.cells.len().min(schema.len())];
            if cells.iter().all(String::is_empty) {
                trace!("Skipping blank row at line {}", row.line);
                skipped += 1;
                continue;
            }

            let mut record = Record::with_capacity(cells.len());
            for (idx, (cell, field)) in cells.iter().zip(schema.fields()).enumerate() {
                let value = match &field.ty {
                    Some(ty) => coerce(cell, ty, &self.reader)
                        .map_err(|e| e.at_cell(row.line, idx + 1, &field.name))?,
                    None if typed && self.options.skip_empty_columns => continue,
                    None => Value::String(cell.clone()),
                };
                record.insert(field.name.clone(), value);
            }
            records.push(record);
        }

        debug!(
            "Decoded {} records, skipped {} rows",
            records.len(),
            skipped
        );
        Ok(records)
    }

    fn is_comment(&self, row: &RawRow) -> bool {
        row.cells
            .first()
            .and_then(|cell| cell.chars().next())
            .is_some_and(|c| c == self.options.comment)
    }
}
