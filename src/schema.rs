//! Column schema taken from a document's header rows.
//!
//! The first row names the columns. In typed mode the second row declares a
//! type for each column using this small grammar:
//!
//! ```text
//! type   := ["*"] scalar [",array"] | ["*"] "json"
//! scalar := "string" | "int" | "int64" | "float64" | "bool"
//! ```
//!
//! A leading `*` marks the column nullable: an empty cell decodes to
//! [`Value::Null`](crate::Value::Null) instead of the type's zero value.
//! A column whose type cell is empty, or that lies beyond the end of the type
//! row, has no declared type and decodes as the raw string.
//!
//! Because a type declaration usually contains the delimiter, array types
//! have to be quoted in the type row:
//!
//! ```text
//! name,scores,tags
//! string,"int64,array","*string,array"
//! ```
//!
//! Type strings are parsed once, when the schema is built.
//!
//! ```rust
//! use csvx::{Schema, TypeKind, ScalarKind};
//!
//! let names = vec!["id".to_string(), "scores".to_string(), "note".to_string()];
//! let types = vec!["int64".to_string(), "*float64,array".to_string()];
//! let schema = Schema::extract(&names, Some(&types));
//!
//! assert_eq!(schema.len(), 3);
//! let scores = schema.field(1).unwrap().ty.as_ref().unwrap();
//! assert_eq!(scores.kind, TypeKind::Array(ScalarKind::Float64));
//! assert!(scores.nullable);
//! assert!(schema.field(2).unwrap().ty.is_none());
//! ```

use std::collections::HashSet;
use std::fmt;
use tracing::warn;

const NULLABLE_MARKER: char = '*';
const ARRAY_SUFFIX: &str = ",array";

/// Element kinds: the scalar types, also usable as array elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Int,
    Int64,
    Float64,
    Bool,
}

impl ScalarKind {
    /// The name used for this kind in a type row.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Int => "int",
            ScalarKind::Int64 => "int64",
            ScalarKind::Float64 => "float64",
            ScalarKind::Bool => "bool",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(ScalarKind::String),
            "int" => Some(ScalarKind::Int),
            "int64" => Some(ScalarKind::Int64),
            "float64" => Some(ScalarKind::Float64),
            "bool" => Some(ScalarKind::Bool),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a declared column type decodes to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Scalar(ScalarKind),
    /// A cell holding a single delimited row, one element per sub-cell.
    Array(ScalarKind),
    /// A cell holding a JSON document.
    Json,
    /// A declaration outside the vocabulary. Kept so that the error names the
    /// offending tag when a cell of this column is decoded.
    Unsupported(String),
}

impl TypeKind {
    /// Parses a type declaration with the nullable marker already removed.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s == "json" {
            return TypeKind::Json;
        }
        if let Some(element) = s.strip_suffix(ARRAY_SUFFIX) {
            return ScalarKind::parse(element)
                .map_or_else(|| TypeKind::Unsupported(s.to_string()), TypeKind::Array);
        }
        ScalarKind::parse(s).map_or_else(|| TypeKind::Unsupported(s.to_string()), TypeKind::Scalar)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Scalar(kind) => write!(f, "{}", kind),
            TypeKind::Array(kind) => write!(f, "{}{}", kind, ARRAY_SUFFIX),
            TypeKind::Json => f.write_str("json"),
            TypeKind::Unsupported(raw) => f.write_str(raw),
        }
    }
}

/// A declared column type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldType {
    pub kind: TypeKind,
    pub nullable: bool,
}

impl FieldType {
    /// Parses a type cell. Returns `None` for an empty cell.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use csvx::{FieldType, TypeKind, ScalarKind};
    ///
    /// let ty = FieldType::parse("*int64").unwrap();
    /// assert_eq!(ty.kind, TypeKind::Scalar(ScalarKind::Int64));
    /// assert!(ty.nullable);
    /// assert!(FieldType::parse("").is_none());
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let (nullable, rest) = match raw.strip_prefix(NULLABLE_MARKER) {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        Some(FieldType {
            kind: TypeKind::parse(rest),
            nullable,
        })
    }

    /// Creates a non-nullable type.
    #[must_use]
    pub const fn new(kind: TypeKind) -> Self {
        FieldType {
            kind,
            nullable: false,
        }
    }

    /// Creates a nullable type.
    #[must_use]
    pub const fn nullable(kind: TypeKind) -> Self {
        FieldType {
            kind,
            nullable: true,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}{}", NULLABLE_MARKER, self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

/// A named column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    /// `None` when the column has no declared type.
    pub ty: Option<FieldType>,
}

/// Positional column table for one document.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Builds the schema from the name row and an optional type row.
    ///
    /// One field is created per name. Types are overlaid by index; names past
    /// the end of the type row stay untyped, and type cells past the end of
    /// the name row are ignored. Duplicate names are kept as-is: when a row
    /// is decoded, the later column overwrites the earlier one.
    #[must_use]
    pub fn extract(names: &[String], types: Option<&[String]>) -> Self {
        let types = types.unwrap_or(&[]);
        let fields: Vec<Field> = names
            .iter()
            .enumerate()
            .map(|(idx, name)| Field {
                name: name.clone(),
                ty: types.get(idx).and_then(|raw| FieldType::parse(raw)),
            })
            .collect();

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                warn!(
                    "Duplicate column name {:?}: later columns overwrite earlier ones",
                    field.name
                );
            }
        }

        Schema { fields }
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The field at column `idx`.
    #[must_use]
    pub fn field(&self, idx: usize) -> Option<&Field> {
        self.fields.get(idx)
    }

    /// Iterates fields in column order.
    pub fn fields(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }
}
