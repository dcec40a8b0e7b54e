//! Cell type coercion.
//!
//! Converts one raw cell into a [`Value`] according to its declared
//! [`FieldType`].
//!
//! ## Rules
//!
//! | Type | empty cell | empty cell, nullable | non-empty cell |
//! |------|-----------|----------------------|----------------|
//! | `string` | `""` | `null` | the text |
//! | `int`, `int64` | `0` | `null` | parsed integer |
//! | `float64` | `0.0` | `null` | parsed float |
//! | `bool` | `false` | `null` | `1 t T TRUE true True` / `0 f F FALSE false False` |
//! | `<scalar>,array` | `[]` | `null` | one delimited row, one element per sub-cell |
//! | `json` | `null` | `null` | parsed JSON document |
//!
//! Scalar cells are parsed exactly as written, without trimming. Array
//! sub-cells are re-read with the document's own delimiter and quoting, then
//! trimmed. Array elements are more forgiving than scalars:
//!
//! - an empty numeric sub-cell is `0`; one holding only whitespace is not
//!   empty and fails to parse
//! - a `bool` sub-cell is `true` only when it reads exactly `true`; anything
//!   else, including text that is not a boolean at all, is `false`
//!
//! Numeric sub-cells that are present but malformed still fail.

use crate::reader::ReaderConfig;
use crate::schema::{FieldType, ScalarKind, TypeKind};
use crate::{Error, Number, Result, Value};

/// Converts `raw` into a value of type `ty`.
///
/// `reader` is used to split array cells; pass the configuration of the
/// document the cell came from.
///
/// # Errors
///
/// - [`Error::NumericParse`] if a scalar or numeric array element is malformed
/// - [`Error::ArrayMultiRow`] if an array cell holds more than one row
/// - [`Error::Syntax`] if the CSV reader rejects an array cell
/// - [`Error::EmbeddedDocument`] if a `json` cell is not valid JSON
/// - [`Error::UnsupportedType`] for a type outside the vocabulary
pub fn coerce(raw: &str, ty: &FieldType, reader: &ReaderConfig) -> Result<Value> {
    match &ty.kind {
        TypeKind::Scalar(kind) => {
            if raw.is_empty() {
                return Ok(empty_value(ty.nullable, || zero_value(*kind)));
            }
            parse_scalar(raw, *kind)
        }
        TypeKind::Array(element) => {
            if raw.is_empty() {
                return Ok(empty_value(ty.nullable, || Value::Array(Vec::new())));
            }
            parse_array(raw, *element, reader)
        }
        TypeKind::Json => {
            if raw.is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str::<Value>(raw).map_err(Error::embedded_document)
        }
        TypeKind::Unsupported(tag) => Err(Error::unsupported_type(tag)),
    }
}

fn empty_value(nullable: bool, zero: impl FnOnce() -> Value) -> Value {
    if nullable {
        Value::Null
    } else {
        zero()
    }
}

fn zero_value(kind: ScalarKind) -> Value {
    match kind {
        ScalarKind::String => Value::String(String::new()),
        ScalarKind::Int | ScalarKind::Int64 => Value::Number(Number::Integer(0)),
        ScalarKind::Float64 => Value::Number(Number::Float(0.0)),
        ScalarKind::Bool => Value::Bool(false),
    }
}

fn parse_scalar(raw: &str, kind: ScalarKind) -> Result<Value> {
    let invalid = || Error::numeric_parse(raw, kind.as_str());
    match kind {
        ScalarKind::String => Ok(Value::String(raw.to_string())),
        ScalarKind::Int => raw
            .parse::<isize>()
            .map(|n| Value::Number(Number::Integer(n as i64)))
            .map_err(|_| invalid()),
        ScalarKind::Int64 => raw
            .parse::<i64>()
            .map(|n| Value::Number(Number::Integer(n)))
            .map_err(|_| invalid()),
        ScalarKind::Float64 => raw
            .parse::<f64>()
            .map(|n| Value::Number(Number::Float(n)))
            .map_err(|_| invalid()),
        ScalarKind::Bool => parse_bool(raw).map(Value::Bool).ok_or_else(invalid),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_array(raw: &str, element: ScalarKind, reader: &ReaderConfig) -> Result<Value> {
    let mut rows = reader.read_rows(raw.as_bytes())?;
    if rows.len() > 1 {
        return Err(Error::ArrayMultiRow { element });
    }
    // A cell holding only a comment line reads as zero rows.
    let cells = rows.pop().map(|row| row.cells).unwrap_or_default();

    cells
        .into_iter()
        .map(|cell| parse_element(cell, element))
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

fn parse_element(cell: String, element: ScalarKind) -> Result<Value> {
    match element {
        ScalarKind::String => Ok(Value::String(cell)),
        ScalarKind::Bool => Ok(Value::Bool(cell.trim() == "true")),
        ScalarKind::Int | ScalarKind::Int64 | ScalarKind::Float64 => {
            if cell.is_empty() {
                Ok(zero_value(element))
            } else {
                parse_scalar(cell.trim(), element)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CsvOptions;

    fn reader() -> ReaderConfig {
        ReaderConfig::from_options(&CsvOptions::new()).unwrap()
    }

    fn coerce_tag(raw: &str, tag: &str) -> Result<Value> {
        coerce(raw, &FieldType::parse(tag).unwrap(), &reader())
    }

    #[test]
    fn test_empty_scalars_are_zero_values() {
        assert_eq!(coerce_tag("", "string").unwrap(), Value::from(""));
        assert_eq!(coerce_tag("", "int").unwrap(), Value::from(0));
        assert_eq!(coerce_tag("", "int64").unwrap(), Value::from(0));
        assert_eq!(coerce_tag("", "float64").unwrap(), Value::from(0.0));
        assert_eq!(coerce_tag("", "bool").unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_empty_nullable_is_null() {
        for tag in ["*string", "*int", "*int64", "*float64", "*bool", "*int64,array", "*json"] {
            assert_eq!(coerce_tag("", tag).unwrap(), Value::Null, "tag {}", tag);
        }
    }

    #[test]
    fn test_scalars() {
        assert_eq!(coerce_tag("hello", "string").unwrap(), Value::from("hello"));
        assert_eq!(coerce_tag("-12", "int").unwrap(), Value::from(-12));
        assert_eq!(coerce_tag("+10", "int64").unwrap(), Value::from(10));
        assert_eq!(coerce_tag("1.5e2", "float64").unwrap(), Value::from(150.0));
        assert_eq!(coerce_tag("T", "bool").unwrap(), Value::Bool(true));
        assert_eq!(coerce_tag("0", "bool").unwrap(), Value::Bool(false));
        assert_eq!(coerce_tag("10", "*int").unwrap(), Value::from(10));
    }

    #[test]
    fn test_scalars_are_not_trimmed() {
        assert!(coerce_tag(" 10", "int64").is_err());
        assert_eq!(coerce_tag(" a ", "string").unwrap(), Value::from(" a "));
    }

    #[test]
    fn test_scalar_parse_errors() {
        assert_eq!(
            coerce_tag("notanumber", "int64").unwrap_err(),
            Error::numeric_parse("notanumber", "int64")
        );
        assert!(matches!(
            coerce_tag("yes", "bool"),
            Err(Error::NumericParse { .. })
        ));
        assert!(matches!(
            coerce_tag("1.5", "int"),
            Err(Error::NumericParse { .. })
        ));
    }

    #[test]
    fn test_int64_array() {
        assert_eq!(
            coerce_tag("10,11", "int64,array").unwrap(),
            Value::Array(vec![Value::from(10), Value::from(11)])
        );
        assert_eq!(coerce_tag("", "int64,array").unwrap(), Value::Array(vec![]));
        assert_eq!(
            coerce_tag("1,,3", "int64,array").unwrap(),
            Value::Array(vec![Value::from(1), Value::from(0), Value::from(3)])
        );
    }

    #[test]
    fn test_whitespace_only_array_element_is_not_empty() {
        assert_eq!(
            coerce_tag("1, ,3", "int64,array").unwrap_err(),
            Error::numeric_parse("", "int64")
        );
        assert!(matches!(
            coerce_tag("1.5,\t", "float64,array"),
            Err(Error::NumericParse { .. })
        ));
    }

    #[test]
    fn test_float_and_string_arrays() {
        assert_eq!(
            coerce_tag("1.5, 2", "float64,array").unwrap(),
            Value::Array(vec![Value::from(1.5), Value::from(2.0)])
        );
        assert_eq!(
            coerce_tag("a, b", "string,array").unwrap(),
            Value::Array(vec![Value::from("a"), Value::from(" b")])
        );
    }

    #[test]
    fn test_bool_array_is_permissive() {
        assert_eq!(
            coerce_tag("true, true,notabool,1", "bool,array").unwrap(),
            Value::Array(vec![
                Value::Bool(true),
                Value::Bool(true),
                Value::Bool(false),
                Value::Bool(false),
            ])
        );
        assert_eq!(
            coerce_tag("notanumber", "bool,array").unwrap(),
            Value::Array(vec![Value::Bool(false)])
        );
    }

    #[test]
    fn test_numeric_arrays_stay_strict() {
        assert!(matches!(
            coerce_tag("notanumber", "int64,array"),
            Err(Error::NumericParse { .. })
        ));
        assert!(matches!(
            coerce_tag("1,x", "float64,array"),
            Err(Error::NumericParse { .. })
        ));
    }

    #[test]
    fn test_multi_row_arrays() {
        for (tag, element) in [
            ("string,array", ScalarKind::String),
            ("int,array", ScalarKind::Int),
            ("int64,array", ScalarKind::Int64),
            ("float64,array", ScalarKind::Float64),
            ("bool,array", ScalarKind::Bool),
        ] {
            assert_eq!(
                coerce_tag("1,2\n3,4", tag).unwrap_err(),
                Error::ArrayMultiRow { element }
            );
        }
    }

    #[test]
    fn test_array_uses_document_delimiter() {
        let reader =
            ReaderConfig::from_options(&CsvOptions::new().with_delimiter(';')).unwrap();
        let ty = FieldType::parse("int64,array").unwrap();
        assert_eq!(
            coerce("1;2", &ty, &reader).unwrap(),
            Value::Array(vec![Value::from(1), Value::from(2)])
        );
    }

    #[test]
    fn test_json() {
        let value = coerce_tag(r#"{"key":10}"#, "json").unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("key"), Some(&Value::from(10)));

        assert_eq!(coerce_tag("", "json").unwrap(), Value::Null);
        assert_eq!(
            coerce_tag("[1,\"a\"]", "*json").unwrap(),
            Value::Array(vec![Value::from(1), Value::from("a")])
        );
    }

    #[test]
    fn test_json_errors() {
        let err = coerce_tag("{not json", "json").unwrap_err();
        assert!(matches!(err, Error::EmbeddedDocument { .. }));
        assert!(err.to_string().starts_with("unable to parse json in csv"));
    }

    #[test]
    fn test_unsupported_type() {
        assert_eq!(
            coerce_tag("x", "date").unwrap_err(),
            Error::unsupported_type("date")
        );
        assert_eq!(
            coerce_tag("", "*date").unwrap_err(),
            Error::unsupported_type("date")
        );
    }
}
