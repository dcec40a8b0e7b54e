//! Decoding a CSV file whose second row declares column types.
//!
//! Run with: cargo run --example typed [path/to/file.csv]

use csvx::{CsvOptions, Decoder, Value};
use std::error::Error;
use std::{env, fs};

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_integer() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/data/typed.csv".to_string());
    let bytes = fs::read(&path)?;

    let decoder = Decoder::new(CsvOptions::typed().with_trim_leading_space(true))?;

    let schema = decoder.schema(&bytes)?;
    println!("schema:");
    for field in schema.fields() {
        match &field.ty {
            Some(ty) => println!("  {}: {}", field.name, ty),
            None => println!("  {}: (untyped)", field.name),
        }
    }

    let records = decoder.decode(&bytes)?;
    println!("\ntyped data as JSON:");
    println!("{}", serde_json::to_string_pretty(&records)?);

    if let Some(first) = records.first() {
        println!("\nvalue kinds of the first record:");
        for (name, value) in first {
            println!("  {}: {}", name, kind(value));
        }
    }

    Ok(())
}
