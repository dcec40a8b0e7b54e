//! Decoding a CSV file where every cell stays a string.
//!
//! Run with: cargo run --example untyped [path/to/file.csv]

use std::error::Error;
use std::{env, fs};

fn main() -> Result<(), Box<dyn Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/data/untyped.csv".to_string());
    let bytes = fs::read(&path)?;

    let records = csvx::from_slice(&bytes)?;

    println!("untyped data from {}:", path);
    for record in &records {
        let fields: Vec<String> = record.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        println!("  {}", fields.join(" "));
    }

    Ok(())
}
