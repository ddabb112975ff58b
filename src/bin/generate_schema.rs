//! Generate JSON Schema for the dirtree configuration file
//!
//! Usage:
//!   cargo run --bin generate_schema > config-schema.json

use anyhow::Context;
use dirtree::config::TreeConfig;
use schemars::schema_for;

fn main() -> anyhow::Result<()> {
    let schema = schema_for!(TreeConfig);
    let output = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    println!("{}", output);
    Ok(())
}
