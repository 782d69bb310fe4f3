//! Schema command - print the bracket configuration format

use crate::core::ConfigDocument;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schema = schema_for!(ConfigDocument);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}
