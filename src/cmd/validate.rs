//! Validate command - check a bracket configuration document before using it

use super::format_rate;
use crate::core::parse_document;
use anyhow::Context as _;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Bracket configuration document (JSON)
    file: PathBuf,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Summary of one filing status table
#[derive(Debug, Serialize)]
struct TableSummary {
    filing_status: String,
    brackets: usize,
    top_rate: String,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let text = std::fs::read_to_string(&self.file)
            .with_context(|| format!("reading {}", self.file.display()))?;
        let tables = parse_document(&text)
            .with_context(|| format!("invalid bracket configuration {}", self.file.display()))?;

        let summaries: Vec<TableSummary> = tables
            .iter()
            .map(|(status, table)| TableSummary {
                filing_status: status.to_string(),
                brackets: table.entries().len(),
                top_rate: format_rate(table.top_rate()),
            })
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
            return Ok(());
        }

        println!();
        println!("\u{2713} {} is valid", self.file.display());
        println!();
        for summary in &summaries {
            println!(
                "  {:18} {:2} brackets, top rate {}",
                summary.filing_status, summary.brackets, summary.top_rate
            );
        }
        println!();
        Ok(())
    }
}
