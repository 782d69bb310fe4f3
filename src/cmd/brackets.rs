//! Brackets command - one jurisdiction's bracket table, optionally applied to an income

use super::{format_amount, format_rate, tax_year, Context, FilingStatusArg};
use crate::core::{Assessment, BracketTable, FilingStatus, Taxes};
use clap::Args;
use rust_decimal::Decimal;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BracketsCommand {
    /// Jurisdiction name (e.g. Federal, CA, ID)
    #[arg(short, long)]
    jurisdiction: String,

    /// Tax year (defaults to the current year)
    #[arg(short = 'y', long)]
    tax_year: Option<i32>,

    /// Tax filing status
    #[arg(short, long, value_enum)]
    filing_status: FilingStatusArg,

    /// Taxable income to break down bracket by bracket
    #[arg(short, long)]
    income: Option<Decimal>,

    /// Output as CSV instead of formatted table
    #[arg(long, conflicts_with = "json")]
    csv: bool,

    /// Output the table in the bracket configuration format
    #[arg(long, conflicts_with = "income")]
    json: bool,
}

/// Row for the bracket table output
#[derive(Debug, Clone, Tabled, serde::Serialize)]
pub struct BracketRow {
    #[tabled(rename = "Over")]
    pub lower: String,

    #[tabled(rename = "Up To")]
    pub upper: String,

    #[tabled(rename = "Rate")]
    pub rate: String,

    #[tabled(rename = "Taxed")]
    pub taxed: String,

    #[tabled(rename = "Tax")]
    pub tax: String,
}

impl BracketsCommand {
    pub fn exec(&self, ctx: &Context) -> anyhow::Result<()> {
        let jurisdiction = ctx.registry.resolve(&self.jurisdiction)?;
        let status: FilingStatus = self.filing_status.into();
        let taxes = jurisdiction.load(ctx.source.as_ref(), tax_year(self.tax_year), status)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(taxes.brackets())?);
            return Ok(());
        }

        let assessment = self.income.map(|income| taxes.assess(income)).transpose()?;
        let rows = match &assessment {
            Some(assessment) => assessment_rows(assessment),
            None => table_rows(taxes.brackets()),
        };

        if self.csv {
            write_csv(&rows)
        } else {
            print_table(&taxes, &rows, assessment.as_ref());
            Ok(())
        }
    }
}

fn table_rows(table: &BracketTable) -> Vec<BracketRow> {
    let brackets = table.sorted();
    let last = brackets.len() - 1;
    let mut lower: u64 = 0;
    brackets
        .iter()
        .enumerate()
        .map(|(idx, bracket)| {
            let row = BracketRow {
                lower: lower.to_string(),
                upper: if idx == last {
                    String::new()
                } else {
                    bracket.threshold.to_string()
                },
                rate: format_rate(bracket.rate),
                taxed: String::new(),
                tax: String::new(),
            };
            lower = bracket.threshold;
            row
        })
        .collect()
}

fn assessment_rows(assessment: &Assessment) -> Vec<BracketRow> {
    assessment
        .slices
        .iter()
        .map(|slice| BracketRow {
            lower: slice.lower.to_string(),
            upper: slice.upper.map_or(String::new(), |upper| upper.to_string()),
            rate: format_rate(slice.rate),
            taxed: format_amount(slice.taxed),
            tax: format_amount(slice.tax),
        })
        .collect()
}

fn print_table(taxes: &Taxes, rows: &[BracketRow], assessment: Option<&Assessment>) {
    println!();
    println!(
        "{} BRACKETS ({}, {}) - top rate {}",
        taxes.jurisdiction().to_uppercase(),
        taxes.year(),
        taxes.status(),
        format_rate(taxes.brackets().top_rate())
    );
    println!();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);

    if let Some(assessment) = assessment {
        println!();
        println!(
            "TOTAL TAX: ${} on ${}",
            format_amount(assessment.total()),
            format_amount(assessment.taxable_income)
        );
    }
    println!();
}

fn write_csv(rows: &[BracketRow]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
