pub mod brackets;
pub mod estimate;
pub mod jurisdictions;
pub mod schema;
pub mod validate;

use crate::core::{ConfigSource, DirSource, EmbeddedSource, FilingStatus, Registry, TaxYear};
use clap::ValueEnum;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::path::PathBuf;

/// Registry and configuration source shared by the commands
pub struct Context {
    pub registry: Registry,
    pub source: Box<dyn ConfigSource>,
}

impl Context {
    /// Built-in jurisdictions, reading brackets from `data_dir` when given
    /// and from the embedded tables otherwise.
    pub fn new(data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let registry = crate::jurisdictions::registry()?;
        let source: Box<dyn ConfigSource> = match data_dir {
            Some(dir) => {
                log::info!("Reading bracket configuration from {}", dir.display());
                Box::new(DirSource::new(dir))
            }
            None => Box::new(EmbeddedSource),
        };
        Ok(Context { registry, source })
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FilingStatusArg {
    Single,
    #[value(name = "married_joint", alias = "married-joint")]
    MarriedJoint,
    #[value(name = "married_separate", alias = "married-separate")]
    MarriedSeparate,
    #[value(name = "head_of_house", alias = "head-of-house")]
    HeadOfHouse,
}

impl From<FilingStatusArg> for FilingStatus {
    fn from(arg: FilingStatusArg) -> Self {
        match arg {
            FilingStatusArg::Single => FilingStatus::Single,
            FilingStatusArg::MarriedJoint => FilingStatus::MarriedJoint,
            FilingStatusArg::MarriedSeparate => FilingStatus::MarriedSeparate,
            FilingStatusArg::HeadOfHouse => FilingStatus::HeadOfHouse,
        }
    }
}

fn tax_year(year: Option<i32>) -> TaxYear {
    year.map_or_else(TaxYear::current, TaxYear)
}

/// Amount to the cent, half-cents rounded away from zero
fn format_amount(amount: Decimal) -> String {
    let amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", amount)
}

fn format_usd(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-${}", format_amount(amount.abs()))
    } else {
        format!("${}", format_amount(amount))
    }
}

fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * dec!(100)).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_formatting() {
        assert_eq!(format_usd(dec!(18079.5)), "$18079.50");
        assert_eq!(format_usd(dec!(-12.345)), "-$12.35");
        assert_eq!(format_usd(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn filing_status_values_match_config_names() {
        for status in FilingStatus::ALL {
            let arg = FilingStatusArg::from_str(status.name(), false).unwrap();
            assert_eq!(FilingStatus::from(arg), status);
        }
        let arg = FilingStatusArg::from_str("married-separate", false).unwrap();
        assert_eq!(FilingStatus::from(arg), FilingStatus::MarriedSeparate);
    }

    #[test]
    fn rate_formatting() {
        assert_eq!(format_rate(dec!(0.10)), "10%");
        assert_eq!(format_rate(dec!(0.06925)), "6.925%");
        assert_eq!(format_rate(dec!(0.093)), "9.3%");
    }
}
