//! Estimate command - federal and state income tax plus take-home pay

use super::{format_amount, format_rate, format_usd, tax_year, Context, FilingStatusArg};
use crate::core::{FilingStatus, TaxYear};
use crate::jurisdictions::FEDERAL;
use anyhow::Context as _;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct EstimateCommand {
    /// Gross income in USD, also known as total compensation
    #[arg(long)]
    gross_income: Decimal,

    /// Income that lowers taxable income, e.g. 401k or other tax advantaged contributions
    #[arg(long, alias = "deductable-income")]
    deductible_income: Decimal,

    /// Estimated monthly cost of living, not including housing
    #[arg(long)]
    monthly_expenses: Decimal,

    /// Rent or mortgage per month
    #[arg(long)]
    monthly_housing: Decimal,

    /// Cost of benefits per month
    #[arg(long, conflicts_with = "yearly_benefits")]
    monthly_benefits: Option<Decimal>,

    /// Cost of benefits per year
    #[arg(long)]
    yearly_benefits: Option<Decimal>,

    /// Fraction of take-home income saved for investments (e.g. 0.15)
    #[arg(long, default_value_t = Decimal::ZERO)]
    after_tax_savings: Decimal,

    /// Tax year (defaults to the current year)
    #[arg(short = 'y', long)]
    tax_year: Option<i32>,

    /// Tax filing status
    #[arg(short, long, value_enum)]
    filing_status: FilingStatusArg,

    /// State whose income tax applies (e.g. CA, ID)
    #[arg(short, long)]
    state_taxes: String,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Everything the report prints, computed up front
#[derive(Debug, Clone, PartialEq)]
struct Estimate {
    tax_year: TaxYear,
    state: String,
    gross_income: Decimal,
    deductions: Decimal,
    reported_wages: Decimal,
    federal_tax: Decimal,
    state_tax: Decimal,
    yearly_benefits: Decimal,
    take_home: Decimal,
    yearly_housing: Decimal,
    yearly_expenses: Decimal,
    cost_of_living: Decimal,
    /// Take-home after living costs, nothing saved
    final_take_home: Decimal,
    savings_rate: Decimal,
    /// Share of take-home saved before paying living costs
    before_expenses: Savings,
    /// Share of what is left once living costs are paid
    after_expenses: Savings,
}

/// Savings taken at one point in the budget and what is left afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Savings {
    saved: Decimal,
    final_take_home: Decimal,
}

/// Result of arithmetic on user-supplied amounts, `None` on overflow
fn in_range(amount: Option<Decimal>) -> anyhow::Result<Decimal> {
    amount.context("amount out of range")
}

#[derive(Debug, Serialize)]
struct EstimateData {
    tax_year: String,
    filing_status: String,
    state: String,
    gross_income: String,
    deductions: String,
    reported_wages: String,
    federal_tax: String,
    state_tax: String,
    yearly_benefits: String,
    take_home: String,
    yearly_housing: String,
    yearly_expenses: String,
    cost_of_living: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    savings: Option<SavingsData>,
    final_take_home: String,
}

#[derive(Debug, Serialize)]
struct SavingsData {
    rate_pct: String,
    before_expenses: SavingsOutcome,
    after_expenses: SavingsOutcome,
}

#[derive(Debug, Serialize)]
struct SavingsOutcome {
    saved: String,
    final_take_home: String,
}

impl From<Savings> for SavingsOutcome {
    fn from(savings: Savings) -> Self {
        SavingsOutcome {
            saved: format_amount(savings.saved),
            final_take_home: format_amount(savings.final_take_home),
        }
    }
}

impl EstimateCommand {
    pub fn exec(&self, ctx: &Context) -> anyhow::Result<()> {
        if self.after_tax_savings < Decimal::ZERO || self.after_tax_savings > Decimal::ONE {
            anyhow::bail!(
                "after-tax savings must be a fraction between 0 and 1, got {}",
                self.after_tax_savings
            );
        }

        // Both jurisdictions are checked before any brackets are read
        let federal = ctx.registry.resolve(FEDERAL)?;
        let state = ctx.registry.resolve(&self.state_taxes)?;
        if !state.is_state() {
            let states: Vec<_> = ctx.registry.states().map(|j| j.name()).collect();
            anyhow::bail!(
                "{} is not a state (states: {})",
                state,
                states.join(", ")
            );
        }

        let year = tax_year(self.tax_year);
        let status: FilingStatus = self.filing_status.into();
        let taxable_income = self.taxable_income()?;

        let federal_tax = federal
            .load(ctx.source.as_ref(), year, status)?
            .income_tax(taxable_income)
            .with_context(|| format!("calculating {} tax", federal))?;
        let state_tax = state
            .load(ctx.source.as_ref(), year, status)?
            .income_tax(taxable_income)
            .with_context(|| format!("calculating {} tax", state))?;

        let estimate = self.estimate(year, federal_tax, state_tax)?;
        log::info!(
            "{} {}: federal {} state {}",
            year,
            status,
            estimate.federal_tax,
            estimate.state_tax
        );

        if self.json {
            self.print_json(&estimate, status)
        } else {
            self.print_report(&estimate);
            Ok(())
        }
    }

    /// Gross income less deductions, never below zero
    fn taxable_income(&self) -> anyhow::Result<Decimal> {
        let wages = in_range(self.gross_income.checked_sub(self.deductible_income))?;
        if wages < Decimal::ZERO {
            log::warn!("Deductions exceed gross income, taxable income is zero");
            Ok(Decimal::ZERO)
        } else {
            Ok(wages)
        }
    }

    fn yearly_benefits(&self) -> anyhow::Result<Decimal> {
        match (self.yearly_benefits, self.monthly_benefits) {
            (Some(yearly), _) => Ok(yearly),
            (None, Some(monthly)) => in_range(monthly.checked_mul(dec!(12))),
            (None, None) => Ok(Decimal::ZERO),
        }
    }

    fn estimate(
        &self,
        tax_year: TaxYear,
        federal_tax: Decimal,
        state_tax: Decimal,
    ) -> anyhow::Result<Estimate> {
        let yearly_benefits = self.yearly_benefits()?;
        let reported_wages = in_range(self.gross_income.checked_sub(self.deductible_income))?;
        let take_home = in_range(
            reported_wages
                .checked_sub(federal_tax)
                .and_then(|amount| amount.checked_sub(state_tax))
                .and_then(|amount| amount.checked_sub(yearly_benefits)),
        )?;
        let yearly_housing = in_range(self.monthly_housing.checked_mul(dec!(12)))?;
        let yearly_expenses = in_range(self.monthly_expenses.checked_mul(dec!(12)))?;
        let cost_of_living = in_range(yearly_housing.checked_add(yearly_expenses))?;
        let final_take_home = in_range(take_home.checked_sub(cost_of_living))?;

        let saved_before = in_range(take_home.checked_mul(self.after_tax_savings))?;
        let saved_after = in_range(final_take_home.checked_mul(self.after_tax_savings))?;

        Ok(Estimate {
            tax_year,
            state: self.state_taxes.clone(),
            gross_income: self.gross_income,
            deductions: self.deductible_income,
            reported_wages,
            federal_tax,
            state_tax,
            yearly_benefits,
            take_home,
            yearly_housing,
            yearly_expenses,
            cost_of_living,
            final_take_home,
            savings_rate: self.after_tax_savings,
            before_expenses: Savings {
                saved: saved_before,
                final_take_home: in_range(final_take_home.checked_sub(saved_before))?,
            },
            after_expenses: Savings {
                saved: saved_after,
                final_take_home: in_range(final_take_home.checked_sub(saved_after))?,
            },
        })
    }

    fn print_report(&self, estimate: &Estimate) {
        println!();
        println!("Income Tax Estimations for Tax Year {}", estimate.tax_year);
        println!("==============================================");
        println!();
        println!("Gross income: {}", format_usd(estimate.gross_income));
        println!("Income deductions: {}", format_usd(estimate.deductions));
        println!("Reported wages: {}", format_usd(estimate.reported_wages));
        println!();

        println!("Federal taxes due: {}", format_usd(estimate.federal_tax));
        println!(
            "{} state taxes due: {}",
            estimate.state,
            format_usd(estimate.state_tax)
        );
        println!(
            "Yearly benefits costs: {} (per month: {})",
            format_usd(estimate.yearly_benefits),
            format_usd(estimate.yearly_benefits / dec!(12))
        );
        println!();

        println!("Pre-expenses take home: {}", format_usd(estimate.take_home));
        println!();

        println!(
            "Yearly housing costs: {} (per month: {})",
            format_usd(estimate.yearly_housing),
            format_usd(self.monthly_housing)
        );
        println!(
            "Yearly living expenses: {} (per month: {})",
            format_usd(estimate.yearly_expenses),
            format_usd(self.monthly_expenses)
        );
        println!(
            "Annual cost of living: {}",
            format_usd(estimate.cost_of_living)
        );
        println!();

        if estimate.savings_rate.is_zero() {
            println!("Final take home: {}", format_usd(estimate.final_take_home));
            println!();
            return;
        }

        let rate = format_rate(estimate.savings_rate);
        let before = estimate.before_expenses;
        println!(
            "Savings before expenses at {}: {}",
            rate,
            format_usd(before.saved)
        );
        println!("Final take home: {}", format_usd(before.final_take_home));
        println!();

        let after = estimate.after_expenses;
        println!(
            "Savings after expenses at {}: {}",
            rate,
            format_usd(after.saved)
        );
        println!("Final take home: {}", format_usd(after.final_take_home));
        println!();
    }

    fn print_json(&self, estimate: &Estimate, status: FilingStatus) -> anyhow::Result<()> {
        let savings = (!estimate.savings_rate.is_zero()).then(|| SavingsData {
            rate_pct: format!("{}", (estimate.savings_rate * dec!(100)).normalize()),
            before_expenses: estimate.before_expenses.into(),
            after_expenses: estimate.after_expenses.into(),
        });

        let data = EstimateData {
            tax_year: estimate.tax_year.to_string(),
            filing_status: status.to_string(),
            state: estimate.state.clone(),
            gross_income: format_amount(estimate.gross_income),
            deductions: format_amount(estimate.deductions),
            reported_wages: format_amount(estimate.reported_wages),
            federal_tax: format_amount(estimate.federal_tax),
            state_tax: format_amount(estimate.state_tax),
            yearly_benefits: format_amount(estimate.yearly_benefits),
            take_home: format_amount(estimate.take_home),
            yearly_housing: format_amount(estimate.yearly_housing),
            yearly_expenses: format_amount(estimate.yearly_expenses),
            cost_of_living: format_amount(estimate.cost_of_living),
            savings,
            final_take_home: format_amount(estimate.final_take_home),
        };

        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        estimate: EstimateCommand,
    }

    fn parse(args: &[&str]) -> EstimateCommand {
        let base = [
            "itc",
            "--gross-income",
            "110000",
            "--deductible-income",
            "10000",
            "--monthly-expenses",
            "1000",
            "--monthly-housing",
            "1500",
            "--filing-status",
            "single",
            "--state-taxes",
            "ID",
        ];
        let args = base.iter().chain(args.iter());
        Harness::try_parse_from(args).unwrap().estimate
    }

    #[test]
    fn take_home_without_savings() {
        let cmd = parse(&[]);
        let estimate = cmd
            .estimate(TaxYear(2020), dec!(18079.50), dec!(6654.52))
            .unwrap();

        assert_eq!(estimate.reported_wages, dec!(100000));
        assert_eq!(estimate.take_home, dec!(75265.98));
        assert_eq!(estimate.cost_of_living, dec!(30000));
        assert_eq!(estimate.final_take_home, dec!(45265.98));
    }

    #[test]
    fn savings_before_and_after_expenses() {
        let cmd = parse(&["--after-tax-savings", "0.10"]);
        let estimate = cmd
            .estimate(TaxYear(2020), dec!(20000), dec!(5000))
            .unwrap();
        // take home: 100000 - 25000 = 75000
        assert_eq!(
            estimate.before_expenses,
            Savings {
                saved: dec!(7500),
                final_take_home: dec!(37500),
            }
        );
        assert_eq!(
            estimate.after_expenses,
            Savings {
                saved: dec!(4500),
                final_take_home: dec!(40500),
            }
        );
    }

    #[test]
    fn monthly_benefits_are_annualised() {
        let cmd = parse(&["--monthly-benefits", "250"]);
        assert_eq!(cmd.yearly_benefits().unwrap(), dec!(3000));

        let estimate = cmd
            .estimate(TaxYear(2020), Decimal::ZERO, Decimal::ZERO)
            .unwrap();
        assert_eq!(estimate.take_home, dec!(97000));
    }

    #[test]
    fn yearly_benefits_taken_as_is() {
        let cmd = parse(&["--yearly-benefits", "1200"]);
        assert_eq!(cmd.yearly_benefits().unwrap(), dec!(1200));
    }

    #[test]
    fn overflowing_amounts_are_errors() {
        let mut cmd = parse(&[]);
        cmd.monthly_housing = Decimal::MAX;
        let err = cmd
            .estimate(TaxYear(2020), Decimal::ZERO, Decimal::ZERO)
            .unwrap_err();
        assert_eq!(err.to_string(), "amount out of range");

        let mut cmd = parse(&["--monthly-benefits", "1"]);
        cmd.monthly_benefits = Some(Decimal::MAX);
        assert!(cmd.yearly_benefits().is_err());

        let mut cmd = parse(&[]);
        cmd.gross_income = Decimal::MAX;
        cmd.deductible_income = Decimal::MIN;
        assert!(cmd.taxable_income().is_err());
    }

    #[test]
    fn benefit_options_conflict() {
        let result = Harness::try_parse_from([
            "itc",
            "--gross-income",
            "1",
            "--deductible-income",
            "0",
            "--monthly-expenses",
            "0",
            "--monthly-housing",
            "0",
            "--filing-status",
            "single",
            "--state-taxes",
            "ID",
            "--monthly-benefits",
            "1",
            "--yearly-benefits",
            "12",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn deductable_alias_accepted() {
        let result = Harness::try_parse_from([
            "itc",
            "--gross-income",
            "50000",
            "--deductable-income",
            "5000",
            "--monthly-expenses",
            "0",
            "--monthly-housing",
            "0",
            "--filing-status",
            "head-of-house",
            "--state-taxes",
            "CA",
        ]);
        assert_eq!(result.unwrap().estimate.deductible_income, dec!(5000));
    }

    #[test]
    fn deductions_above_income_clamp_taxable_income() {
        let mut cmd = parse(&[]);
        assert_eq!(cmd.taxable_income().unwrap(), dec!(100000));

        cmd.deductible_income = dec!(200000);
        assert_eq!(cmd.taxable_income().unwrap(), Decimal::ZERO);
    }
}
