use super::brackets::BracketTable;
use super::error::TaxError;
use rust_decimal::Decimal;

/// Portion of income taxed inside one bracket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketSlice {
    /// Income above which this bracket starts
    pub lower: Decimal,
    /// Upper threshold, `None` for the unbounded top bracket
    pub upper: Option<u64>,
    pub rate: Decimal,
    /// Income taxed at `rate`
    pub taxed: Decimal,
    pub tax: Decimal,
}

/// Result of walking a bracket table for one taxable income
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub taxable_income: Decimal,
    pub slices: Vec<BracketSlice>,
}

impl Assessment {
    pub fn total(&self) -> Decimal {
        self.slices.iter().map(|s| s.tax).sum()
    }
}

/// Total tax owed on `taxable_income` under `table`.
pub fn income_tax(
    jurisdiction: &str,
    table: &BracketTable,
    taxable_income: Decimal,
) -> Result<Decimal, TaxError> {
    evaluate(jurisdiction, table, taxable_income).map(|a| a.total())
}

/// Walk the brackets in ascending threshold order.
///
/// Every bracket the income fills completely is taxed over its full width.
/// The first bracket the income does not exceed, or the last bracket whatever
/// the income, takes the remaining income and ends the walk.
pub fn evaluate(
    jurisdiction: &str,
    table: &BracketTable,
    taxable_income: Decimal,
) -> Result<Assessment, TaxError> {
    if taxable_income.is_sign_negative() && !taxable_income.is_zero() {
        return Err(TaxError::NegativeIncome(taxable_income));
    }

    let brackets = table.sorted();
    let last = brackets.len() - 1;
    let mut remaining = taxable_income;
    let mut previous = Decimal::ZERO;
    let mut slices = Vec::with_capacity(brackets.len());

    for (idx, bracket) in brackets.iter().enumerate() {
        let threshold = Decimal::from(bracket.threshold);
        if taxable_income > threshold && idx != last {
            let width = threshold - previous;
            slices.push(BracketSlice {
                lower: previous,
                upper: Some(bracket.threshold),
                rate: bracket.rate,
                taxed: width,
                tax: width * bracket.rate,
            });
            remaining -= width;
            previous = threshold;
        } else {
            slices.push(BracketSlice {
                lower: previous,
                upper: (idx != last).then_some(bracket.threshold),
                rate: bracket.rate,
                taxed: remaining,
                tax: remaining * bracket.rate,
            });
            if previous + remaining != taxable_income {
                return Err(TaxError::Calculation(jurisdiction.to_string()));
            }
            break;
        }
    }

    log::debug!(
        "{} tax on {}: {} brackets used",
        jurisdiction,
        taxable_income,
        slices.len()
    );
    Ok(Assessment {
        taxable_income,
        slices,
    })
}
