use super::filing::{FilingStatus, TaxYear};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Errors raised while parsing or validating a bracket configuration document.
#[derive(Debug, thiserror::Error)]
pub enum BracketError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown filing status: {0}")]
    UnknownFilingStatus(String),
    #[error("filing status listed more than once: {0}")]
    DuplicateFilingStatus(FilingStatus),
    #[error("invalid bracket threshold for {status}: '{value}'")]
    InvalidThreshold { status: FilingStatus, value: String },
    #[error("invalid bracket rate for {status}: '{value}'")]
    InvalidRate { status: FilingStatus, value: String },
    #[error("bracket rate {rate} above threshold {threshold} is outside [0, 1]")]
    RateOutOfRange { threshold: u64, rate: Decimal },
    #[error("bracket table has no entries")]
    Empty,
    #[error("bracket threshold listed more than once: {0}")]
    DuplicateThreshold(u64),
}

#[derive(Debug, thiserror::Error)]
pub enum TaxError {
    #[error("no {jurisdiction} bracket configuration for tax year {year} ({})", .path.display())]
    ConfigurationNotFound {
        jurisdiction: String,
        year: TaxYear,
        path: PathBuf,
    },
    #[error("unable to read {jurisdiction} bracket configuration {}", .path.display())]
    ConfigurationUnreadable {
        jurisdiction: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {jurisdiction} bracket configuration for tax year {year}")]
    ConfigurationMalformed {
        jurisdiction: String,
        year: TaxYear,
        #[source]
        source: BracketError,
    },
    #[error("{jurisdiction} tax year {year} configuration has no {status} brackets")]
    FilingStatusNotConfigured {
        jurisdiction: String,
        year: TaxYear,
        status: FilingStatus,
    },
    #[error("{0} income tax calculation error")]
    Calculation(String),
    #[error("taxable income cannot be negative: {0}")]
    NegativeIncome(Decimal),
    #[error("unknown jurisdiction '{name}' (available: {})", .available.join(", "))]
    UnknownJurisdiction { name: String, available: Vec<String> },
    #[error("jurisdiction name cannot be empty")]
    InvalidJurisdictionName,
    #[error("jurisdiction defined more than once: {0}")]
    DuplicateJurisdiction(String),
}
