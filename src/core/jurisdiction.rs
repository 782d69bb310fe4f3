use super::brackets::{parse_document, BracketTable};
use super::calculator::{self, Assessment};
use super::error::TaxError;
use super::filing::{FilingStatus, TaxYear};
use super::source::ConfigSource;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// How a jurisdiction's configuration documents are located
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JurisdictionKind {
    /// `federal/<year>.json`
    Federal,
    /// `state/<namespace>/<year>.json`
    State { namespace: String },
}

/// A tax-levying authority and where its bracket tables live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jurisdiction {
    name: String,
    kind: JurisdictionKind,
}

impl Jurisdiction {
    pub fn federal(name: impl Into<String>) -> Self {
        Jurisdiction {
            name: name.into(),
            kind: JurisdictionKind::Federal,
        }
    }

    pub fn state(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Jurisdiction {
            name: name.into(),
            kind: JurisdictionKind::State {
                namespace: namespace.into(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &JurisdictionKind {
        &self.kind
    }

    pub fn is_state(&self) -> bool {
        matches!(self.kind, JurisdictionKind::State { .. })
    }

    /// Path of the configuration document for `year`, relative to a source root
    pub fn resource_path(&self, year: TaxYear) -> PathBuf {
        let file = format!("{year}.json");
        match &self.kind {
            JurisdictionKind::Federal => PathBuf::from("federal").join(file),
            JurisdictionKind::State { namespace } => {
                PathBuf::from("state").join(namespace).join(file)
            }
        }
    }

    /// Load this jurisdiction's tables for `year` and select `status`.
    pub fn load(
        &self,
        source: &dyn ConfigSource,
        year: TaxYear,
        status: FilingStatus,
    ) -> Result<Taxes, TaxError> {
        let path = self.resource_path(year);
        let text = source
            .read(&path)
            .map_err(|source| TaxError::ConfigurationUnreadable {
                jurisdiction: self.name.clone(),
                path: path.clone(),
                source,
            })?
            .ok_or_else(|| TaxError::ConfigurationNotFound {
                jurisdiction: self.name.clone(),
                year,
                path: path.clone(),
            })?;

        let tables = parse_document(&text).map_err(|source| TaxError::ConfigurationMalformed {
            jurisdiction: self.name.clone(),
            year,
            source,
        })?;
        if !tables.contains_key(&status) {
            return Err(TaxError::FilingStatusNotConfigured {
                jurisdiction: self.name.clone(),
                year,
                status,
            });
        }

        log::debug!(
            "Loaded {} {} brackets for {} filing statuses",
            self.name,
            year,
            tables.len()
        );
        Ok(Taxes {
            jurisdiction: self.name.clone(),
            year,
            status,
            tables,
        })
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A jurisdiction's tables for one tax year, bound to one filing status
#[derive(Debug, Clone)]
pub struct Taxes {
    jurisdiction: String,
    year: TaxYear,
    status: FilingStatus,
    // always holds an entry for `status`
    tables: BTreeMap<FilingStatus, BracketTable>,
}

impl Taxes {
    pub fn jurisdiction(&self) -> &str {
        &self.jurisdiction
    }

    pub fn year(&self) -> TaxYear {
        self.year
    }

    pub fn status(&self) -> FilingStatus {
        self.status
    }

    /// Brackets for the selected filing status
    pub fn brackets(&self) -> &BracketTable {
        &self.tables[&self.status]
    }

    pub fn income_tax(&self, taxable_income: Decimal) -> Result<Decimal, TaxError> {
        calculator::income_tax(&self.jurisdiction, self.brackets(), taxable_income)
    }

    pub fn assess(&self, taxable_income: Decimal) -> Result<Assessment, TaxError> {
        calculator::evaluate(&self.jurisdiction, self.brackets(), taxable_income)
    }
}
