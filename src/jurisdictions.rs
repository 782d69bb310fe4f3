//! Jurisdictions shipped with the calculator

use crate::core::{Jurisdiction, Registry, TaxError};

pub const FEDERAL: &str = "Federal";

pub fn builtin() -> Vec<Jurisdiction> {
    vec![
        Jurisdiction::federal(FEDERAL),
        Jurisdiction::state("CA", "california"),
        Jurisdiction::state("ID", "idaho"),
    ]
}

pub fn registry() -> Result<Registry, TaxError> {
    Registry::from_jurisdictions(builtin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EmbeddedSource, FilingStatus, TaxYear};

    #[test]
    fn builtin_registry() {
        let registry = registry().unwrap();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["CA", FEDERAL, "ID"]
        );
        assert!(!registry.resolve(FEDERAL).unwrap().is_state());
    }

    #[test]
    fn every_builtin_has_2019_and_2020_tables_for_all_statuses() {
        for jurisdiction in builtin() {
            for year in [TaxYear(2019), TaxYear(2020)] {
                for status in FilingStatus::ALL {
                    let taxes = jurisdiction.load(&EmbeddedSource, year, status).unwrap();
                    assert_eq!(taxes.status(), status);
                }
            }
        }
    }
}
