use chrono::{Datelike, Local};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Taxpayer category selecting which bracket table applies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    Single,
    MarriedJoint,
    MarriedSeparate,
    HeadOfHouse,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 4] = [
        FilingStatus::Single,
        FilingStatus::MarriedJoint,
        FilingStatus::MarriedSeparate,
        FilingStatus::HeadOfHouse,
    ];

    /// Name used as the key in bracket configuration documents
    pub fn name(self) -> &'static str {
        match self {
            FilingStatus::Single => "single",
            FilingStatus::MarriedJoint => "married_joint",
            FilingStatus::MarriedSeparate => "married_separate",
            FilingStatus::HeadOfHouse => "head_of_house",
        }
    }

    /// Exact match on the configuration name, no case folding.
    pub fn from_name(s: &str) -> Option<FilingStatus> {
        Self::ALL.into_iter().find(|status| status.name() == s)
    }
}

impl std::fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Calendar tax year, e.g. `TaxYear(2020)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaxYear(pub i32);

impl TaxYear {
    pub fn current() -> Self {
        TaxYear(Local::now().year())
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filing_status_names_round_trip() {
        for status in FilingStatus::ALL {
            assert_eq!(FilingStatus::from_name(status.name()), Some(status));
        }
    }

    #[test]
    fn filing_status_from_name_is_exact() {
        assert_eq!(FilingStatus::from_name("single"), Some(FilingStatus::Single));
        assert_eq!(
            FilingStatus::from_name("head_of_house"),
            Some(FilingStatus::HeadOfHouse)
        );
        assert_eq!(FilingStatus::from_name("Single"), None);
        assert_eq!(FilingStatus::from_name("married"), None);
        assert_eq!(FilingStatus::from_name(""), None);
    }

    #[test]
    fn filing_status_display() {
        assert_eq!(FilingStatus::MarriedJoint.to_string(), "married_joint");
        assert_eq!(FilingStatus::MarriedSeparate.to_string(), "married_separate");
    }

    #[test]
    fn filing_status_serializes_as_config_name() {
        let json = serde_json::to_string(&FilingStatus::HeadOfHouse).unwrap();
        assert_eq!(json, "\"head_of_house\"");
    }

    #[test]
    fn tax_year_display() {
        assert_eq!(TaxYear(2020).to_string(), "2020");
    }
}
