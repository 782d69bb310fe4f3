use super::error::TaxError;
use super::jurisdiction::Jurisdiction;
use std::collections::BTreeMap;

/// Jurisdictions known to the calculator, keyed by name
#[derive(Debug, Clone, Default)]
pub struct Registry {
    jurisdictions: BTreeMap<String, Jurisdiction>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of definitions.
    ///
    /// Unlike [`Registry::register`], a name defined twice in `jurisdictions`
    /// is an error.
    pub fn from_jurisdictions(
        jurisdictions: impl IntoIterator<Item = Jurisdiction>,
    ) -> Result<Self, TaxError> {
        let mut registry = Registry::new();
        for jurisdiction in jurisdictions {
            let name = jurisdiction.name().to_string();
            if registry.register(jurisdiction)?.is_some() {
                return Err(TaxError::DuplicateJurisdiction(name));
            }
        }
        Ok(registry)
    }

    /// Add `jurisdiction`, replacing and returning any entry with the same name.
    pub fn register(&mut self, jurisdiction: Jurisdiction) -> Result<Option<Jurisdiction>, TaxError> {
        if jurisdiction.name().trim().is_empty() {
            return Err(TaxError::InvalidJurisdictionName);
        }
        let replaced = self
            .jurisdictions
            .insert(jurisdiction.name().to_string(), jurisdiction);
        if let Some(ref previous) = replaced {
            log::warn!("Jurisdiction {} registered again, replacing earlier definition", previous);
        }
        Ok(replaced)
    }

    pub fn resolve(&self, name: &str) -> Result<&Jurisdiction, TaxError> {
        self.jurisdictions
            .get(name)
            .ok_or_else(|| TaxError::UnknownJurisdiction {
                name: name.to_string(),
                available: self.names().map(str::to_string).collect(),
            })
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.jurisdictions.keys().map(String::as_str)
    }

    pub fn jurisdictions(&self) -> impl Iterator<Item = &Jurisdiction> {
        self.jurisdictions.values()
    }

    pub fn states(&self) -> impl Iterator<Item = &Jurisdiction> {
        self.jurisdictions().filter(|j| j.is_state())
    }
}
