//! Jurisdictions command - list the jurisdictions taxes can be calculated for

use super::Context;
use crate::core::{Jurisdiction, JurisdictionKind};
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

#[derive(Args, Debug)]
pub struct JurisdictionsCommand {
    /// Only list states
    #[arg(long)]
    states: bool,
}

#[derive(Debug, Clone, Tabled)]
struct JurisdictionRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Brackets")]
    resource: String,
}

impl From<&Jurisdiction> for JurisdictionRow {
    fn from(jurisdiction: &Jurisdiction) -> Self {
        let kind = match jurisdiction.kind() {
            JurisdictionKind::Federal => "federal",
            JurisdictionKind::State { .. } => "state",
        };
        JurisdictionRow {
            name: jurisdiction.name().to_string(),
            kind,
            resource: resource_pattern(jurisdiction),
        }
    }
}

/// Configuration path with the year left as a placeholder
fn resource_pattern(jurisdiction: &Jurisdiction) -> String {
    match jurisdiction.kind() {
        JurisdictionKind::Federal => "federal/<year>.json".to_string(),
        JurisdictionKind::State { namespace } => format!("state/{namespace}/<year>.json"),
    }
}

impl JurisdictionsCommand {
    pub fn exec(&self, ctx: &Context) -> anyhow::Result<()> {
        let rows: Vec<JurisdictionRow> = ctx
            .registry
            .jurisdictions()
            .filter(|j| !self.states || j.is_state())
            .map(JurisdictionRow::from)
            .collect();

        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{}", table);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_describe_resource_location() {
        let row = JurisdictionRow::from(&Jurisdiction::state("ID", "idaho"));
        assert_eq!(row.kind, "state");
        assert_eq!(row.resource, "state/idaho/<year>.json");

        let row = JurisdictionRow::from(&Jurisdiction::federal("Federal"));
        assert_eq!(row.kind, "federal");
        assert_eq!(row.resource, "federal/<year>.json");
    }
}
