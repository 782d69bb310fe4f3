//! Bracket tables and the JSON configuration documents they are loaded from.
//!
//! A document maps filing status names to tables, and each table maps an
//! integer upper threshold (as a string) to a decimal marginal rate:
//!
//! ```json
//! { "single": { "9875": "0.10", "40125": "0.12", "1000000000": "0.37" } }
//! ```

use super::error::BracketError;
use super::filing::FilingStatus;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// One entry of a bracket table: income up to `threshold` is taxed at `rate`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub threshold: u64,
    pub rate: Decimal,
}

/// Brackets for one (jurisdiction, tax year, filing status).
///
/// Entries are kept in the order they were supplied. The table is non-empty,
/// thresholds are unique and every rate is a fraction in `[0, 1]`. The entry
/// with the highest threshold is unbounded above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTable {
    entries: Vec<Bracket>,
}

impl BracketTable {
    pub fn new(entries: Vec<Bracket>) -> Result<Self, BracketError> {
        if entries.is_empty() {
            return Err(BracketError::Empty);
        }
        let mut seen = HashSet::with_capacity(entries.len());
        for bracket in &entries {
            if !seen.insert(bracket.threshold) {
                return Err(BracketError::DuplicateThreshold(bracket.threshold));
            }
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(BracketError::RateOutOfRange {
                    threshold: bracket.threshold,
                    rate: bracket.rate,
                });
            }
        }
        Ok(BracketTable { entries })
    }

    /// Entries in supplied order
    pub fn entries(&self) -> &[Bracket] {
        &self.entries
    }

    /// Entries sorted ascending by threshold
    pub fn sorted(&self) -> Vec<Bracket> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|b| b.threshold);
        sorted
    }

    /// Marginal rate of the unbounded top bracket
    pub fn top_rate(&self) -> Decimal {
        self.entries
            .iter()
            .max_by_key(|b| b.threshold)
            .map_or(Decimal::ZERO, |b| b.rate)
    }
}

impl Serialize for BracketTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for bracket in &self.entries {
            map.serialize_entry(&bracket.threshold.to_string(), &bracket.rate.to_string())?;
        }
        map.end()
    }
}

/// Parse a configuration document into one table per filing status.
///
/// Nothing is returned unless every table in the document is valid.
pub fn parse_document(text: &str) -> Result<BTreeMap<FilingStatus, BracketTable>, BracketError> {
    let OrderedPairs(statuses) = serde_json::from_str::<OrderedPairs<OrderedPairs<RawRate>>>(text)?;

    let mut tables = BTreeMap::new();
    for (name, OrderedPairs(pairs)) in statuses {
        let status =
            FilingStatus::from_name(&name).ok_or(BracketError::UnknownFilingStatus(name))?;
        if tables.contains_key(&status) {
            return Err(BracketError::DuplicateFilingStatus(status));
        }

        let entries = pairs
            .into_iter()
            .map(|(threshold, rate)| parse_bracket(status, &threshold, rate))
            .collect::<Result<Vec<_>, _>>()?;
        tables.insert(status, BracketTable::new(entries)?);
    }
    Ok(tables)
}

fn parse_bracket(status: FilingStatus, threshold: &str, rate: RawRate) -> Result<Bracket, BracketError> {
    let threshold = threshold
        .parse::<u64>()
        .map_err(|_| BracketError::InvalidThreshold {
            status,
            value: threshold.to_string(),
        })?;
    let rate_text = match rate {
        RawRate::Text(text) => text,
        RawRate::Number(number) => number.to_string(),
    };
    let rate = Decimal::from_str(&rate_text).map_err(|_| BracketError::InvalidRate {
        status,
        value: rate_text.clone(),
    })?;
    Ok(Bracket { threshold, rate })
}

/// Rates are canonically strings, plain JSON numbers are accepted too
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum RawRate {
    Text(String),
    Number(serde_json::Number),
}

/// JSON object read as a list of entries, keeping order and repeated keys
struct OrderedPairs<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedPairs<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairsVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for PairsVisitor<V> {
            type Value = OrderedPairs<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a json object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    pairs.push((key, value));
                }
                Ok(OrderedPairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor(PhantomData))
    }
}

/// Bracket configuration document for one jurisdiction and tax year
#[allow(dead_code)]
#[derive(JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ConfigDocument {
    /// Brackets for single filers
    single: Option<SchemaTable>,
    /// Brackets for married couples filing jointly
    married_joint: Option<SchemaTable>,
    /// Brackets for married couples filing separately
    married_separate: Option<SchemaTable>,
    /// Brackets for heads of household
    head_of_house: Option<SchemaTable>,
}

/// Upper income threshold (integer string) to marginal rate (decimal string, 0 to 1).
/// The entry with the highest threshold applies to all income above the one before it.
type SchemaTable = BTreeMap<String, String>;
