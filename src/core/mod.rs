pub mod brackets;
pub mod calculator;
pub mod error;
pub mod filing;
pub mod jurisdiction;
pub mod registry;
pub mod source;

// Flat public surface for domain types and functions.
#[allow(unused_imports)]
pub use brackets::{parse_document, Bracket, BracketTable, ConfigDocument};
#[allow(unused_imports)]
pub use calculator::{evaluate, income_tax, Assessment, BracketSlice};
#[allow(unused_imports)]
pub use error::{BracketError, TaxError};
pub use filing::{FilingStatus, TaxYear};
pub use jurisdiction::{Jurisdiction, JurisdictionKind, Taxes};
pub use registry::Registry;
pub use source::{ConfigSource, DirSource, EmbeddedSource};
