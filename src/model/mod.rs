//! # Record Data Model
//!
//! Clean DTOs that cross every pipeline boundary: loader ↔ transformers ↔
//! network builder ↔ exporter.
//!
//! Design rule: this module is pure data — no lookup tables, no I/O, no
//! regex. Derived fields are `Option`s; any consumer must handle absence
//! explicitly rather than assume presence.

pub mod record;
pub mod coordinate;
pub mod category;
pub mod year;

pub use record::{BookRecord, EnrichedRecord};
pub use coordinate::{CanonicalCity, Coordinate};
pub use category::Category;
pub use year::{ResolvedYear, YearSource};
