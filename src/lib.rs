//! # atlas-rs — Historical Publishing Atlas Core
//!
//! Deterministic normalization and network-analysis pipeline for catalogues of
//! historical book publications. Takes an in-memory table of raw records
//! (title, raw city string, era-date string, publisher, holding library) and
//! produces an enriched table plus two edge-weighted graphs ready for a map
//! renderer.
//!
//! ## Design Principles
//!
//! 1. **Reference data is injected**: the city gazetteer, era table, and
//!    classification rules are immutable values passed in at construction —
//!    no hidden globals.
//! 2. **Absence is not an error**: an unmatched city or unparseable date
//!    yields `None` on the derived field and the record flows on. Roughly a
//!    quarter of real catalogue rows have no geocodable city; that is the
//!    normal path.
//! 3. **Pure folds**: both graphs are built by a single deterministic pass
//!    over the table; edge weights never depend on row order.
//! 4. **Structural errors fail fast**: a malformed table aborts before any
//!    normalization, because graph statistics over garbage are worse than
//!    no statistics.
//!
//! ## Quick Start
//!
//! ```rust
//! use atlas_rs::{Atlas, BookRecord};
//!
//! # fn example() -> atlas_rs::Result<()> {
//! let atlas = Atlas::builtin();
//!
//! let records = vec![
//!     BookRecord::new("古蘭經直解")
//!         .with_city("北平")
//!         .with_era_date("民國8年")
//!         .with_publisher("清真書報社"),
//! ];
//!
//! let output = atlas.run(records)?;
//! for record in &output.records {
//!     println!("{:?} {:?}", record.city, record.year);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline Stages
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | City canonicalization | `gazetteer` | canonical name + coordinate |
//! | Era-date resolution | `era` | Western calendar year |
//! | Category inference | `classify` | one of five fixed categories |
//! | Network construction | `network` | co-location + flow graphs, stats |
//! | Renderer hand-off | `export` | GeoJSON, stats report |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod gazetteer;
pub mod era;
pub mod classify;
pub mod network;
pub mod pipeline;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    BookRecord, EnrichedRecord, CanonicalCity, Coordinate,
    Category, ResolvedYear, YearSource,
};

// ============================================================================
// Re-exports: Reference data & transformers
// ============================================================================

pub use gazetteer::{Gazetteer, LibraryGazetteer};
pub use era::{EraParser, EraTable, YearPrecedence};
pub use classify::Classifier;

// ============================================================================
// Re-exports: Networks & pipeline output
// ============================================================================

pub use network::{ColocationGraph, FlowGraph, GraphStats};
pub use pipeline::{AtlasOutput, Completeness};

// ============================================================================
// Top-level Atlas handle
// ============================================================================

/// The primary entry point. An `Atlas` bundles the immutable reference data
/// and drives the record table through every pipeline stage.
pub struct Atlas {
    gazetteer: Gazetteer,
    era: EraParser,
    classifier: Classifier,
}

impl Atlas {
    /// Create an Atlas with explicit reference data.
    pub fn new(gazetteer: Gazetteer, era: EraParser, classifier: Classifier) -> Self {
        Self { gazetteer, era, classifier }
    }

    /// Atlas loaded with the built-in reference tables for the late-Qing /
    /// Republican-era Chinese publishing dataset.
    pub fn builtin() -> Self {
        Self::new(
            Gazetteer::builtin(),
            EraParser::new(EraTable::builtin(), YearPrecedence::WesternFirst),
            Classifier::builtin(),
        )
    }

    /// Validate and enrich a record table. Per-record data gaps (unmatched
    /// city, unparseable date) never fail the run; a structurally malformed
    /// table does.
    pub fn enrich(&self, records: Vec<BookRecord>) -> Result<Vec<EnrichedRecord>> {
        pipeline::enrich(self, records)
    }

    /// Full pipeline: enrich, build both graphs, compute statistics.
    pub fn run(&self, records: Vec<BookRecord>) -> Result<AtlasOutput> {
        pipeline::run(self, records)
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    pub fn era_parser(&self) -> &EraParser {
        &self.era
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source table is structurally unusable (empty, or a record is
    /// missing a required field). Fatal before normalization begins.
    #[error("malformed table: {0}")]
    MalformedTable(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
