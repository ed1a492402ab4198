//! Pipeline orchestration: validate → enrich → build networks.
//!
//! The whole run is a single synchronous pass over a bounded in-memory
//! table. Structural problems abort before any normalization; per-record
//! gaps (no geocodable city, no parseable date) are the normal path and
//! only show up in the completeness counts.

use tracing::{debug, info};

use crate::model::{BookRecord, EnrichedRecord};
use crate::network::{ColocationGraph, FlowGraph, GraphStats};
use crate::{Atlas, Error, Result};

// ============================================================================
// Output
// ============================================================================

/// Everything the map renderer consumes.
#[derive(Debug, Clone)]
pub struct AtlasOutput {
    pub records: Vec<EnrichedRecord>,
    pub colocation: ColocationGraph,
    pub colocation_stats: GraphStats,
    pub flow: FlowGraph,
    pub flow_stats: GraphStats,
    pub completeness: Completeness,
}

/// Data-completeness counts over the enriched table. In the observed
/// dataset roughly a quarter of records are not geocodable and over a third
/// carry no parseable year, so these are reported, not errored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Completeness {
    pub total: usize,
    pub geocoded: usize,
    pub dated: usize,
    /// Records with both a canonical city and a library holding — the rows
    /// that contribute flow-graph weight.
    pub flow_linked: usize,
    /// Dated records whose year fell outside the plausible span.
    pub suspect_years: usize,
}

impl Completeness {
    fn tally(records: &[EnrichedRecord]) -> Self {
        let mut c = Self { total: records.len(), ..Default::default() };
        for record in records {
            if record.is_geocoded() {
                c.geocoded += 1;
            }
            if record.is_dated() {
                c.dated += 1;
            }
            if record.city_library().is_some() {
                c.flow_linked += 1;
            }
            if record.year.as_ref().is_some_and(|y| y.suspect) {
                c.suspect_years += 1;
            }
        }
        c
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Structural validation, run before any normalization. A malformed table
/// fails the whole run: graph statistics over a broken table would be
/// meaningless.
fn validate(records: &[BookRecord]) -> Result<()> {
    if records.is_empty() {
        return Err(Error::MalformedTable("table has no records".into()));
    }
    for (index, record) in records.iter().enumerate() {
        if record.title.trim().is_empty() {
            return Err(Error::MalformedTable(format!(
                "record {index} is missing the required title field"
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Enrichment
// ============================================================================

/// Apply the three per-record transformers. Derived fields stay absent when
/// the raw strings do not resolve; no record is dropped.
pub fn enrich(atlas: &Atlas, records: Vec<BookRecord>) -> Result<Vec<EnrichedRecord>> {
    validate(&records)?;

    let enriched = records
        .into_iter()
        .map(|source| {
            let city = source
                .city
                .as_deref()
                .and_then(|raw| atlas.gazetteer().resolve_one(raw));
            if city.is_none() {
                debug!(title = %source.title, raw = ?source.city, "no geocodable city");
            }

            // The era-date field is consulted first; a separate Western-year
            // column fills in only when the era field yields nothing.
            let year = source
                .era_date
                .as_deref()
                .and_then(|raw| atlas.era_parser().parse(raw))
                .or_else(|| {
                    source
                        .western_year
                        .as_deref()
                        .and_then(|raw| atlas.era_parser().parse(raw))
                });
            if year.is_none() {
                debug!(title = %source.title, raw = ?source.era_date, "no parseable year");
            }

            let category = atlas.classifier().classify(&source.title);

            EnrichedRecord { source, city, year, category }
        })
        .collect();

    Ok(enriched)
}

/// Full pipeline run: enrich the table, build both graphs, compute stats,
/// and report completeness.
pub fn run(atlas: &Atlas, records: Vec<BookRecord>) -> Result<AtlasOutput> {
    let records = enrich(atlas, records)?;

    let colocation = ColocationGraph::build(&records);
    let colocation_stats = colocation.stats();
    let flow = FlowGraph::build(&records);
    let flow_stats = flow.stats();
    let completeness = Completeness::tally(&records);

    info!(
        total = completeness.total,
        geocoded = completeness.geocoded,
        dated = completeness.dated,
        flow_linked = completeness.flow_linked,
        suspect_years = completeness.suspect_years,
        "pipeline complete"
    );
    info!(
        nodes = colocation_stats.nodes,
        edges = colocation_stats.edges,
        density = colocation_stats.density,
        "publisher co-location network"
    );
    info!(
        nodes = flow_stats.nodes,
        edges = flow_stats.edges,
        density = flow_stats.density,
        "city-to-library flow network"
    );

    Ok(AtlasOutput {
        records,
        colocation,
        colocation_stats,
        flow,
        flow_stats,
        completeness,
    })
}

// ============================================================================
// Tests
// ============================================================================
