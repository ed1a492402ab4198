//! Renderer hand-off: GeoJSON features and the plain-text statistics report.
//!
//! The map renderer lives outside this crate; what it needs from us is
//! geometry plus properties it can template into popups, and the network
//! statistics as a human-readable report.
//!
//! ```text
//! AtlasOutput → write_records_geojson() → FeatureCollection of points
//!            → write_flow_geojson()    → FeatureCollection of flow lines
//!            → write_stats_report()    → network statistics text file
//! ```

use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

use crate::gazetteer::{Gazetteer, LibraryGazetteer};
use crate::model::EnrichedRecord;
use crate::network::{FlowGraph, GraphStats};
use crate::Result;

// ============================================================================
// Record features
// ============================================================================

/// Write geocoded records as a GeoJSON FeatureCollection of points.
///
/// Non-geocoded records are skipped: a point feature without a coordinate is
/// not renderable. Dated records carry a `time` property in the
/// `YYYY-01-01` form the time-slider plugin expects.
pub fn write_records_geojson(
    records: &[EnrichedRecord],
    writer: &mut dyn Write,
) -> Result<()> {
    let features: Vec<serde_json::Value> = records
        .iter()
        .filter_map(record_feature)
        .collect();

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    serde_json::to_writer(&mut *writer, &collection)?;
    writeln!(writer)?;
    Ok(())
}

fn record_feature(record: &EnrichedRecord) -> Option<serde_json::Value> {
    let city = record.city.as_ref()?;

    let mut properties = serde_json::Map::new();
    properties.insert("title".into(), json!(record.source.title));
    properties.insert("city".into(), json!(city.name));
    properties.insert("category".into(), json!(record.category));
    if let Some(author) = &record.source.author {
        properties.insert("author".into(), json!(author));
    }
    if let Some(publisher) = &record.source.publisher {
        properties.insert("publisher".into(), json!(publisher));
    }
    if let Some(library) = &record.source.library {
        properties.insert("library".into(), json!(library));
    }
    if let Some(year) = &record.year {
        properties.insert("year".into(), json!(year.year));
        properties.insert("time".into(), json!(format!("{}-01-01", year.year)));
        if year.suspect {
            properties.insert("year_suspect".into(), json!(true));
        }
    }

    Some(json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            // GeoJSON is lon-first.
            "coordinates": [city.coordinate.lon, city.coordinate.lat],
        },
        "properties": properties,
    }))
}

// ============================================================================
// Flow features
// ============================================================================

/// Write city → library flows as GeoJSON LineString features, weighted by
/// book count. Edges whose library cannot be located are skipped; the flow
/// weights themselves are unaffected.
pub fn write_flow_geojson(
    flow: &FlowGraph,
    cities: &Gazetteer,
    libraries: &LibraryGazetteer,
    writer: &mut dyn Write,
) -> Result<()> {
    let mut features = Vec::new();
    for (city, library, weight) in flow.edges() {
        let Some(origin) = cities.lookup(city) else { continue };
        let Some(dest) = libraries.resolve(library) else { continue };
        features.push(json!({
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [
                    [origin.coordinate.lon, origin.coordinate.lat],
                    [dest.lon, dest.lat],
                ],
            },
            "properties": {
                "city": city,
                "library": library,
                "books": weight,
            },
        }));
    }

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    serde_json::to_writer(&mut *writer, &collection)?;
    writeln!(writer)?;
    Ok(())
}

// ============================================================================
// Statistics report
// ============================================================================

/// Write the network statistics as a plain-text report.
pub fn write_stats_report(
    flow_stats: &GraphStats,
    colocation_stats: &GraphStats,
    writer: &mut dyn Write,
) -> Result<()> {
    writeln!(writer, "NETWORK ANALYSIS RESULTS")?;
    writeln!(writer, "{}", "=".repeat(60))?;
    writeln!(writer)?;
    writeln!(writer, "1. City-to-Library Network")?;
    write_stats_block(flow_stats, writer)?;
    writeln!(writer)?;
    writeln!(writer, "2. Publisher Co-location Network")?;
    write_stats_block(colocation_stats, writer)?;
    Ok(())
}

fn write_stats_block(stats: &GraphStats, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "   Nodes: {}", stats.nodes)?;
    writeln!(writer, "   Edges: {}", stats.edges)?;
    writeln!(writer, "   Density: {:.4}", stats.density)?;
    Ok(())
}

// ============================================================================
// Publisher activity
// ============================================================================

/// Per-publisher output summary: book count, active span, longevity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublisherActivity {
    pub publisher: String,
    /// Canonical city of the publisher's first geocoded record, if any.
    pub city: Option<String>,
    pub books: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    /// Years between first and last dated book; 0 with fewer than two dates.
    pub longevity: i32,
}

/// Aggregate enriched records by publisher, sorted by publisher name for
/// deterministic output. Records without a publisher are skipped.
pub fn publisher_activity(records: &[EnrichedRecord]) -> Vec<PublisherActivity> {
    let mut by_publisher: BTreeMap<&str, Vec<&EnrichedRecord>> = BTreeMap::new();
    for record in records {
        if let Some(publisher) = record.source.publisher.as_deref() {
            by_publisher.entry(publisher).or_default().push(record);
        }
    }

    by_publisher
        .into_iter()
        .map(|(publisher, records)| {
            let city = records
                .iter()
                .find_map(|r| r.city.as_ref())
                .map(|c| c.name.clone());
            let years: Vec<i32> = records
                .iter()
                .filter_map(|r| r.year.as_ref())
                .map(|y| y.year)
                .collect();
            let first_year = years.iter().min().copied();
            let last_year = years.iter().max().copied();
            let longevity = match (first_year, last_year) {
                (Some(first), Some(last)) if years.len() > 1 => last - first,
                _ => 0,
            };
            PublisherActivity {
                publisher: publisher.to_string(),
                city,
                books: records.len(),
                first_year,
                last_year,
                longevity,
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
