//! Network construction over the enriched record table.
//!
//! Two graphs are built, each by a single deterministic fold — no mutable
//! graph-library object, no iterative algorithms:
//!
//! - **Co-location graph**: undirected, publishers as nodes, edge weight =
//!   number of distinct canonical cities where both endpoints published.
//! - **Flow graph**: directed, publishing city → holding library, edge
//!   weight = number of books on that route.
//!
//! Edge maps are keyed by order-normalized pairs in `BTreeMap`s, so
//! accumulation is commutative and iteration order is fixed: for a given
//! input table the weights and statistics are bit-exact reproducible
//! regardless of row order.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::EnrichedRecord;

// ============================================================================
// PairKey
// ============================================================================

/// Unordered node pair: `(A, B)` and `(B, A)` are the same key, and a node
/// never pairs with itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey(String, String);

impl PairKey {
    /// `None` for a self-pair — the co-location graph has no self-loops.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Option<Self> {
        let (a, b) = (a.into(), b.into());
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self(a, b)),
            std::cmp::Ordering::Greater => Some(Self(b, a)),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }
}

// ============================================================================
// ColocationGraph
// ============================================================================

/// Publishers connected by having published in the same canonical city.
///
/// Following the source analysis, the node set is the publishers that appear
/// in at least one co-location pair; a publisher alone in its city
/// contributes no node and no edge.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColocationGraph {
    weights: BTreeMap<PairKey, u64>,
}

impl ColocationGraph {
    /// Single fold over the table: group distinct publishers by canonical
    /// city, then count each unordered pair once per shared city.
    pub fn build(records: &[EnrichedRecord]) -> Self {
        let mut by_city: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for record in records {
            if let Some((publisher, city)) = record.publisher_city() {
                by_city.entry(city).or_default().insert(publisher);
            }
        }

        let mut weights: BTreeMap<PairKey, u64> = BTreeMap::new();
        for publishers in by_city.values() {
            let publishers: Vec<&str> = publishers.iter().copied().collect();
            for (i, a) in publishers.iter().enumerate() {
                for b in &publishers[i + 1..] {
                    if let Some(key) = PairKey::new(*a, *b) {
                        *weights.entry(key).or_insert(0) += 1;
                    }
                }
            }
        }

        Self { weights }
    }

    /// Shared-city count for a publisher pair, in either argument order.
    pub fn weight(&self, a: &str, b: &str) -> u64 {
        PairKey::new(a, b)
            .and_then(|key| self.weights.get(&key))
            .copied()
            .unwrap_or(0)
    }

    pub fn edges(&self) -> impl Iterator<Item = (&PairKey, u64)> {
        self.weights.iter().map(|(k, w)| (k, *w))
    }

    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    /// Nodes in deterministic (sorted) order.
    pub fn nodes(&self) -> BTreeSet<&str> {
        self.weights
            .keys()
            .flat_map(|k| [k.first(), k.second()])
            .collect()
    }

    pub fn stats(&self) -> GraphStats {
        let mut degrees: BTreeMap<String, u64> = BTreeMap::new();
        for key in self.weights.keys() {
            *degrees.entry(key.first().to_string()).or_insert(0) += 1;
            *degrees.entry(key.second().to_string()).or_insert(0) += 1;
        }
        GraphStats::new(self.nodes().len(), self.edge_count(), degrees)
    }
}

// ============================================================================
// FlowGraph
// ============================================================================

/// Directed city → library flows, weighted by book count.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    weights: BTreeMap<(String, String), u64>,
}

impl FlowGraph {
    /// Single fold: each record holding both a canonical city and a library
    /// increments exactly one edge.
    pub fn build(records: &[EnrichedRecord]) -> Self {
        let mut weights: BTreeMap<(String, String), u64> = BTreeMap::new();
        for record in records {
            if let Some((city, library)) = record.city_library() {
                *weights
                    .entry((city.to_string(), library.to_string()))
                    .or_insert(0) += 1;
            }
        }
        Self { weights }
    }

    pub fn weight(&self, city: &str, library: &str) -> u64 {
        self.weights
            .get(&(city.to_string(), library.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.weights
            .iter()
            .map(|((city, library), w)| (city.as_str(), library.as_str(), *w))
    }

    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    /// Sum of all edge weights — equals the number of records with both a
    /// canonical city and a library holding.
    pub fn total_weight(&self) -> u64 {
        self.weights.values().sum()
    }

    /// Source cities ∪ destination libraries, deterministic order.
    pub fn nodes(&self) -> BTreeSet<&str> {
        self.weights
            .keys()
            .flat_map(|(city, library)| [city.as_str(), library.as_str()])
            .collect()
    }

    pub fn stats(&self) -> GraphStats {
        let mut degrees: BTreeMap<String, u64> = BTreeMap::new();
        for (city, library) in self.weights.keys() {
            *degrees.entry(city.clone()).or_insert(0) += 1;
            *degrees.entry(library.clone()).or_insert(0) += 1;
        }
        GraphStats::new(self.nodes().len(), self.edge_count(), degrees)
    }
}

// ============================================================================
// GraphStats
// ============================================================================

/// Node/edge counts, density, and per-node degree.
///
/// Density uses the undirected simple-graph convention 2E / (N(N−1)) for
/// both graphs, matching the source analysis. No shortest-path or community
/// statistics; everything here is a plain aggregation over the edge list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub density: f64,
    pub degrees: BTreeMap<String, u64>,
}

impl GraphStats {
    pub fn new(nodes: usize, edges: usize, degrees: BTreeMap<String, u64>) -> Self {
        Self { nodes, edges, density: density(nodes, edges), degrees }
    }

    /// Flat metric-name → value mapping for the renderer. Per-node degrees
    /// are exposed as `degree:<node>`.
    pub fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();
        metrics.insert("nodes".to_string(), self.nodes as f64);
        metrics.insert("edges".to_string(), self.edges as f64);
        metrics.insert("density".to_string(), self.density);
        for (node, degree) in &self.degrees {
            metrics.insert(format!("degree:{node}"), *degree as f64);
        }
        metrics
    }
}

/// Density of an undirected simple graph: 2E / (N(N−1)), 0 when undefined.
pub fn density(nodes: usize, edges: usize) -> f64 {
    if nodes < 2 {
        return 0.0;
    }
    (2 * edges) as f64 / (nodes * (nodes - 1)) as f64
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BookRecord, CanonicalCity, Category, Coordinate, EnrichedRecord};
    use pretty_assertions::assert_eq;

    fn record(title: &str, publisher: Option<&str>, city: Option<&str>, library: Option<&str>) -> EnrichedRecord {
        let mut source = BookRecord::new(title);
        source.publisher = publisher.map(String::from);
        source.library = library.map(String::from);
        EnrichedRecord {
            source,
            city: city.map(|name| CanonicalCity::new(name, Coordinate::new(0.0, 0.0))),
            year: None,
            category: Category::General,
        }
    }

    #[test]
    fn test_colocation_weight_counts_distinct_shared_cities() {
        let records = vec![
            record("a", Some("甲"), Some("北京"), None),
            record("b", Some("乙"), Some("北京"), None),
            record("c", Some("甲"), Some("上海"), None),
            record("d", Some("乙"), Some("上海"), None),
            // Second 北京 book by 甲 must not double-count the shared city.
            record("e", Some("甲"), Some("北京"), None),
        ];
        let graph = ColocationGraph::build(&records);
        assert_eq!(graph.weight("甲", "乙"), 2);
        assert_eq!(graph.weight("乙", "甲"), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_colocation_no_self_loops() {
        let records = vec![
            record("a", Some("甲"), Some("北京"), None),
            record("b", Some("甲"), Some("北京"), None),
        ];
        let graph = ColocationGraph::build(&records);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.nodes().is_empty());
    }

    #[test]
    fn test_colocation_ignores_records_missing_fields() {
        let records = vec![
            record("a", Some("甲"), None, None),
            record("b", None, Some("北京"), None),
        ];
        let graph = ColocationGraph::build(&records);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_colocation_independent_of_row_order() {
        let forward = vec![
            record("a", Some("甲"), Some("北京"), None),
            record("b", Some("乙"), Some("北京"), None),
            record("c", Some("丙"), Some("北京"), None),
            record("d", Some("甲"), Some("上海"), None),
            record("e", Some("丙"), Some("上海"), None),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(
            ColocationGraph::build(&forward),
            ColocationGraph::build(&reversed)
        );
    }

    #[test]
    fn test_flow_weight_counts_records() {
        let records = vec![
            record("a", None, Some("北京"), Some("東洋文庫")),
            record("b", None, Some("北京"), Some("東洋文庫")),
            record("c", None, Some("上海"), Some("東洋文庫")),
            record("d", None, Some("北京"), None),
        ];
        let graph = FlowGraph::build(&records);
        assert_eq!(graph.weight("北京", "東洋文庫"), 2);
        assert_eq!(graph.weight("上海", "東洋文庫"), 1);
        assert_eq!(graph.weight("北京", "天理大學"), 0);
        // Total weight = records with both fields populated.
        assert_eq!(graph.total_weight(), 3);
    }

    #[test]
    fn test_flow_nodes_are_cities_and_libraries() {
        let records = vec![
            record("a", None, Some("北京"), Some("東洋文庫")),
            record("b", None, Some("上海"), Some("天理大學")),
        ];
        let graph = FlowGraph::build(&records);
        let nodes = graph.nodes();
        assert_eq!(nodes.len(), 4);
        assert!(nodes.contains("北京"));
        assert!(nodes.contains("東洋文庫"));
    }

    #[test]
    fn test_density_reference_statistic() {
        // Documented reference: 48 nodes, 194 edges.
        let d = density(48, 194);
        assert!((d - 2.0 * 194.0 / (48.0 * 47.0)).abs() < f64::EPSILON);
        assert!((d - 0.171_985).abs() < 1e-6);
    }

    #[test]
    fn test_density_degenerate_graphs() {
        assert_eq!(density(0, 0), 0.0);
        assert_eq!(density(1, 0), 0.0);
        assert_eq!(density(2, 1), 1.0);
    }

    #[test]
    fn test_stats_degrees() {
        let records = vec![
            record("a", Some("甲"), Some("北京"), None),
            record("b", Some("乙"), Some("北京"), None),
            record("c", Some("丙"), Some("北京"), None),
        ];
        let stats = ColocationGraph::build(&records).stats();
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.edges, 3);
        assert_eq!(stats.density, 1.0);
        assert_eq!(stats.degrees["甲"], 2);
    }

    #[test]
    fn test_stats_metrics_mapping() {
        let records = vec![
            record("a", None, Some("北京"), Some("東洋文庫")),
        ];
        let metrics = FlowGraph::build(&records).stats().metrics();
        assert_eq!(metrics["nodes"], 2.0);
        assert_eq!(metrics["edges"], 1.0);
        assert_eq!(metrics["degree:北京"], 1.0);
    }
}
