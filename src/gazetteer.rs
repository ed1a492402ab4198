//! City canonicalization against a static variant gazetteer.
//!
//! Historical catalogues name one physical place many ways: the same city
//! appears as its modern name, a literary name, or a dynastic name, sometimes
//! several in one field separated by slashes. The gazetteer maps every known
//! variant to a single canonical name and fixed coordinate.
//!
//! Lookup is exact after normalization — no fuzzy matching. An unknown string
//! resolves to nothing, never to a default coordinate; callers must tolerate
//! absent geocoding for a sizable share of records.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::model::{CanonicalCity, Coordinate};

/// One canonical place plus every raw spelling that should resolve to it.
#[derive(Debug, Clone)]
pub struct CityEntry {
    pub canonical: &'static str,
    pub coordinate: Coordinate,
    pub variants: &'static [&'static str],
}

/// Separators that mark a multi-valued city field.
const SEPARATORS: [char; 4] = ['/', ',', '，', '、'];

/// Placeholder the source catalogue uses for "unknown".
const UNKNOWN_MARKERS: [&str; 2] = ["？", "?"];

// ============================================================================
// Gazetteer
// ============================================================================

/// Immutable variant → canonical-city lookup table.
pub struct Gazetteer {
    variants: HashMap<String, CanonicalCity>,
}

impl Gazetteer {
    /// Build a gazetteer from explicit entries. The canonical name itself is
    /// always registered as a variant of itself.
    pub fn new(entries: impl IntoIterator<Item = CityEntry>) -> Self {
        let mut variants = HashMap::new();
        for entry in entries {
            let city = CanonicalCity::new(entry.canonical, entry.coordinate);
            variants.insert(normalize(entry.canonical), city.clone());
            for variant in entry.variants {
                variants.insert(normalize(variant), city.clone());
            }
        }
        Self { variants }
    }

    /// The built-in gazetteer for late-Qing / Republican-era Chinese
    /// publishing centers.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_CITIES.iter().cloned())
    }

    /// Resolve a raw city field to zero or more canonical cities.
    ///
    /// Splits on multi-value separators, strips parenthetical annotations
    /// (romanizations, alternate readings), then looks up each part exactly.
    /// Parts resolving to the same canonical city are deduplicated, since a
    /// multi-name field lists spellings of one place, not several places.
    pub fn resolve(&self, raw: &str) -> SmallVec<[CanonicalCity; 1]> {
        let mut found: SmallVec<[CanonicalCity; 1]> = SmallVec::new();
        for part in split_parts(raw) {
            if let Some(city) = self.lookup(&part) {
                if !found.iter().any(|c| c.name == city.name) {
                    found.push(city.clone());
                }
            }
        }
        found
    }

    /// Resolve a raw city field to its first canonical city, if any.
    pub fn resolve_one(&self, raw: &str) -> Option<CanonicalCity> {
        self.resolve(raw).into_iter().next()
    }

    /// Exact lookup of a single, already-isolated name.
    pub fn lookup(&self, name: &str) -> Option<&CanonicalCity> {
        self.variants.get(&normalize(name))
    }

    /// Number of registered variant spellings.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Split a raw field into candidate city names: separator split, parenthetical
/// strip, trim, unknown-marker filter.
fn split_parts(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(|c: char| SEPARATORS.contains(&c) || c.is_whitespace())
        .map(strip_parenthetical)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && !UNKNOWN_MARKERS.contains(&s.as_str()))
}

/// Drop everything from the first opening parenthesis on. Annotations in the
/// source data are trailing (`京師（北京）`), so cutting at the paren keeps
/// the name proper.
fn strip_parenthetical(s: &str) -> &str {
    match s.find(['（', '(']) {
        Some(idx) => &s[..idx],
        None => s,
    }
}

/// Case- and whitespace-normalized lookup key.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

// ============================================================================
// Built-in reference data
// ============================================================================

const BUILTIN_CITIES: [CityEntry; 12] = [
    CityEntry {
        canonical: "北京",
        coordinate: Coordinate::new(39.9042, 116.4074),
        variants: &["北平", "燕湖"],
    },
    CityEntry {
        canonical: "上海",
        coordinate: Coordinate::new(31.2304, 121.4737),
        variants: &[],
    },
    CityEntry {
        canonical: "天津",
        coordinate: Coordinate::new(39.3434, 117.3616),
        variants: &[],
    },
    CityEntry {
        canonical: "南京",
        coordinate: Coordinate::new(32.0603, 118.7969),
        variants: &[],
    },
    CityEntry {
        canonical: "成都",
        coordinate: Coordinate::new(30.5728, 104.0668),
        variants: &["錦江", "錦城", "蓉城"],
    },
    CityEntry {
        canonical: "長沙",
        coordinate: Coordinate::new(28.2282, 112.9388),
        variants: &["星沙"],
    },
    CityEntry {
        canonical: "瀋陽",
        coordinate: Coordinate::new(41.8057, 123.4328),
        variants: &["奉天"],
    },
    CityEntry {
        canonical: "鎮江",
        coordinate: Coordinate::new(32.2109, 119.4552),
        variants: &["潤州", "京口", "京江"],
    },
    CityEntry {
        canonical: "雲南",
        coordinate: Coordinate::new(25.0406, 102.7125),
        variants: &["滇省"],
    },
    CityEntry {
        canonical: "導河",
        coordinate: Coordinate::new(36.2988, 102.9883),
        variants: &[],
    },
    CityEntry {
        canonical: "廣州",
        coordinate: Coordinate::new(23.1291, 113.2644),
        variants: &["粵東省城", "廣邑"],
    },
    CityEntry {
        canonical: "香港",
        coordinate: Coordinate::new(22.3193, 114.1694),
        variants: &[],
    },
];

// ============================================================================
// LibraryGazetteer
// ============================================================================

/// Coordinates for holding institutions, used to decorate flow-graph exports.
///
/// Unlike the city gazetteer, catalogued library names are free text
/// ("天理大學圖書館附屬..."), so an exact match is tried first and then an
/// institution-keyword containment scan. Still no general fuzzy matching.
pub struct LibraryGazetteer {
    exact: HashMap<String, Coordinate>,
    keywords: Vec<(&'static str, Coordinate)>,
}

impl LibraryGazetteer {
    pub fn builtin() -> Self {
        let mut exact = HashMap::new();
        for (name, coord) in BUILTIN_LIBRARIES {
            exact.insert(normalize(name), coord);
        }
        Self {
            exact,
            keywords: BUILTIN_LIBRARY_KEYWORDS.to_vec(),
        }
    }

    pub fn resolve(&self, raw: &str) -> Option<Coordinate> {
        let key = normalize(raw);
        if key.is_empty() {
            return None;
        }
        if let Some(coord) = self.exact.get(&key) {
            return Some(*coord);
        }
        self.keywords
            .iter()
            .find(|(kw, _)| key.contains(kw.to_lowercase().as_str()))
            .map(|(_, coord)| *coord)
    }
}

const BUILTIN_LIBRARIES: [(&str, Coordinate); 10] = [
    ("天理大學", Coordinate::new(34.5970, 135.8376)),
    ("天理大學圖書館", Coordinate::new(34.5970, 135.8376)),
    ("Tenri University", Coordinate::new(34.5970, 135.8376)),
    ("大阪大學", Coordinate::new(34.8218, 135.5228)),
    ("龍谷大學", Coordinate::new(34.9807, 135.7556)),
    ("東洋文庫", Coordinate::new(35.7339, 139.7544)),
    ("New York Public Library", Coordinate::new(40.7532, -73.9822)),
    ("Harvard-Yenching Library", Coordinate::new(42.3770, -71.1167)),
    ("British Library", Coordinate::new(51.5299, -0.1271)),
    ("Bibliothèque nationale de France", Coordinate::new(48.8338, 2.3765)),
];

const BUILTIN_LIBRARY_KEYWORDS: [(&str, Coordinate); 4] = [
    ("天理", Coordinate::new(34.5970, 135.8376)),
    ("大阪", Coordinate::new(34.8218, 135.5228)),
    ("龍谷", Coordinate::new(34.9807, 135.7556)),
    ("東洋文庫", Coordinate::new(35.7339, 139.7544)),
];

// ============================================================================
// Tests
// ============================================================================
