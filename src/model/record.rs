//! Book records: raw source rows and their enriched form.

use serde::{Deserialize, Serialize};
use super::{CanonicalCity, Category, ResolvedYear};

/// One row of source data as produced by the record loader.
///
/// Everything except the title is optional: historical catalogues are sparse,
/// and missing fields are ordinary, not exceptional. The raw city string may
/// list several historical names for one place; the raw date string may carry
/// an era date, a Western year, or garbage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    /// Raw publishing-place field, possibly multi-valued or annotated.
    pub city: Option<String>,
    /// Raw era-date field (e.g. `民國8年`).
    pub era_date: Option<String>,
    /// Raw Western-year field, when the catalogue carries one separately.
    pub western_year: Option<String>,
    /// Holding institution.
    pub library: Option<String>,
}

impl BookRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Default::default() }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_era_date(mut self, era_date: impl Into<String>) -> Self {
        self.era_date = Some(era_date.into());
        self
    }

    pub fn with_western_year(mut self, year: impl Into<String>) -> Self {
        self.western_year = Some(year.into());
        self
    }

    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = Some(library.into());
        self
    }
}

/// A source record plus its derived fields.
///
/// `city` and `year` stay `None` when the raw strings did not resolve;
/// `category` is always assigned. The source record rides along unchanged so
/// the renderer can show raw values next to normalized ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub source: BookRecord,
    pub city: Option<CanonicalCity>,
    pub year: Option<ResolvedYear>,
    pub category: Category,
}

impl EnrichedRecord {
    /// True when the record can be placed on a map.
    pub fn is_geocoded(&self) -> bool {
        self.city.is_some()
    }

    /// True when the record can be placed on a timeline.
    pub fn is_dated(&self) -> bool {
        self.year.is_some()
    }

    /// Publisher and canonical city name, when both are present.
    /// This is the unit the co-location graph aggregates over.
    pub fn publisher_city(&self) -> Option<(&str, &str)> {
        let publisher = self.source.publisher.as_deref()?;
        let city = self.city.as_ref()?;
        Some((publisher, city.name.as_str()))
    }

    /// Canonical city name and holding library, when both are present.
    /// This is the unit the flow graph aggregates over.
    pub fn city_library(&self) -> Option<(&str, &str)> {
        let city = self.city.as_ref()?;
        let library = self.source.library.as_deref()?;
        Some((city.name.as_str(), library))
    }
}
