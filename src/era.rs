//! Era-date parsing: regnal-year dates to Western calendar years.
//!
//! Catalogue date fields mix era dates (`民國8年`, `光緒25年`) with plain
//! Western years, sometimes both in one string. Conversion is ordinal:
//! regnal year 1 *is* the epoch year, so `西曆 = epoch + regnal − 1`
//! (民國 epoch 1912, 民國8年 → 1919).
//!
//! Parsing is total and non-panicking: anything unrecognized degrades to
//! "no temporal data". Years landing outside the dataset's plausible span
//! are returned flagged as suspect and logged, never silently accepted.

use hashbrown::HashMap;
use regex::Regex;
use tracing::warn;

use crate::model::{ResolvedYear, YearSource};

/// Years outside this span are almost certainly a bad regnal number or a
/// page/serial number misread as a year.
pub const PLAUSIBLE_YEARS: std::ops::RangeInclusive<i32> = 1850..=1950;

// ============================================================================
// EraTable
// ============================================================================

/// Immutable era name → epoch start year table.
pub struct EraTable {
    epochs: HashMap<String, i32>,
    /// Insertion order, kept for deterministic regex construction.
    order: Vec<String>,
}

impl EraTable {
    pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = (S, i32)>) -> Self {
        let mut epochs = HashMap::new();
        let mut order = Vec::new();
        for (name, epoch) in entries {
            let name = name.into();
            if epochs.insert(name.clone(), epoch).is_none() {
                order.push(name);
            }
        }
        Self { epochs, order }
    }

    /// Qing-dynasty and Republican eras covered by the dataset.
    pub fn builtin() -> Self {
        Self::new([
            ("民國", 1912),
            ("光緒", 1875),
            ("宣統", 1909),
            ("同治", 1862),
            ("咸豐", 1851),
            ("道光", 1821),
            ("嘉慶", 1796),
        ])
    }

    pub fn epoch(&self, era: &str) -> Option<i32> {
        self.epochs.get(era).copied()
    }

    /// Western year for an era + regnal year. Regnal year 1 is the epoch
    /// year itself.
    pub fn to_western(&self, era: &str, regnal: i32) -> Option<i32> {
        Some(self.epoch(era)? + regnal - 1)
    }

    /// Format an era date string (`民國8年`) for a known era. Inverse of
    /// parsing, used by round-trip tests.
    pub fn format(&self, era: &str, regnal: i32) -> Option<String> {
        self.epochs.contains_key(era).then(|| format!("{era}{regnal}年"))
    }

    fn names(&self) -> &[String] {
        &self.order
    }
}

// ============================================================================
// YearPrecedence
// ============================================================================

/// Which pattern wins when one string carries both an era date and a plain
/// Western year.
///
/// The source data suggests the embedded Western year is the more
/// authoritative of the two, but that is inferred from observation rather
/// than documented, so the precedence is explicit configuration instead of a
/// hard-coded rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearPrecedence {
    #[default]
    WesternFirst,
    EraFirst,
}

// ============================================================================
// EraParser
// ============================================================================

/// Parses raw date strings against an injected era table.
pub struct EraParser {
    table: EraTable,
    precedence: YearPrecedence,
    era_pattern: Regex,
    digit_runs: Regex,
}

impl EraParser {
    pub fn new(table: EraTable, precedence: YearPrecedence) -> Self {
        let alternation = table
            .names()
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        // Era dates look like `民國8年`, occasionally with a space before
        // the number.
        let era_pattern = Regex::new(&format!(r"({alternation})\s*(\d{{1,3}})年"))
            .expect("era alternation is built from escaped literals");
        let digit_runs = Regex::new(r"\d+").expect("static pattern");
        Self { table, precedence, era_pattern, digit_runs }
    }

    pub fn builtin() -> Self {
        Self::new(EraTable::builtin(), YearPrecedence::default())
    }

    pub fn table(&self) -> &EraTable {
        &self.table
    }

    /// Resolve a raw date string to a Western year, or `None` if nothing in
    /// it is recognizable.
    pub fn parse(&self, raw: &str) -> Option<ResolvedYear> {
        let resolved = match self.precedence {
            YearPrecedence::WesternFirst => {
                self.parse_western(raw).or_else(|| self.parse_era(raw))
            }
            YearPrecedence::EraFirst => {
                self.parse_era(raw).or_else(|| self.parse_western(raw))
            }
        }?;
        Some(self.check_plausible(raw, resolved))
    }

    /// First standalone four-digit run in the string. Digit runs of any
    /// other length (regnal numbers, volume numbers) are not years.
    fn parse_western(&self, raw: &str) -> Option<ResolvedYear> {
        self.digit_runs
            .find_iter(raw)
            .find(|m| m.as_str().len() == 4)
            .and_then(|m| m.as_str().parse::<i32>().ok())
            .map(|year| ResolvedYear::new(year, YearSource::Western))
    }

    /// First `<era><regnal>年` match in the string.
    fn parse_era(&self, raw: &str) -> Option<ResolvedYear> {
        let caps = self.era_pattern.captures(raw)?;
        let era = caps.get(1)?.as_str();
        let regnal: i32 = caps.get(2)?.as_str().parse().ok()?;
        let year = self.table.to_western(era, regnal)?;
        Some(ResolvedYear::new(year, YearSource::Era(era.to_string())))
    }

    fn check_plausible(&self, raw: &str, resolved: ResolvedYear) -> ResolvedYear {
        if PLAUSIBLE_YEARS.contains(&resolved.year) {
            resolved
        } else {
            warn!(
                year = resolved.year,
                raw,
                "resolved year outside plausible span, flagging as suspect"
            );
            resolved.suspect()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parser() -> EraParser {
        EraParser::builtin()
    }

    #[test]
    fn test_republican_era_is_ordinal() {
        // 民國 epoch 1912, regnal year 8 → 1919, not 1920.
        let year = parser().parse("民國8年").unwrap();
        assert_eq!(year.year, 1919);
        assert_eq!(year.source, YearSource::Era("民國".into()));
        assert!(!year.suspect);
    }

    #[test]
    fn test_qing_eras() {
        let p = parser();
        assert_eq!(p.parse("光緒25年").unwrap().year, 1899);
        assert_eq!(p.parse("宣統3年").unwrap().year, 1911);
        assert_eq!(p.parse("同治13年").unwrap().year, 1874);
    }

    #[test]
    fn test_regnal_year_one_is_epoch_year() {
        let p = parser();
        assert_eq!(p.parse("民國1年").unwrap().year, 1912);
        assert_eq!(p.parse("光緒1年").unwrap().year, 1875);
    }

    #[test]
    fn test_plain_western_year() {
        let year = parser().parse("1919").unwrap();
        assert_eq!(year.year, 1919);
        assert_eq!(year.source, YearSource::Western);
    }

    #[test]
    fn test_western_year_embedded_in_text() {
        let year = parser().parse("出版於1923年").unwrap();
        assert_eq!(year.year, 1923);
        assert_eq!(year.source, YearSource::Western);
    }

    #[test]
    fn test_western_overrides_era_by_default() {
        // Both patterns present: the plain Western year wins.
        let year = parser().parse("民國8年（1920）").unwrap();
        assert_eq!(year.year, 1920);
        assert_eq!(year.source, YearSource::Western);
    }

    #[test]
    fn test_era_first_precedence_is_configurable() {
        let p = EraParser::new(EraTable::builtin(), YearPrecedence::EraFirst);
        let year = p.parse("民國8年（1920）").unwrap();
        assert_eq!(year.year, 1919);
        assert_eq!(year.source, YearSource::Era("民國".into()));
    }

    #[test]
    fn test_garbage_degrades_to_none() {
        let p = parser();
        assert_eq!(p.parse("garbage"), None);
        assert_eq!(p.parse(""), None);
        assert_eq!(p.parse("？"), None);
        assert_eq!(p.parse("第三卷"), None);
    }

    #[test]
    fn test_unknown_era_is_not_guessed() {
        // 康熙 predates the dataset and is not in the table.
        assert_eq!(parser().parse("康熙5年"), None);
    }

    #[test]
    fn test_short_digit_runs_are_not_years() {
        let p = parser();
        assert_eq!(p.parse("25"), None);
        assert_eq!(p.parse("190"), None);
        assert_eq!(p.parse("19190"), None);
    }

    #[test]
    fn test_implausible_year_flagged_suspect() {
        // 光緒99年 → 1973, outside the dataset's span.
        let year = parser().parse("光緒99年").unwrap();
        assert_eq!(year.year, 1973);
        assert!(year.suspect);
    }

    #[test]
    fn test_suspect_is_distinct_from_absent() {
        let p = parser();
        assert!(p.parse("光緒99年").is_some());
        assert!(p.parse("光緒年").is_none());
    }

    #[test]
    fn test_format_parse_round_trip() {
        let p = parser();
        for (era, epoch) in [("民國", 1912), ("光緒", 1875), ("道光", 1821)] {
            for regnal in [1, 8, 20] {
                let formatted = p.table().format(era, regnal).unwrap();
                let parsed = p.parse(&formatted).unwrap();
                assert_eq!(parsed.year, epoch + regnal - 1, "era {era} regnal {regnal}");
            }
        }
    }
}
