//! Topical category enumeration.

use serde::{Deserialize, Serialize};

/// Fixed set of topical categories a title can be assigned to.
///
/// Assignment is total: a title that matches no classification rule falls
/// back to `General`, never to an absent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Theology,
    History,
    Language,
    Periodical,
    #[default]
    General,
}

impl Category {
    /// All categories, in rule-priority order with the fallback last.
    pub const ALL: [Category; 5] = [
        Category::Theology,
        Category::History,
        Category::Language,
        Category::Periodical,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Theology => "theology",
            Category::History => "history",
            Category::Language => "language",
            Category::Periodical => "periodical",
            Category::General => "general",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
