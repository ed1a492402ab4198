//! Title classification against an ordered keyword rule list.
//!
//! Rules are a priority list, not a map: a title like `天方典禮` contains
//! both a theology keyword and a language keyword, and the earlier rule must
//! win. Evaluation walks the rules in order and stops at the first match;
//! no match falls back to [`Category::General`].

use crate::model::Category;

/// One classification rule: if any keyword occurs in the (lowercased) title,
/// the rule's category applies.
#[derive(Debug, Clone)]
pub struct Rule {
    pub keywords: Vec<String>,
    pub category: Category,
}

impl Rule {
    pub fn new<S: Into<String>>(keywords: impl IntoIterator<Item = S>, category: Category) -> Self {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            category,
        }
    }

    fn matches(&self, title: &str) -> bool {
        self.keywords.iter().any(|kw| title.contains(kw.as_str()))
    }
}

/// Deterministic, stateless title classifier.
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    /// Build a classifier from an explicit priority-ordered rule list.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The built-in rule list for the Chinese-language Islamic publishing
    /// dataset: theology, then history/travel, then language/grammar, then
    /// periodicals.
    pub fn builtin() -> Self {
        Self::new(vec![
            Rule::new(
                ["天方", "清真", "經", "教", "理", "道", "法", "聖"],
                Category::Theology,
            ),
            Rule::new(["史", "記", "遊", "覲", "途", "誌"], Category::History),
            Rule::new(["字", "語", "文", "典", "解"], Category::Language),
            Rule::new(["報", "刊", "月刊", "週刊"], Category::Periodical),
        ])
    }

    /// Assign exactly one category. Total: never absent, never panics.
    pub fn classify(&self, title: &str) -> Category {
        let title = title.trim().to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&title))
            .map(|rule| rule.category)
            .unwrap_or(Category::General)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_theology_keywords() {
        let c = Classifier::builtin();
        assert_eq!(c.classify("古蘭經直解"), Category::Theology);
        assert_eq!(c.classify("回教祈禱集"), Category::Theology);
        assert_eq!(c.classify("天方性理"), Category::Theology);
    }

    #[test]
    fn test_history_keywords() {
        let c = Classifier::builtin();
        assert_eq!(c.classify("朝覲途"), Category::History);
        assert_eq!(c.classify("西行日誌"), Category::History);
    }

    #[test]
    fn test_language_keywords() {
        let c = Classifier::builtin();
        assert_eq!(c.classify("阿拉伯字母表"), Category::Language);
        assert_eq!(c.classify("波斯文讀本"), Category::Language);
    }

    #[test]
    fn test_periodical_keywords() {
        let c = Classifier::builtin();
        assert_eq!(c.classify("月華旬刊"), Category::Periodical);
    }

    #[test]
    fn test_no_match_falls_back_to_general() {
        let c = Classifier::builtin();
        assert_eq!(c.classify("Miscellaneous Notes"), Category::General);
        assert_eq!(c.classify(""), Category::General);
    }

    #[test]
    fn test_rule_order_breaks_keyword_overlap() {
        let c = Classifier::builtin();
        // Contains 天方 (theology) and 典 (language): the earlier rule wins.
        assert_eq!(c.classify("天方典禮"), Category::Theology);
        // Contains 史 (history) and 文 (language): history is listed first.
        assert_eq!(c.classify("回文史略"), Category::History);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let c = Classifier::new(vec![Rule::new(["monthly"], Category::Periodical)]);
        assert_eq!(c.classify("The MONTHLY Review"), Category::Periodical);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let c = Classifier::builtin();
        let first = c.classify("清真指南");
        for _ in 0..10 {
            assert_eq!(c.classify("清真指南"), first);
        }
    }
}
