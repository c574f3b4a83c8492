//! Relevance heuristic - does this text look like a financial report?
//!
//! Scans text for a set of domain keywords (case-insensitive substring match)
//! and flags it as plausibly financial when enough *distinct* keywords occur.
//! The flag is advisory: it changes a warning, never the pipeline's course.

/// Default keyword set
pub const DEFAULT_KEYWORDS: [&str; 10] = [
    "revenue",
    "net income",
    "profit",
    "loss",
    "ebitda",
    "assets",
    "liabilities",
    "equity",
    "cash flow",
    "financial statement",
];

/// Default number of distinct keywords required
pub const DEFAULT_MIN_MATCHES: usize = 2;

/// Keyword-density heuristic with configurable keywords and threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevanceHeuristic {
    keywords: Vec<String>,
    min_matches: usize,
}

/// Outcome of assessing one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevanceAssessment {
    /// Keywords found, in keyword-list order, each at most once
    pub matched: Vec<String>,
    /// Number of distinct matches required
    pub min_matches: usize,
}

impl RelevanceAssessment {
    /// Whether the text is plausibly financial
    pub fn is_financial(&self) -> bool {
        self.matched.len() >= self.min_matches
    }
}

impl RelevanceHeuristic {
    /// Create a heuristic from a keyword list and threshold
    ///
    /// Keywords are lower-cased; blank entries and duplicates are dropped so
    /// that each keyword is counted at most once.
    pub fn new<I, S>(keywords: I, min_matches: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }

        Self {
            keywords: normalized,
            min_matches,
        }
    }

    /// Keywords in use (lower-cased)
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Required number of distinct matches
    pub fn min_matches(&self) -> usize {
        self.min_matches
    }

    /// Assess `text`, listing the matched keywords
    pub fn assess(&self, text: &str) -> RelevanceAssessment {
        let lower = text.to_lowercase();
        let matched = self
            .keywords
            .iter()
            .filter(|keyword| lower.contains(keyword.as_str()))
            .cloned()
            .collect();

        RelevanceAssessment {
            matched,
            min_matches: self.min_matches,
        }
    }

    /// Whether `text` is plausibly financial
    pub fn is_financial(&self, text: &str) -> bool {
        self.assess(text).is_financial()
    }
}

impl Default for RelevanceHeuristic {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS, DEFAULT_MIN_MATCHES)
    }
}

/// Check `text` against the default keywords and threshold
///
/// # Examples
///
/// ```
/// use finex_domain::is_financial_document;
///
/// assert!(!is_financial_document("Quarterly revenue grew."));
/// assert!(is_financial_document("Revenue grew and Net Income doubled."));
/// ```
pub fn is_financial_document(text: &str) -> bool {
    RelevanceHeuristic::default().is_financial(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_keyword_is_not_enough() {
        assert!(!is_financial_document("Our revenue was strong this year."));
    }

    #[test]
    fn test_two_keywords_match() {
        assert!(is_financial_document("revenue of 5.2 billion and net income of 1.1 billion"));
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        assert!(!is_financial_document("revenue revenue REVENUE Revenue"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_financial_document("EBITDA improved; TOTAL ASSETS rose."));
    }

    #[test]
    fn test_substring_match() {
        // "profitable" contains "profit", "losses" contains "loss"
        assert!(is_financial_document("A profitable year with few losses."));
    }

    #[test]
    fn test_recipe_is_not_financial() {
        let recipe =
            "Preheat the oven to 180C. Mix flour, sugar and two eggs. Bake for 25 minutes.";
        assert!(!is_financial_document(recipe));
    }

    #[test]
    fn test_empty_text() {
        assert!(!is_financial_document(""));
    }

    #[test]
    fn test_assessment_lists_matches_in_keyword_order() {
        let assessment = RelevanceHeuristic::default().assess("Cash flow and equity; revenue up.");
        assert_eq!(assessment.matched, vec!["revenue", "equity", "cash flow"]);
        assert_eq!(assessment.min_matches, 2);
        assert!(assessment.is_financial());
    }

    #[test]
    fn test_custom_keywords_are_normalized() {
        let heuristic = RelevanceHeuristic::new(["Dividend", "dividend", "  ", "Yield"], 1);
        assert_eq!(heuristic.keywords(), &["dividend".to_string(), "yield".to_string()]);
        assert!(heuristic.is_financial("The DIVIDEND was raised."));
    }

    #[test]
    fn test_zero_threshold_always_matches() {
        let heuristic = RelevanceHeuristic::new(DEFAULT_KEYWORDS, 0);
        assert!(heuristic.is_financial("nothing relevant here"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use proptest::sample::subsequence;

    proptest! {
        /// Property: result is true iff at least two distinct keywords appear
        #[test]
        fn test_threshold_property(
            chosen in subsequence(DEFAULT_KEYWORDS.to_vec(), 0..=DEFAULT_KEYWORDS.len()),
            repeats in 1..4usize,
        ) {
            let mut parts = Vec::new();
            for keyword in &chosen {
                for _ in 0..repeats {
                    parts.push(keyword.to_string());
                }
            }
            let text = parts.join(" 0 ");

            prop_assert_eq!(is_financial_document(&text), chosen.len() >= 2);
            let matched = RelevanceHeuristic::default().assess(&text).matched;
            prop_assert_eq!(matched.len(), chosen.len());
        }

        /// Property: casing never changes the outcome
        #[test]
        fn test_case_insensitivity_property(text in "[a-zA-Z ]{0,80}") {
            prop_assert_eq!(
                is_financial_document(&text),
                is_financial_document(&text.to_uppercase())
            );
        }

        /// Property: digit-only text never matches
        #[test]
        fn test_digits_never_match(text in "[0-9 .,]{0,200}") {
            prop_assert!(!is_financial_document(&text));
        }
    }
}
