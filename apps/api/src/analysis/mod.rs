//! Résumé quality assessment.
//!
//! Scoring is additive from zero: every signal in `signals` contributes a bounded
//! number of points and exactly one finding. The total is clamped to `0..=100`.

pub mod highlight;
pub mod signals;
pub mod vocabulary;

use serde::{Deserialize, Serialize};

use crate::classify::ClassifiedLine;

pub use highlight::{highlight, HighlightedLine};

/// Score reported for a document with no content.
pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 100;

/// Findings are listed in this order: good news first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Good,
    Warning,
    Issue,
}

/// The check that produced a finding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Signal {
    Email,
    Phone,
    Quantification,
    ActionVerbs,
    Keywords,
    Length,
    Structure,
    Placeholders,
    #[default]
    General,
}

impl Signal {
    /// Résumé area a suggestion for this signal should point at.
    pub fn section(self) -> &'static str {
        match self {
            Signal::Email | Signal::Phone => "Contact Information",
            Signal::Quantification | Signal::ActionVerbs => "Experience",
            Signal::Keywords => "Skills",
            Signal::Length => "Overall Length",
            Signal::Structure => "Structure",
            Signal::Placeholders => "Content",
            Signal::General => "General",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFinding {
    pub category: Category,
    pub message: String,
    #[serde(rename = "line", default, skip_serializing_if = "Option::is_none")]
    pub related_line_index: Option<usize>,
    #[serde(skip)]
    pub signal: Signal,
}

/// Letter-style grade derived from the score alone. Ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "Needs Work")]
    NeedsWork,
    Developing,
    Fair,
    Good,
    Strong,
    Excellent,
}

/// Inclusive lower bounds, best first.
const GRADE_TABLE: &[(u8, Grade)] = &[
    (90, Grade::Excellent),
    (80, Grade::Strong),
    (70, Grade::Good),
    (60, Grade::Fair),
    (50, Grade::Developing),
];

impl Grade {
    pub fn from_score(score: u8) -> Self {
        GRADE_TABLE
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::NeedsWork)
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent",
            Grade::Strong => "Strong",
            Grade::Good => "Good",
            Grade::Fair => "Fair",
            Grade::Developing => "Developing",
            Grade::NeedsWork => "Needs Work",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u8,
    pub grade: Grade,
    pub findings: Vec<AnalysisFinding>,
}

impl AnalysisResult {
    pub fn findings_in(&self, category: Category) -> impl Iterator<Item = &AnalysisFinding> {
        self.findings.iter().filter(move |f| f.category == category)
    }
}

/// Tunables for the quantification heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Maximum distance in words between an action verb and a quantity.
    pub quantifier_window: usize,
    /// Count a percentage as an achievement even without a nearby verb.
    pub accept_bare_percentages: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            quantifier_window: 6,
            accept_bare_percentages: false,
        }
    }
}

/// Scores a classified résumé. Never fails; empty input yields `MIN_SCORE`.
pub fn analyze(
    raw_text: &str,
    classified: &[ClassifiedLine],
    config: &AnalysisConfig,
) -> AnalysisResult {
    let outcomes = [
        signals::check_email(classified),
        signals::check_phone(classified),
        signals::check_quantified(classified, config),
        signals::check_action_verbs(classified),
        signals::check_keywords(classified),
        signals::check_length(classified, raw_text),
        signals::check_structure(classified),
        signals::check_placeholders(classified),
    ];

    let total: u32 = outcomes.iter().map(|o| o.points).sum();
    let score = total.clamp(u32::from(MIN_SCORE), u32::from(MAX_SCORE)) as u8;

    let mut findings: Vec<AnalysisFinding> = outcomes.into_iter().map(|o| o.finding).collect();
    // stable: insertion order survives within a category
    findings.sort_by_key(|f| f.category);

    AnalysisResult {
        score,
        grade: Grade::from_score(score),
        findings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_text;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const SAMPLE: &str = "Jane Doe\njane@x.com\n\nEXPERIENCE\n• Led team of 5 engineers\n\nREFERENCES\nJohn Smith, 555-1234";

    const STRONG: &str = "Jane Doe
jane@x.com | (555) 123-4567 | linkedin.com/in/janedoe

SUMMARY
Platform engineer focused on reliability, Kubernetes and developer tooling.

EXPERIENCE
Senior Engineer, Acme Corp, 2019 - Present
• Led migration of 40 services to Kubernetes with zero downtime
• Reduced deploy time by 65% by rebuilding the CI/CD pipeline
• Designed an API gateway serving 2M requests per day
• Mentored 6 engineers through promotion
• Automated on-call reporting, saving 10 hours per week
Engineer, Beta Inc, 2016 - 2019
• Built Python analytics jobs processing 500 GB nightly
• Improved SQL query latency by 3x across reporting

EDUCATION
Bachelor of Science, Computer Science
State University, 2016

SKILLS
• Python, Rust, SQL, Docker, AWS";

    fn run(text: &str) -> AnalysisResult {
        analyze(text, &classify_text(text), &AnalysisConfig::default())
    }

    #[test]
    fn test_empty_input_scores_minimum() {
        let result = run("");
        assert_eq!(result.score, MIN_SCORE);
        assert_eq!(result.grade, Grade::NeedsWork);
        assert_eq!(result.findings.len(), 8);
        assert!(result.findings.iter().all(|f| f.category != Category::Good));
    }

    #[test]
    fn test_whitespace_only_input_scores_minimum() {
        assert_eq!(run("\n   \n\t\n").score, MIN_SCORE);
    }

    #[test]
    fn test_sample_quantified_bullet_supports_good_finding() {
        let result = run(SAMPLE);
        let quantified = result
            .findings
            .iter()
            .find(|f| f.signal == Signal::Quantification)
            .expect("quantification finding");
        assert_eq!(quantified.category, Category::Good);
        assert_eq!(quantified.related_line_index, Some(4));
    }

    #[test]
    fn test_findings_grouped_by_category() {
        let result = run(SAMPLE);
        let categories: Vec<Category> = result.findings.iter().map(|f| f.category).collect();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
    }

    #[test]
    fn test_each_signal_reports_once() {
        let result = run(STRONG);
        let mut signals: Vec<_> = result.findings.iter().map(|f| format!("{:?}", f.signal)).collect();
        signals.sort();
        signals.dedup();
        assert_eq!(signals.len(), 8);
    }

    #[test]
    fn test_strong_resume_scores_high() {
        let result = run(STRONG);
        assert_eq!(result.score, 100, "{:#?}", result.findings);
        assert_eq!(result.grade, Grade::Excellent);
    }

    #[test]
    fn test_grade_table_boundaries() {
        assert_eq!(Grade::from_score(100), Grade::Excellent);
        assert_eq!(Grade::from_score(90), Grade::Excellent);
        assert_eq!(Grade::from_score(89), Grade::Strong);
        assert_eq!(Grade::from_score(70), Grade::Good);
        assert_eq!(Grade::from_score(60), Grade::Fair);
        assert_eq!(Grade::from_score(50), Grade::Developing);
        assert_eq!(Grade::from_score(49), Grade::NeedsWork);
        assert_eq!(Grade::NeedsWork.label(), "Needs Work");
    }

    #[test]
    fn test_wire_shape() {
        let result = run(SAMPLE);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["score"].is_u64());
        assert!(json["grade"].is_string());
        let first = &json["findings"][0];
        assert_eq!(first["category"], "good");
        assert!(first.get("signal").is_none());
        assert!(first.get("related_line_index").is_none());
    }

    proptest! {
        #[test]
        fn score_is_bounded_and_deterministic(text in "[ A-Za-z0-9@.,:%$•\n-]{0,400}") {
            let a = run(&text);
            let b = run(&text);
            prop_assert!(a.score <= MAX_SCORE);
            prop_assert_eq!(a.grade, Grade::from_score(a.score));
            prop_assert_eq!(a, b);
        }

        #[test]
        fn grade_is_monotonic(a in 0u8..=100, b in 0u8..=100) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(Grade::from_score(low) <= Grade::from_score(high));
        }
    }
}
