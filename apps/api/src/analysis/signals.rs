//! Independent scoring signals. Each check contributes at most its cap and emits
//! exactly one finding.

use std::collections::BTreeSet;

use crate::analysis::vocabulary::{is_action_verb, INDUSTRY_KEYWORDS, WEAK_PHRASES};
use crate::analysis::{AnalysisConfig, AnalysisFinding, Category, Signal};
use crate::classify::patterns::{
    has_email, has_phone, has_placeholder, is_percentage_token, is_quantifier_token, word_key,
};
use crate::classify::{ClassifiedLine, LineRole};

pub const EMAIL_POINTS: u32 = 10;
pub const PHONE_POINTS: u32 = 5;
pub const QUANTIFIED_POINTS: u32 = 25;
pub const ACTION_VERB_POINTS: u32 = 20;
pub const KEYWORD_POINTS: u32 = 15;
pub const LENGTH_POINTS: u32 = 10;
pub const STRUCTURE_POINTS: u32 = 10;
pub const PLACEHOLDER_POINTS: u32 = 5;

/// Content lines inside this band count as an appropriate length.
pub const LENGTH_BAND: (usize, usize) = (12, 60);
const MIN_CONTENT_LINES: usize = 3;

/// Points and finding produced by one check.
#[derive(Debug, Clone)]
pub struct SignalOutcome {
    pub points: u32,
    pub finding: AnalysisFinding,
}

impl SignalOutcome {
    fn new(
        points: u32,
        signal: Signal,
        category: Category,
        message: String,
        line: Option<usize>,
    ) -> Self {
        Self {
            points,
            finding: AnalysisFinding {
                category,
                message,
                related_line_index: line,
                signal,
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Line-level facts (shared with highlighting and rewriting)
// ────────────────────────────────────────────────────────────────────────────

pub fn action_verbs_in(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(word_key)
        .filter(|w| is_action_verb(w))
}

pub fn has_action_verb(text: &str) -> bool {
    action_verbs_in(text).next().is_some()
}

pub fn has_quantifier(text: &str) -> bool {
    text.split_whitespace().any(is_quantifier_token)
}

pub fn has_weak_phrase(text: &str) -> bool {
    let lower = text.to_lowercase();
    WEAK_PHRASES.iter().any(|p| lower.contains(p))
}

/// A quantity within `quantifier_window` words of an action verb, or a bare
/// percentage when the config accepts those.
pub fn is_quantified(text: &str, config: &AnalysisConfig) -> bool {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if config.accept_bare_percentages && tokens.iter().any(|t| is_percentage_token(t)) {
        return true;
    }
    let verbs: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| is_action_verb(&word_key(t)))
        .map(|(i, _)| i)
        .collect();
    tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| is_quantifier_token(t))
        .any(|(q, _)| verbs.iter().any(|&v| v.abs_diff(q) <= config.quantifier_window))
}

/// Lines that speak about the candidate's own work.
fn is_body(line: &ClassifiedLine) -> bool {
    !matches!(
        line.role,
        LineRole::Blank
            | LineRole::ContactInfo
            | LineRole::SectionHeader
            | LineRole::ReferenceHeader
            | LineRole::ReferenceContact
    )
}

fn first_index(
    lines: &[ClassifiedLine],
    predicate: impl Fn(&ClassifiedLine) -> bool,
) -> Option<usize> {
    lines.iter().position(predicate)
}

// ────────────────────────────────────────────────────────────────────────────
// Checks
// ────────────────────────────────────────────────────────────────────────────

pub fn check_email(lines: &[ClassifiedLine]) -> SignalOutcome {
    match first_index(lines, |l| l.role != LineRole::ReferenceContact && has_email(&l.text)) {
        Some(i) => SignalOutcome::new(
            EMAIL_POINTS,
            Signal::Email,
            Category::Good,
            "Contains email address".to_string(),
            Some(i),
        ),
        None => SignalOutcome::new(
            0,
            Signal::Email,
            Category::Issue,
            "Missing email address".to_string(),
            None,
        ),
    }
}

pub fn check_phone(lines: &[ClassifiedLine]) -> SignalOutcome {
    match first_index(lines, |l| l.role != LineRole::ReferenceContact && has_phone(&l.text)) {
        Some(i) => SignalOutcome::new(
            PHONE_POINTS,
            Signal::Phone,
            Category::Good,
            "Contains phone number".to_string(),
            Some(i),
        ),
        None => SignalOutcome::new(
            0,
            Signal::Phone,
            Category::Warning,
            "Consider adding a phone number".to_string(),
            None,
        ),
    }
}

pub fn check_quantified(lines: &[ClassifiedLine], config: &AnalysisConfig) -> SignalOutcome {
    let quantified: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| is_body(l) && is_quantified(&l.text, config))
        .map(|(i, _)| i)
        .collect();
    let bullets: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.role == LineRole::BulletItem)
        .map(|(i, _)| i)
        .collect();
    let unquantified_bullet = bullets.iter().copied().find(|i| !quantified.contains(i));
    let count = quantified.len();

    if count >= 3 || (count >= 1 && !bullets.is_empty() && unquantified_bullet.is_none()) {
        SignalOutcome::new(
            QUANTIFIED_POINTS,
            Signal::Quantification,
            Category::Good,
            format!("Contains quantifiable achievements ({count} found)"),
            quantified.first().copied(),
        )
    } else if count >= 1 {
        SignalOutcome::new(
            QUANTIFIED_POINTS * count as u32 / 3,
            Signal::Quantification,
            Category::Warning,
            format!("Could use more quantifiable achievements (only {count} found)"),
            unquantified_bullet,
        )
    } else {
        SignalOutcome::new(
            0,
            Signal::Quantification,
            Category::Issue,
            "No quantifiable achievements found".to_string(),
            bullets.first().copied(),
        )
    }
}

pub fn check_action_verbs(lines: &[ClassifiedLine]) -> SignalOutcome {
    let verbs: BTreeSet<String> = lines
        .iter()
        .filter(|l| is_body(l))
        .flat_map(|l| action_verbs_in(&l.text).collect::<Vec<_>>())
        .collect();
    let count = verbs.len();
    let points = (4 * count as u32).min(ACTION_VERB_POINTS);

    match count {
        n if n >= 5 => SignalOutcome::new(
            ACTION_VERB_POINTS,
            Signal::ActionVerbs,
            Category::Good,
            format!("Good use of action verbs ({n} found)"),
            first_index(lines, |l| is_body(l) && has_action_verb(&l.text)),
        ),
        n if n >= 2 => SignalOutcome::new(
            points,
            Signal::ActionVerbs,
            Category::Warning,
            format!("Could use more action verbs (only {n} found)"),
            first_index(lines, |l| {
                l.role == LineRole::BulletItem && !has_action_verb(&l.text)
            }),
        ),
        _ => SignalOutcome::new(
            points,
            Signal::ActionVerbs,
            Category::Issue,
            "Very few action verbs used".to_string(),
            first_index(lines, |l| {
                l.role == LineRole::BulletItem && !has_action_verb(&l.text)
            }),
        ),
    }
}

pub fn check_keywords(lines: &[ClassifiedLine]) -> SignalOutcome {
    let normalized = format!(
        " {} ",
        lines
            .iter()
            .filter(|l| is_body(l) || l.role.is_header())
            .flat_map(|l| l.text.split_whitespace().map(word_key))
            .collect::<Vec<_>>()
            .join(" ")
    );
    let found: Vec<&str> = INDUSTRY_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| normalized.contains(&format!(" {kw} ")))
        .collect();
    let count = found.len();

    match count {
        0 => SignalOutcome::new(
            0,
            Signal::Keywords,
            Category::Issue,
            "No industry-specific keywords found".to_string(),
            None,
        ),
        n if n >= 4 => SignalOutcome::new(
            KEYWORD_POINTS,
            Signal::Keywords,
            Category::Good,
            format!("Found {n} relevant industry keywords"),
            None,
        ),
        n => SignalOutcome::new(
            4 * n as u32,
            Signal::Keywords,
            Category::Warning,
            format!("Only {n} industry keywords found"),
            None,
        ),
    }
}

pub fn check_length(lines: &[ClassifiedLine], raw_text: &str) -> SignalOutcome {
    let content = lines.iter().filter(|l| l.role != LineRole::Blank).count();
    let words = raw_text.split_whitespace().count();
    let (low, high) = LENGTH_BAND;

    if content < MIN_CONTENT_LINES {
        SignalOutcome::new(
            0,
            Signal::Length,
            Category::Issue,
            format!("Résumé too short ({content} lines, {words} words)"),
            None,
        )
    } else if content < low {
        SignalOutcome::new(
            LENGTH_POINTS / 2,
            Signal::Length,
            Category::Warning,
            format!("Résumé looks short ({content} lines, {words} words)"),
            None,
        )
    } else if content > high {
        SignalOutcome::new(
            LENGTH_POINTS / 2,
            Signal::Length,
            Category::Warning,
            format!("Résumé might be too long ({content} lines, {words} words)"),
            None,
        )
    } else {
        SignalOutcome::new(
            LENGTH_POINTS,
            Signal::Length,
            Category::Good,
            format!("Appropriate length ({content} lines, {words} words)"),
            None,
        )
    }
}

pub fn check_structure(lines: &[ClassifiedLine]) -> SignalOutcome {
    let headers: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.role.is_header())
        .map(|(i, _)| i)
        .collect();

    match headers.len() {
        0 => SignalOutcome::new(
            0,
            Signal::Structure,
            Category::Issue,
            "No section headers found".to_string(),
            None,
        ),
        n if n >= 3 => SignalOutcome::new(
            STRUCTURE_POINTS,
            Signal::Structure,
            Category::Good,
            format!("Clear section structure ({n} sections)"),
            headers.first().copied(),
        ),
        n => SignalOutcome::new(
            4 * n as u32,
            Signal::Structure,
            Category::Warning,
            format!("Only {n} section headers found"),
            headers.first().copied(),
        ),
    }
}

pub fn check_placeholders(lines: &[ClassifiedLine]) -> SignalOutcome {
    if lines.iter().all(|l| l.role == LineRole::Blank) {
        return SignalOutcome::new(
            0,
            Signal::Placeholders,
            Category::Issue,
            "Document is empty".to_string(),
            None,
        );
    }
    match first_index(lines, |l| has_placeholder(&l.text)) {
        Some(i) => SignalOutcome::new(
            0,
            Signal::Placeholders,
            Category::Issue,
            "Contains placeholder text that must be replaced".to_string(),
            Some(i),
        ),
        None => SignalOutcome::new(
            PLACEHOLDER_POINTS,
            Signal::Placeholders,
            Category::Good,
            "No placeholder text".to_string(),
            None,
        ),
    }
}
