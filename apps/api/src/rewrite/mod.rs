//! Rewrite pass: line-local cleanups plus one suggestion per unmet finding.
//!
//! Roles are never reassigned. A wrapped sub-bullet list produces several
//! `SubBullet` lines that inherit the source line's role and indent.

pub mod transforms;

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisFinding, AnalysisResult, Category, Signal};
use crate::classify::{ClassifiedLine, LineRole};

use transforms::{append_metric_placeholder, strip_emoji, strip_glyphs, wrap_list, WRAP_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteSuggestion {
    pub section: String,
    pub advice: String,
    pub priority: Priority,
}

impl RewriteSuggestion {
    pub fn new(section: impl Into<String>, advice: impl Into<String>, priority: Priority) -> Self {
        Self {
            section: section.into(),
            advice: advice.into(),
            priority,
        }
    }
}

pub fn rewrite(
    classified: &[ClassifiedLine],
    result: &AnalysisResult,
) -> (Vec<ClassifiedLine>, Vec<RewriteSuggestion>) {
    let lines = classified.iter().flat_map(rewrite_line).collect();
    let suggestions = result.findings.iter().filter_map(suggestion_for).collect();
    (lines, suggestions)
}

fn rewrite_line(line: &ClassifiedLine) -> Vec<ClassifiedLine> {
    let text = strip_emoji(&line.text);
    let texts = match line.role {
        LineRole::SectionHeader | LineRole::EducationDegree => vec![strip_glyphs(&text)],
        LineRole::BulletItem => vec![append_metric_placeholder(&text)],
        LineRole::SubBullet => wrap_list(&text, WRAP_WIDTH),
        _ => vec![text],
    };
    texts
        .into_iter()
        .map(|text| ClassifiedLine {
            text,
            role: line.role,
            indent_level: line.indent_level,
        })
        .collect()
}

pub fn rewritten_text(lines: &[ClassifiedLine]) -> String {
    lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn suggestion_for(finding: &AnalysisFinding) -> Option<RewriteSuggestion> {
    let priority = match finding.category {
        Category::Good => return None,
        Category::Warning => Priority::Medium,
        Category::Issue => Priority::High,
    };
    Some(RewriteSuggestion::new(
        finding.signal.section(),
        advice_for(finding.signal, &finding.message),
        priority,
    ))
}

fn advice_for(signal: Signal, message: &str) -> String {
    let advice = match signal {
        Signal::Email => "Add a professional email address to the contact block at the top.",
        Signal::Phone => "Add a phone number next to your email so recruiters can reach you.",
        Signal::Quantification => {
            "Back each achievement with a number: a percentage, dollar amount, headcount or timeframe."
        }
        Signal::ActionVerbs => {
            "Open bullets with strong action verbs such as Led, Built, Reduced or Launched."
        }
        Signal::Keywords => {
            "Mirror the tools and skills named in the job posting in your skills and experience."
        }
        Signal::Length => "Aim for one to two pages: roughly 12 to 60 lines of content.",
        Signal::Structure => {
            "Organize the document under clear headers: Summary, Experience, Education, Skills."
        }
        Signal::Placeholders => "Replace every bracketed placeholder with your own details.",
        Signal::General => return message.to_string(),
    };
    format!("{message}. {advice}")
}
