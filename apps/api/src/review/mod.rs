//! The synchronous review chain: classify → analyze → highlight → rewrite.

pub mod handlers;

use serde::Serialize;

use crate::analysis::{analyze, highlight, AnalysisConfig, AnalysisResult, HighlightedLine};
use crate::classify::{classify_text, ClassifiedLine};
use crate::rewrite::{rewrite, rewritten_text, RewriteSuggestion};

/// Everything one review produces.
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub analysis: AnalysisResult,
    pub lines: Vec<HighlightedLine>,
    pub rewritten: String,
    pub suggestions: Vec<RewriteSuggestion>,
    #[serde(skip)]
    pub classified: Vec<ClassifiedLine>,
}

pub fn review_text(text: &str, config: &AnalysisConfig) -> Review {
    let classified = classify_text(text);
    let analysis = analyze(text, &classified, config);
    let lines = highlight(&classified, config);
    let (rewritten_lines, suggestions) = rewrite(&classified, &analysis);

    Review {
        analysis,
        lines,
        rewritten: rewritten_text(&rewritten_lines),
        suggestions,
        classified,
    }
}
