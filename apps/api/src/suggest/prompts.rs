// Prompt text for the remote suggestion provider.

use crate::analysis::{AnalysisResult, Category};

/// Résumé text beyond this many characters is not sent to the model.
pub const MAX_PROMPT_CHARS: usize = 6000;

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

const SUGGESTION_INSTRUCTIONS: &str = "\
    You review résumés for applicant tracking system compatibility and recruiter readability. \
    Give at most 8 concrete, line-specific improvements the automated checks below did not already cover. \
    NEVER invent employers, titles, dates or figures; when a number is missing, tell the candidate to add one. \
    Respond with {\"suggestions\": [{\"section\": string, \"advice\": string, \"priority\": \"high\" | \"medium\" | \"low\"}]}.";

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

pub fn build_suggestion_prompt(text: &str, result: &AnalysisResult) -> String {
    let findings: Vec<String> = result
        .findings
        .iter()
        .filter(|f| f.category != Category::Good)
        .map(|f| format!("- [{:?}] {}", f.category, f.message))
        .collect();
    let findings = if findings.is_empty() {
        "- none".to_string()
    } else {
        findings.join("\n")
    };

    format!(
        "{SUGGESTION_INSTRUCTIONS}\n\nAutomated score: {score}/100 ({grade})\nAutomated findings:\n{findings}\n\nRésumé:\n<<<\n{body}\n>>>",
        score = result.score,
        grade = result.grade.label(),
        body = truncate_chars(text, MAX_PROMPT_CHARS),
    )
}
