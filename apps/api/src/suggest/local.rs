//! Deterministic document-level heuristics that complement the per-signal suggestions.

use crate::analysis::vocabulary::{
    COVER_LETTER_MARKERS, NARRATIVE_PHRASES, TECHNICAL_TERMS, WEAK_PHRASES,
};
use crate::classify::patterns::{has_email, header_section, Section};
use crate::classify::{ClassifiedLine, LineRole};
use crate::rewrite::{Priority, RewriteSuggestion};

/// Paragraphs longer than this many words should become bullets.
pub const LONG_PARAGRAPH_WORDS: usize = 40;
/// More distinct first-person phrases than this reads as narrative.
const NARRATIVE_THRESHOLD: usize = 3;

const CORE_SECTIONS: &[(Section, &str)] = &[
    (Section::Experience, "Add a WORK EXPERIENCE section with achievement bullets."),
    (Section::Skills, "Add a SKILLS section listing the tools and technologies you use."),
    (Section::Education, "Add an EDUCATION section."),
];

pub fn local_suggestions(text: &str, classified: &[ClassifiedLine]) -> Vec<RewriteSuggestion> {
    let lower = text.to_lowercase();
    if lower.trim().is_empty() {
        return Vec::new();
    }

    if COVER_LETTER_MARKERS.iter().any(|m| lower.contains(m)) {
        return vec![RewriteSuggestion::new(
            "Format",
            "This reads like a cover letter, not a résumé. Restructure it with a contact header, \
             a professional summary, experience bullets, a skills section and an education section.",
            Priority::High,
        )];
    }

    let mut suggestions = Vec::new();

    if lower.trim_start().starts_with("dear") || lower.trim_start().starts_with("to whom") {
        suggestions.push(RewriteSuggestion::new(
            "Contact Information",
            "Start with your name and contact details, not a letter greeting.",
            Priority::High,
        ));
    }

    let sections: Vec<Section> = classified
        .iter()
        .filter(|l| l.role.is_header())
        .filter_map(|l| header_section(&l.text))
        .collect();
    for (section, advice) in CORE_SECTIONS {
        if !sections.contains(section) {
            suggestions.push(RewriteSuggestion::new("Structure", *advice, Priority::Medium));
        }
    }

    if !classified.iter().any(|l| l.role == LineRole::BulletItem) {
        suggestions.push(RewriteSuggestion::new(
            "Formatting",
            "Convert paragraph text to bullet points for better readability.",
            Priority::Medium,
        ));
    }

    let narrative = NARRATIVE_PHRASES
        .iter()
        .filter(|p| lower.contains(*p))
        .count();
    if narrative > NARRATIVE_THRESHOLD {
        suggestions.push(RewriteSuggestion::new(
            "Summary",
            "Reduce first-person narrative; lead with accomplishments instead of 'I' statements.",
            Priority::Medium,
        ));
    }

    if WEAK_PHRASES.iter().any(|p| lower.contains(p)) {
        suggestions.push(RewriteSuggestion::new(
            "Experience",
            "Focus on achievements rather than responsibilities: say what changed because of your work.",
            Priority::Medium,
        ));
    }

    if let Some(index) = classified.iter().position(|l| {
        l.role == LineRole::PlainParagraph && l.text.split_whitespace().count() > LONG_PARAGRAPH_WORDS
    }) {
        suggestions.push(RewriteSuggestion::new(
            "Formatting",
            format!("Break the long paragraph on line {} into concise bullet points.", index + 1),
            Priority::Low,
        ));
    }

    let contact_at_top = classified.iter().any(|l| l.role == LineRole::ContactInfo && has_email(&l.text));
    let email_elsewhere = classified
        .iter()
        .any(|l| l.role != LineRole::ReferenceContact && has_email(&l.text));
    if email_elsewhere && !contact_at_top {
        suggestions.push(RewriteSuggestion::new(
            "Contact Information",
            "Move your email and phone number into a contact block at the top of the page.",
            Priority::Medium,
        ));
    }

    if !TECHNICAL_TERMS.iter().any(|t| lower.contains(t)) {
        suggestions.push(RewriteSuggestion::new(
            "Skills",
            "Add specific technical skills and tools you have used.",
            Priority::Low,
        ));
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_text;

    fn run(text: &str) -> Vec<RewriteSuggestion> {
        local_suggestions(text, &classify_text(text))
    }

    #[test]
    fn test_empty_text_has_no_suggestions() {
        assert!(run("").is_empty());
    }

    #[test]
    fn test_cover_letter_short_circuits() {
        let suggestions = run("Dear Hiring Manager,\nI am excited to apply for the role.");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].priority, Priority::High);
        assert!(suggestions[0].advice.contains("cover letter"));
    }

    #[test]
    fn test_missing_sections_and_bullets() {
        let suggestions = run("Jane Doe\njane@x.com\nSUMMARY\nBackend developer working with Python.");
        let structure = suggestions.iter().filter(|s| s.section == "Structure").count();
        assert_eq!(structure, 3);
        assert!(suggestions.iter().any(|s| s.advice.contains("bullet points")));
        assert!(!suggestions.iter().any(|s| s.section == "Skills"));
    }

    #[test]
    fn test_contact_buried_in_body() {
        let text = "SUMMARY\nEngineer.\nEXPERIENCE\n• Built tools\nContact: jane@x.com";
        assert!(run(text)
            .iter()
            .any(|s| s.section == "Contact Information" && s.advice.contains("top of the page")));
    }

    #[test]
    fn test_responsibility_phrasing_flagged() {
        let text = "EXPERIENCE\n• Responsible for the billing service";
        assert!(run(text).iter().any(|s| s.advice.contains("achievements rather than")));
    }

    #[test]
    fn test_long_paragraph_points_at_line() {
        let paragraph = vec!["word"; 45].join(" ");
        let text = format!("SUMMARY\n{paragraph}");
        assert!(run(&text).iter().any(|s| s.advice.contains("line 2")));
    }
}
