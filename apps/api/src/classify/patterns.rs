//! Lexical patterns shared by the line rules, the analysis signals and the rewriter.
//!
//! Everything here is a pure function of a single line of text.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

/// Glyphs that open a bullet line on their own.
const BULLET_GLYPHS: &[char] = &[
    '•', '●', '▪', '◦', '‣', '■', '□', '○', '►', '➢', '✓', '·', '–', '—',
];

/// ASCII markers that only count as bullets when followed by whitespace.
const ASCII_MARKERS: &[char] = &['-', '*', '+'];

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").unwrap();
    static ref PHONE_FULL: Regex =
        Regex::new(r"(?:\+\d{1,3}[\s.-]?)?(?:\(\d{3}\)\s?|\b\d{3}[\s.-]?)\d{3}[\s.-]?\d{4}\b")
            .unwrap();
    static ref PHONE_LOCAL: Regex = Regex::new(r"\b\d{3}[.-]\d{4}\b").unwrap();
    static ref PROFILE_URL: Regex = Regex::new(
        r"(?i)\b(?:https?://|www\.)\S+|\blinkedin\.com/\S*|\bgithub\.com/\S*"
    )
    .unwrap();
    static ref NAME_LINE: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z.'-]*(?:\s+[A-Za-z][A-Za-z.'-]*){0,3}$").unwrap();
    static ref DEGREE_OF: Regex =
        Regex::new(r"(?i)\b(?:bachelor|master|associate|doctor)(?:'s)?\s+of\s+\w").unwrap();
    static ref DEGREE_WORD: Regex =
        Regex::new(r"(?i)\b(?:bachelor|master|associate|doctor|doctorate|diploma|mba|phd)")
            .unwrap();
    static ref DEGREE_ABBR: Regex = Regex::new(
        r"\b(?:B\.?S\.?c?|B\.?A\.?|M\.?S\.?c?|M\.?A\.?|B\.?Eng|M\.?Eng|Ph\.?D\.?|M\.?B\.?A\.?)(?:[\s,]|$)"
    )
    .unwrap();
    static ref INSTITUTION: Regex =
        Regex::new(r"(?i)\b(?:university|college|institute|school|academy|polytechnic)\b")
            .unwrap();
    static ref EDUCATION_DETAIL: Regex = Regex::new(
        r"(?i)\b(?:gpa|cumulative|honou?rs|cum laude|magna|summa|coursework|dean'?s list|graduated|expected|minor|concentration|thesis|major|credential)\b|\b(?:19|20)\d{2}\b"
    )
    .unwrap();
    static ref PLACEHOLDER: Regex = Regex::new(
        r"(?i)\[[^\]]{2,}\]|\blorem ipsum\b|\b(?:xxx+|tbd)\b|\byour (?:full )?(?:name|email|phone)\b"
    )
    .unwrap();
    static ref BRACKETED: Regex = Regex::new(r"\s*\[[^\]]*\]").unwrap();
    static ref QUANTIFIER: Regex = Regex::new(
        r"(?i)^(?:\$\d|\d[\d,]*(?:\.\d+)?(?:%|k|m|x|\+)?$|\d[\d,]*(?:\.\d+)?%|~\d|\d+(?:k|m|b)\+?$|\d+x$|\d+-(?:person|member|people))"
    )
    .unwrap();
}

/// Coarse résumé section a header opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    References,
    Other,
}

/// Exact header phrases, compared after normalisation.
const HEADER_PHRASES: &[(&str, Section)] = &[
    ("summary", Section::Summary),
    ("professional summary", Section::Summary),
    ("career summary", Section::Summary),
    ("profile", Section::Summary),
    ("professional profile", Section::Summary),
    ("objective", Section::Summary),
    ("career objective", Section::Summary),
    ("experience", Section::Experience),
    ("professional experience", Section::Experience),
    ("work experience", Section::Experience),
    ("relevant experience", Section::Experience),
    ("employment", Section::Experience),
    ("employment history", Section::Experience),
    ("work history", Section::Experience),
    ("education", Section::Education),
    ("academic background", Section::Education),
    ("education and training", Section::Education),
    ("skills", Section::Skills),
    ("technical skills", Section::Skills),
    ("core competencies", Section::Skills),
    ("competencies", Section::Skills),
    ("key skills", Section::Skills),
    ("skills and abilities", Section::Skills),
    ("technologies", Section::Skills),
    ("projects", Section::Projects),
    ("technical projects", Section::Projects),
    ("certifications", Section::Certifications),
    ("certificates", Section::Certifications),
    ("licenses and certifications", Section::Certifications),
    ("references", Section::References),
    ("professional references", Section::References),
    ("awards", Section::Other),
    ("honors and awards", Section::Other),
    ("publications", Section::Other),
    ("volunteer experience", Section::Other),
    ("volunteer work", Section::Other),
    ("languages", Section::Other),
    ("interests", Section::Other),
    ("additional qualifications", Section::Other),
    ("additional information", Section::Other),
    ("leadership", Section::Other),
    ("activities", Section::Other),
];

/// Head words that make a short ALL-CAPS line a header.
const HEADER_WORDS: &[(&str, Section)] = &[
    ("references", Section::References),
    ("summary", Section::Summary),
    ("objective", Section::Summary),
    ("profile", Section::Summary),
    ("experience", Section::Experience),
    ("employment", Section::Experience),
    ("education", Section::Education),
    ("skills", Section::Skills),
    ("competencies", Section::Skills),
    ("projects", Section::Projects),
    ("certifications", Section::Certifications),
    ("certificates", Section::Certifications),
    ("qualifications", Section::Other),
    ("awards", Section::Other),
    ("publications", Section::Other),
    ("achievements", Section::Other),
    ("volunteer", Section::Other),
    ("languages", Section::Other),
    ("interests", Section::Other),
    ("activities", Section::Other),
];

const HEADER_MAX_WORDS: usize = 4;

/// Byte length of the bullet marker opening `text` (after leading whitespace), if any.
fn marker_len(text: &str) -> Option<usize> {
    let mut chars = text.chars();
    let first = chars.next()?;
    if BULLET_GLYPHS.contains(&first) {
        return Some(first.len_utf8());
    }
    if ASCII_MARKERS.contains(&first) && chars.next().map_or(false, char::is_whitespace) {
        return Some(first.len_utf8());
    }
    None
}

pub fn is_bullet_glyph(c: char) -> bool {
    BULLET_GLYPHS.contains(&c)
}

pub fn has_bullet(text: &str) -> bool {
    marker_len(text.trim_start()).is_some()
}

/// Removes every leading bullet marker and the whitespace around them.
pub fn strip_bullet(text: &str) -> &str {
    let mut rest = text.trim_start();
    while let Some(len) = marker_len(rest) {
        rest = rest[len..].trim_start();
    }
    rest
}

/// Leading whitespace width in columns (tab = 4) halved.
pub fn indent_level(text: &str) -> usize {
    let columns: usize = text
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum();
    columns / 2
}

fn normalize_header(text: &str) -> String {
    let core = strip_bullet(text)
        .trim()
        .trim_matches(|c| c == '*' || c == '_' || c == '#')
        .trim()
        .trim_end_matches(':')
        .trim();
    core.split_whitespace()
        .map(|w| if w == "&" { "and" } else { w })
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Returns the section a header line opens, or `None` when the line is not a header.
pub fn header_section(text: &str) -> Option<Section> {
    let key = normalize_header(text);
    if key.is_empty() || key.contains(['.', ',', ';', '!', '?', ':']) {
        return None;
    }
    if let Some((_, section)) = HEADER_PHRASES.iter().find(|(phrase, _)| *phrase == key) {
        return Some(*section);
    }

    let core = strip_bullet(text).trim().trim_matches('*').trim();
    let words: Vec<&str> = key.split_whitespace().collect();
    let all_caps = core.chars().any(char::is_alphabetic)
        && core
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase);
    if !all_caps || words.len() > HEADER_MAX_WORDS {
        return None;
    }
    words.iter().find_map(|word| {
        HEADER_WORDS
            .iter()
            .find(|(head, _)| head == word)
            .map(|(_, section)| *section)
    })
}

pub fn has_email(text: &str) -> bool {
    EMAIL.is_match(text)
}

pub fn has_phone(text: &str) -> bool {
    PHONE_FULL.is_match(text) || PHONE_LOCAL.is_match(text)
}

pub fn has_contact_pattern(text: &str) -> bool {
    has_email(text) || has_phone(text) || PROFILE_URL.is_match(text)
}

/// A short run of alphabetic words, the way a name heads a résumé.
pub fn looks_like_name(text: &str) -> bool {
    NAME_LINE.is_match(text.trim())
}

pub fn is_degree(text: &str) -> bool {
    DEGREE_OF.is_match(text)
        || ((DEGREE_WORD.is_match(text) || DEGREE_ABBR.is_match(text))
            && INSTITUTION.is_match(text))
}

pub fn has_education_detail(text: &str) -> bool {
    EDUCATION_DETAIL.is_match(text)
}

pub fn has_placeholder(text: &str) -> bool {
    PLACEHOLDER.is_match(text)
}

/// True when a single whitespace-delimited token expresses a quantity.
pub fn is_quantifier_token(token: &str) -> bool {
    let token = token.trim_matches(|c: char| matches!(c, '(' | ')' | ',' | ';' | ':' | '.' | '"'));
    !token.is_empty() && QUANTIFIER.is_match(token)
}

pub fn is_percentage_token(token: &str) -> bool {
    token.contains('%') && token.chars().any(|c| c.is_ascii_digit())
}

/// Lower-cased alphabetic core of a token (`"Led,"` → `"led"`).
pub fn word_key(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Comma-separated terms of a list line, optionally behind a short `Category:` label.
pub fn list_terms(text: &str) -> Vec<&str> {
    let content = strip_bullet(text).trim();
    let body = match content.split_once(':') {
        Some((label, rest)) if label.split_whitespace().count() <= 3 => rest,
        _ => content,
    };
    body.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .collect()
}

/// Drops `[...]` segments so placeholder punctuation never reads as list syntax.
pub fn without_brackets(text: &str) -> Cow<'_, str> {
    BRACKETED.replace_all(text, "")
}

/// A line that is primarily a comma-separated list of short terms.
pub fn is_term_list(text: &str) -> bool {
    let text = without_brackets(text);
    let content = strip_bullet(&text).trim();
    if content.ends_with('.') || !content.contains(',') {
        return false;
    }
    let terms = list_terms(&text);
    terms.len() >= 2 && terms.iter().all(|t| t.split_whitespace().count() <= 4)
}

/// A line that announces a list on the following lines (`"Languages:"`).
pub fn opens_list(text: &str) -> bool {
    strip_bullet(&without_brackets(text)).trim_end().ends_with(':') || is_term_list(text)
}
