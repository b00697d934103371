//! Line classification: raw résumé text to an ordered sequence of role-tagged lines.
//!
//! Classification is a left fold over the lines. The accumulator (`ClassifyState`)
//! carries only the previous line's shape and the active section, so any line can be
//! replayed in isolation given the state before it.

pub mod patterns;
pub mod rules;

use serde::{Deserialize, Serialize};

use crate::classify::patterns::Section;
use crate::classify::rules::LineView;

/// Semantic role of one physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    ContactInfo,
    SectionHeader,
    BulletItem,
    SubBullet,
    EducationDegree,
    EducationDetail,
    ReferenceHeader,
    ReferenceContact,
    PlainParagraph,
    Blank,
}

impl LineRole {
    pub const ALL: [LineRole; 10] = [
        LineRole::ContactInfo,
        LineRole::SectionHeader,
        LineRole::BulletItem,
        LineRole::SubBullet,
        LineRole::EducationDegree,
        LineRole::EducationDetail,
        LineRole::ReferenceHeader,
        LineRole::ReferenceContact,
        LineRole::PlainParagraph,
        LineRole::Blank,
    ];

    pub fn is_header(self) -> bool {
        matches!(self, LineRole::SectionHeader | LineRole::ReferenceHeader)
    }

    /// Stable identifier, also used as the word-processor paragraph style id.
    pub fn style_id(self) -> &'static str {
        match self {
            LineRole::ContactInfo => "ContactInfo",
            LineRole::SectionHeader => "SectionHeader",
            LineRole::BulletItem => "BulletItem",
            LineRole::SubBullet => "SubBullet",
            LineRole::EducationDegree => "EducationDegree",
            LineRole::EducationDetail => "EducationDetail",
            LineRole::ReferenceHeader => "ReferenceHeader",
            LineRole::ReferenceContact => "ReferenceContact",
            LineRole::PlainParagraph => "PlainParagraph",
            LineRole::Blank => "Blank",
        }
    }

    pub fn from_style_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.style_id() == id)
    }
}

/// One physical line as extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub text: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    pub text: String,
    pub role: LineRole,
    pub indent_level: usize,
}

/// Shape of the line just classified, as seen by the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviousLine {
    pub role: LineRole,
    pub indent_level: usize,
    /// The line ends in `:` or is itself a comma list, so list items may follow.
    pub opens_list: bool,
}

/// Fold accumulator threaded through the classification pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifyState {
    /// Zero-based position of the line about to be classified.
    pub position: usize,
    pub previous: Option<PreviousLine>,
    /// Section opened by the most recent header; blank lines do not close it.
    pub section: Option<Section>,
    /// Non-blank lines classified so far.
    pub content_lines: usize,
}

/// Splits extracted text into physical lines. Only a trailing `\r` is removed.
pub fn raw_lines(text: &str) -> Vec<RawLine> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .enumerate()
        .map(|(index, line)| RawLine {
            text: line.strip_suffix('\r').unwrap_or(line).to_string(),
            index,
        })
        .collect()
}

/// Classifies one line given the state before it, returning the line and the next state.
pub fn step(state: &ClassifyState, text: &str) -> (ClassifiedLine, ClassifyState) {
    let view = LineView::new(text);

    let role = if view.trimmed.is_empty() {
        LineRole::Blank
    } else {
        rules::evaluate(&view, state)
    };

    let section = if role.is_header() {
        view.header
    } else {
        state.section
    };
    let next = ClassifyState {
        position: state.position + 1,
        previous: Some(PreviousLine {
            role,
            indent_level: view.indent_level,
            opens_list: role != LineRole::Blank && patterns::opens_list(view.trimmed),
        }),
        section,
        content_lines: state.content_lines + usize::from(role != LineRole::Blank),
    };

    let line = ClassifiedLine {
        text: text.to_string(),
        role,
        indent_level: view.indent_level,
    };
    (line, next)
}

/// Classifies every line in order. The output always has one entry per input line.
pub fn classify<S: AsRef<str>>(lines: &[S]) -> Vec<ClassifiedLine> {
    lines
        .iter()
        .scan(ClassifyState::default(), |state, line| {
            let (classified, next) = step(state, line.as_ref());
            *state = next;
            Some(classified)
        })
        .collect()
}

pub fn classify_text(text: &str) -> Vec<ClassifiedLine> {
    let lines: Vec<String> = raw_lines(text).into_iter().map(|l| l.text).collect();
    classify(&lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const SAMPLE: &str = "Jane Doe\njane@x.com\n\nEXPERIENCE\n• Led team of 5 engineers\n\nREFERENCES\nJohn Smith, 555-1234";

    fn roles(lines: &[ClassifiedLine]) -> Vec<LineRole> {
        lines.iter().map(|l| l.role).collect()
    }

    #[test]
    fn test_sample_resume_roles() {
        let lines = classify_text(SAMPLE);
        assert_eq!(
            roles(&lines),
            vec![
                LineRole::ContactInfo,
                LineRole::ContactInfo,
                LineRole::Blank,
                LineRole::SectionHeader,
                LineRole::BulletItem,
                LineRole::Blank,
                LineRole::ReferenceHeader,
                LineRole::ReferenceContact,
            ]
        );
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(classify_text("").is_empty());
    }

    #[test]
    fn test_raw_lines_strip_carriage_returns_only() {
        let lines = raw_lines("a\r\n  b \r\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "a");
        assert_eq!(lines[1].text, "  b ");
        assert_eq!(lines[1].index, 1);
        assert_eq!(lines[2].text, "");
    }

    #[test]
    fn test_references_persist_across_blank_lines_until_header() {
        let text = "References:\n• Ann Lee – ann@lee.com\n\n• Bob Ray, 555-9876\nEDUCATION\n• Built a compiler";
        assert_eq!(
            roles(&classify_text(text)),
            vec![
                LineRole::ReferenceHeader,
                LineRole::ReferenceContact,
                LineRole::Blank,
                LineRole::ReferenceContact,
                LineRole::SectionHeader,
                LineRole::BulletItem,
            ]
        );
    }

    #[test]
    fn test_education_block() {
        let text = "EDUCATION\nBachelor of Science, Computer Science\n  State University\nGPA 3.9, Dean's List\nPROJECTS";
        assert_eq!(
            roles(&classify_text(text)),
            vec![
                LineRole::SectionHeader,
                LineRole::EducationDegree,
                LineRole::EducationDetail,
                LineRole::EducationDetail,
                LineRole::SectionHeader,
            ]
        );
    }

    #[test]
    fn test_skills_sub_bullets() {
        let text = "CORE COMPETENCIES\n• Programming Languages:\n• Rust, Go, Python, TypeScript\n  SQL, Bash\n• Led migration to Kubernetes";
        assert_eq!(
            roles(&classify_text(text)),
            vec![
                LineRole::SectionHeader,
                LineRole::BulletItem,
                LineRole::SubBullet,
                LineRole::SubBullet,
                LineRole::BulletItem,
            ]
        );
    }

    #[test]
    fn test_contact_not_detected_after_first_section() {
        let text = "Jane Doe\nSUMMARY\nReach me at jane@x.com";
        let lines = classify_text(text);
        assert_eq!(lines[2].role, LineRole::PlainParagraph);
    }

    #[test]
    fn test_indent_level_recorded() {
        let lines = classify(&["EDUCATION", "MBA, Harvard Business School", "    Class of 2019"]);
        assert_eq!(lines[2].indent_level, 2);
        assert_eq!(lines[2].role, LineRole::EducationDetail);
    }

    #[test]
    fn test_step_replays_single_line() {
        let all = classify_text(SAMPLE);
        let lines: Vec<_> = raw_lines(SAMPLE).into_iter().map(|l| l.text).collect();
        let mut state = ClassifyState::default();
        for (i, text) in lines.iter().enumerate() {
            let (line, next) = step(&state, text);
            assert_eq!(line, all[i]);
            state = next;
        }
    }

    #[test]
    fn test_style_id_round_trip() {
        for role in LineRole::ALL {
            assert_eq!(LineRole::from_style_id(role.style_id()), Some(role));
        }
    }

    proptest! {
        #[test]
        fn classify_is_total(lines in prop::collection::vec(".{0,60}", 0..40)) {
            let classified = classify(&lines);
            prop_assert_eq!(classified.len(), lines.len());
            for (line, source) in classified.iter().zip(&lines) {
                prop_assert_eq!(&line.text, source);
            }
        }

        #[test]
        fn classify_is_deterministic(lines in prop::collection::vec("[ •A-Za-z0-9@.,:-]{0,40}", 0..30)) {
            prop_assert_eq!(classify(&lines), classify(&lines));
        }

        #[test]
        fn blank_lines_are_always_blank(lines in prop::collection::vec("[ \t]{0,4}|[A-Z ,•]{1,20}", 0..30)) {
            for line in classify(&lines) {
                prop_assert_eq!(line.text.trim().is_empty(), line.role == LineRole::Blank);
            }
        }
    }
}
