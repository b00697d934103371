//! Ordered rule table for line classification.
//!
//! Rules are evaluated top to bottom and the first match wins. Blank lines never
//! reach the table. A line no rule claims becomes `PlainParagraph`.

use crate::classify::patterns::{self, Section};
use crate::classify::{ClassifyState, LineRole};

/// Contact blocks are only recognised this close to the top of the document.
pub const CONTACT_WINDOW: usize = 6;

/// Per-line facts computed once and shared by every rule.
#[derive(Debug, Clone)]
pub struct LineView<'a> {
    pub trimmed: &'a str,
    pub indent_level: usize,
    pub header: Option<Section>,
    pub bulleted: bool,
}

impl<'a> LineView<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            trimmed: text.trim(),
            indent_level: patterns::indent_level(text),
            header: patterns::header_section(text),
            bulleted: patterns::has_bullet(text),
        }
    }
}

/// One `(predicate, role)` pair of the table.
pub struct Rule {
    pub name: &'static str,
    pub role: LineRole,
    pub applies: fn(&LineView<'_>, &ClassifyState) -> bool,
}

pub static RULES: &[Rule] = &[
    Rule {
        name: "reference_override",
        role: LineRole::ReferenceContact,
        applies: reference_override,
    },
    Rule {
        name: "reference_header",
        role: LineRole::ReferenceHeader,
        applies: reference_header,
    },
    Rule {
        name: "section_header",
        role: LineRole::SectionHeader,
        applies: section_header,
    },
    Rule {
        name: "education_degree",
        role: LineRole::EducationDegree,
        applies: education_degree,
    },
    Rule {
        name: "education_detail",
        role: LineRole::EducationDetail,
        applies: education_detail,
    },
    Rule {
        name: "sub_bullet",
        role: LineRole::SubBullet,
        applies: sub_bullet,
    },
    Rule {
        name: "bullet",
        role: LineRole::BulletItem,
        applies: bullet,
    },
    Rule {
        name: "contact",
        role: LineRole::ContactInfo,
        applies: contact,
    },
];

/// Runs the table against one non-blank line.
pub fn evaluate(view: &LineView<'_>, state: &ClassifyState) -> LineRole {
    RULES
        .iter()
        .find(|rule| (rule.applies)(view, state))
        .map(|rule| rule.role)
        .unwrap_or(LineRole::PlainParagraph)
}

fn reference_override(view: &LineView<'_>, state: &ClassifyState) -> bool {
    state.section == Some(Section::References) && view.header.is_none()
}

fn reference_header(view: &LineView<'_>, _state: &ClassifyState) -> bool {
    view.header == Some(Section::References)
}

fn section_header(view: &LineView<'_>, _state: &ClassifyState) -> bool {
    view.header.is_some()
}

fn education_degree(view: &LineView<'_>, _state: &ClassifyState) -> bool {
    patterns::is_degree(view.trimmed)
}

fn education_detail(view: &LineView<'_>, state: &ClassifyState) -> bool {
    let Some(previous) = state.previous else {
        return false;
    };
    matches!(
        previous.role,
        LineRole::EducationDegree | LineRole::EducationDetail
    ) && (view.indent_level > 0 || patterns::has_education_detail(view.trimmed))
}

fn sub_bullet(view: &LineView<'_>, state: &ClassifyState) -> bool {
    let Some(previous) = state.previous else {
        return false;
    };
    if !(view.bulleted || view.indent_level > 0) || !patterns::is_term_list(view.trimmed) {
        return false;
    }
    match previous.role {
        LineRole::SubBullet => true,
        LineRole::BulletItem if previous.indent_level == 0 => {
            previous.opens_list
                || state.section == Some(Section::Skills)
                || view.indent_level > previous.indent_level
        }
        _ => false,
    }
}

fn bullet(view: &LineView<'_>, _state: &ClassifyState) -> bool {
    view.bulleted
}

fn contact(view: &LineView<'_>, state: &ClassifyState) -> bool {
    if state.position >= CONTACT_WINDOW || state.section.is_some() {
        return false;
    }
    patterns::has_contact_pattern(view.trimmed)
        || (state.content_lines == 0 && patterns::looks_like_name(view.trimmed))
}
