//! The single role → paragraph style table every renderer reads from.

use crate::classify::patterns::strip_bullet;
use crate::classify::{ClassifiedLine, LineRole};

/// Normalised glyph for top-level bullets in every output format.
pub const BULLET: char = '•';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

/// What happens to a leading bullet glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPolicy {
    /// Any glyph becomes `•`.
    Normalize,
    /// Glyphs are removed; indentation alone carries the nesting.
    Strip,
    /// Text is emitted as written (trimmed).
    Preserve,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub role: LineRole,
    /// Human-readable style name, shown by word processors.
    pub name: &'static str,
    pub bold: bool,
    pub size_pt: f32,
    pub indent_pt: f32,
    /// Leading spaces in plain-text output.
    pub plain_indent: usize,
    pub space_before_pt: f32,
    pub space_after_pt: f32,
    pub alignment: Alignment,
    pub marker: MarkerPolicy,
}

const fn style(
    role: LineRole,
    name: &'static str,
    bold: bool,
    size_pt: f32,
    indent_pt: f32,
    plain_indent: usize,
    spacing: (f32, f32),
    alignment: Alignment,
    marker: MarkerPolicy,
) -> ParagraphStyle {
    ParagraphStyle {
        role,
        name,
        bold,
        size_pt,
        indent_pt,
        plain_indent,
        space_before_pt: spacing.0,
        space_after_pt: spacing.1,
        alignment,
        marker,
    }
}

#[rustfmt::skip]
pub static STYLE_TABLE: [ParagraphStyle; 10] = [
    style(LineRole::ContactInfo,      "Contact Info",      false, 10.0,  0.0, 0, (0.0, 2.0),  Alignment::Center, MarkerPolicy::Preserve),
    style(LineRole::SectionHeader,    "Section Header",    true,  12.0,  0.0, 0, (10.0, 4.0), Alignment::Left,   MarkerPolicy::Strip),
    style(LineRole::BulletItem,       "Bullet Item",       false, 10.5, 14.0, 0, (0.0, 2.0),  Alignment::Left,   MarkerPolicy::Normalize),
    style(LineRole::SubBullet,        "Sub Bullet",        false, 10.0, 32.0, 4, (0.0, 1.0),  Alignment::Left,   MarkerPolicy::Strip),
    style(LineRole::EducationDegree,  "Education Degree",  true,  10.5,  0.0, 0, (4.0, 1.0),  Alignment::Left,   MarkerPolicy::Strip),
    style(LineRole::EducationDetail,  "Education Detail",  false, 10.0, 14.0, 2, (0.0, 1.0),  Alignment::Left,   MarkerPolicy::Strip),
    style(LineRole::ReferenceHeader,  "Reference Header",  true,  12.0,  0.0, 0, (10.0, 4.0), Alignment::Left,   MarkerPolicy::Strip),
    style(LineRole::ReferenceContact, "Reference Contact", false, 10.0,  0.0, 0, (0.0, 2.0),  Alignment::Left,   MarkerPolicy::Strip),
    style(LineRole::PlainParagraph,   "Plain Paragraph",   false, 10.5,  0.0, 0, (0.0, 4.0),  Alignment::Left,   MarkerPolicy::Preserve),
    style(LineRole::Blank,            "Blank",             false, 10.0,  0.0, 0, (0.0, 0.0),  Alignment::Left,   MarkerPolicy::Preserve),
];

pub fn style_for(role: LineRole) -> &'static ParagraphStyle {
    let index = match role {
        LineRole::ContactInfo => 0,
        LineRole::SectionHeader => 1,
        LineRole::BulletItem => 2,
        LineRole::SubBullet => 3,
        LineRole::EducationDegree => 4,
        LineRole::EducationDetail => 5,
        LineRole::ReferenceHeader => 6,
        LineRole::ReferenceContact => 7,
        LineRole::PlainParagraph => 8,
        LineRole::Blank => 9,
    };
    &STYLE_TABLE[index]
}

/// Text a renderer emits for a line once the marker policy is applied.
/// Indentation is dropped; renderers express it through the style.
pub fn display_text(line: &ClassifiedLine) -> String {
    let content = strip_bullet(&line.text).trim_end();
    match style_for(line.role).marker {
        MarkerPolicy::Normalize => format!("{BULLET} {content}"),
        MarkerPolicy::Strip => content.to_string(),
        MarkerPolicy::Preserve => line.text.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, role: LineRole) -> ClassifiedLine {
        ClassifiedLine {
            text: text.to_string(),
            role,
            indent_level: 0,
        }
    }

    #[test]
    fn test_table_covers_every_role_in_order() {
        for role in LineRole::ALL {
            assert_eq!(style_for(role).role, role);
        }
    }

    #[test]
    fn test_headers_are_bold() {
        assert!(style_for(LineRole::SectionHeader).bold);
        assert!(style_for(LineRole::ReferenceHeader).bold);
        assert!(!style_for(LineRole::BulletItem).bold);
    }

    #[test]
    fn test_bullet_glyphs_normalised() {
        assert_eq!(display_text(&line("  ▪ Led team", LineRole::BulletItem)), "• Led team");
        assert_eq!(display_text(&line("- Built API", LineRole::BulletItem)), "• Built API");
    }

    #[test]
    fn test_stripped_roles_lose_glyph() {
        assert_eq!(display_text(&line("• Rust, Go", LineRole::SubBullet)), "Rust, Go");
        assert_eq!(
            display_text(&line("• Ann Lee – ann@lee.com", LineRole::ReferenceContact)),
            "Ann Lee – ann@lee.com"
        );
        assert_eq!(display_text(&line("• EXPERIENCE", LineRole::SectionHeader)), "EXPERIENCE");
    }

    #[test]
    fn test_preserved_roles_trimmed_only() {
        assert_eq!(
            display_text(&line("  Jane Doe  ", LineRole::ContactInfo)),
            "Jane Doe"
        );
    }
}
