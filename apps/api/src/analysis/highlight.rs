//! Per-line highlight tags for the review UI.

use serde::{Deserialize, Serialize};

use crate::analysis::signals::{has_action_verb, has_quantifier, has_weak_phrase, is_quantified};
use crate::analysis::{AnalysisConfig, Category};
use crate::classify::patterns::{has_contact_pattern, has_placeholder};
use crate::classify::{ClassifiedLine, LineRole};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightedLine {
    pub index: usize,
    pub text: String,
    pub role: LineRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Category>,
}

pub fn highlight(classified: &[ClassifiedLine], config: &AnalysisConfig) -> Vec<HighlightedLine> {
    classified
        .iter()
        .enumerate()
        .map(|(index, line)| HighlightedLine {
            index,
            text: line.text.clone(),
            role: line.role,
            highlight: line_highlight(line, config),
        })
        .collect()
}

fn line_highlight(line: &ClassifiedLine, config: &AnalysisConfig) -> Option<Category> {
    let text = line.text.as_str();
    match line.role {
        LineRole::Blank | LineRole::SectionHeader | LineRole::ReferenceHeader => None,
        _ if has_placeholder(text) => Some(Category::Issue),
        LineRole::ContactInfo => has_contact_pattern(text).then_some(Category::Good),
        LineRole::ReferenceContact | LineRole::EducationDegree | LineRole::EducationDetail => {
            None
        }
        LineRole::BulletItem | LineRole::SubBullet | LineRole::PlainParagraph => {
            if is_quantified(text, config) {
                Some(Category::Good)
            } else if has_weak_phrase(text)
                || (line.role == LineRole::BulletItem
                    && !has_action_verb(text)
                    && !has_quantifier(text))
            {
                Some(Category::Warning)
            } else {
                None
            }
        }
    }
}
