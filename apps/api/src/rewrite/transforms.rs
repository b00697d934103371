//! Line-local text transforms. Each one is idempotent on its own output.

use crate::analysis::signals::{has_action_verb, has_quantifier};
use crate::classify::patterns::{is_bullet_glyph, strip_bullet};

/// Appended to bullets that state neither an action nor a measurable result.
pub const METRIC_PLACEHOLDER: &str = "[Add metric: %, $, #, or timeframe]";

/// Sub-bullet lists wrap to lines of at most this many characters (prefix excluded).
pub const WRAP_WIDTH: usize = 60;

/// Splits a line into its indent-plus-marker prefix and its content.
fn split_prefix(text: &str) -> (&str, &str) {
    let stripped = strip_bullet(text);
    let prefix = &text[..text.len() - stripped.len()];
    (prefix, stripped.trim_end())
}

/// Drops bullet glyphs in front of the content, keeping the indentation.
pub fn strip_glyphs(text: &str) -> String {
    let indent = &text[..text.len() - text.trim_start().len()];
    format!("{indent}{}", strip_bullet(text).trim_end())
}

pub fn needs_metric(text: &str) -> bool {
    !text.contains(METRIC_PLACEHOLDER) && !has_action_verb(text) && !has_quantifier(text)
}

pub fn append_metric_placeholder(text: &str) -> String {
    if needs_metric(text) {
        format!("{} {METRIC_PLACEHOLDER}", text.trim_end())
    } else {
        text.to_string()
    }
}

/// Greedy comma-boundary wrap. Every chunk but the last keeps a trailing comma;
/// a single term wider than `width` stays whole.
pub fn wrap_list(text: &str, width: usize) -> Vec<String> {
    let (prefix, content) = split_prefix(text);
    if content.chars().count() <= width {
        return vec![text.to_string()];
    }

    let trailing_comma = content.ends_with(',');
    let terms: Vec<&str> = content
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if terms.len() < 2 {
        return vec![text.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    for term in terms {
        if current.is_empty() {
            current.push_str(term);
            continue;
        }
        // +2 for ", " and +1 for the comma this chunk would carry if closed later
        if current.chars().count() + 2 + term.chars().count() + 1 > width {
            chunks.push(std::mem::take(&mut current));
            current.push_str(term);
        } else {
            current.push_str(", ");
            current.push_str(term);
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    let last = chunks.len().saturating_sub(1);
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let comma = if i < last || trailing_comma { "," } else { "" };
            format!("{prefix}{chunk}{comma}")
        })
        .collect()
}

fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F300..=0x1FAFF | 0x1F1E6..=0x1F1FF | 0x2600..=0x26FF | 0xFE0F | 0x200D
    ) || (matches!(c as u32, 0x2700..=0x27BF) && !is_bullet_glyph(c))
}

/// Removes pictographs and the joiners that glue them together.
pub fn strip_emoji(text: &str) -> String {
    if !text.chars().any(is_emoji) {
        return text.to_string();
    }
    let indent = &text[..text.len() - text.trim_start().len()];
    let cleaned: String = text.chars().filter(|c| !is_emoji(*c)).collect();
    let body = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{indent}{body}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_glyphs_keeps_indent() {
        assert_eq!(strip_glyphs("• EXPERIENCE"), "EXPERIENCE");
        assert_eq!(strip_glyphs("  ▪ Bachelor of Arts"), "  Bachelor of Arts");
        assert_eq!(strip_glyphs("EDUCATION"), "EDUCATION");
    }

    #[test]
    fn test_metric_placeholder_appended_once() {
        let once = append_metric_placeholder("• Documentation and support");
        assert_eq!(once, format!("• Documentation and support {METRIC_PLACEHOLDER}"));
        assert_eq!(append_metric_placeholder(&once), once);
    }

    #[test]
    fn test_metric_placeholder_skips_strong_bullets() {
        assert_eq!(append_metric_placeholder("• Led the team"), "• Led the team");
        assert_eq!(append_metric_placeholder("• 12 releases"), "• 12 releases");
    }

    #[test]
    fn test_wrap_list_splits_on_commas() {
        let line = "  Python, TypeScript, Rust, Go, Kotlin, Swift, PostgreSQL, Redis, Kafka";
        let wrapped = wrap_list(line, WRAP_WIDTH);
        assert_eq!(
            wrapped,
            vec![
                "  Python, TypeScript, Rust, Go, Kotlin, Swift, PostgreSQL,".to_string(),
                "  Redis, Kafka".to_string(),
            ]
        );
        for chunk in &wrapped {
            assert!(chunk.trim().chars().count() <= WRAP_WIDTH);
        }
    }

    #[test]
    fn test_wrap_list_is_idempotent() {
        let line = "• AWS, GCP, Azure, Terraform, Ansible, Kubernetes, Helm, Docker, Prometheus";
        let once = wrap_list(line, WRAP_WIDTH);
        let twice: Vec<String> = once.iter().flat_map(|l| wrap_list(l, WRAP_WIDTH)).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_short_list_untouched() {
        assert_eq!(wrap_list("  SQL, Bash", WRAP_WIDTH), vec!["  SQL, Bash".to_string()]);
    }

    #[test]
    fn test_strip_emoji_preserves_bullets() {
        assert_eq!(strip_emoji("🚀 Launched search ✨"), "Launched search");
        assert_eq!(strip_emoji("✓ Certified"), "✓ Certified");
        assert_eq!(strip_emoji("  plain"), "  plain");
    }
}
