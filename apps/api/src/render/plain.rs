use crate::classify::ClassifiedLine;
use crate::render::style::{display_text, style_for};
use crate::render::{DocumentFormat, RenderError, RenderOutput, Renderer};

/// UTF-8 text: role-appropriate indentation and a blank line ahead of each header.
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Plain
    }

    fn render(&self, lines: &[ClassifiedLine]) -> Result<RenderOutput, RenderError> {
        let mut out: Vec<String> = Vec::with_capacity(lines.len());
        let mut roles = Vec::with_capacity(lines.len());

        for line in lines {
            let style = style_for(line.role);
            if line.role.is_header() && out.last().is_some_and(|prev| !prev.is_empty()) {
                out.push(String::new());
            }
            let text = display_text(line);
            out.push(if text.is_empty() {
                String::new()
            } else {
                format!("{}{text}", " ".repeat(style.plain_indent))
            });
            roles.push(style.role);
        }

        let mut body = out.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }
        Ok(RenderOutput {
            bytes: body.into_bytes(),
            roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_text;
    use pretty_assertions::assert_eq;

    fn render_str(text: &str) -> String {
        let output = PlainRenderer.render(&classify_text(text)).unwrap();
        String::from_utf8(output.bytes).unwrap()
    }

    #[test]
    fn test_blank_line_inserted_before_headers() {
        assert_eq!(
            render_str("Jane Doe\nEXPERIENCE\n- Led team of 5"),
            "Jane Doe\n\nEXPERIENCE\n• Led team of 5\n"
        );
    }

    #[test]
    fn test_existing_blank_not_doubled() {
        assert_eq!(
            render_str("Jane Doe\n\nEXPERIENCE"),
            "Jane Doe\n\nEXPERIENCE\n"
        );
    }

    #[test]
    fn test_sub_bullets_indented_without_glyph() {
        let text = "SKILLS\n• Languages & tools:\n• Rust, Go, Python";
        assert_eq!(
            render_str(text),
            "SKILLS\n• Languages & tools:\n    Rust, Go, Python\n"
        );
    }

    #[test]
    fn test_reference_contact_glyph_free() {
        let out = render_str("REFERENCES\n• John Smith, 555-1234");
        assert_eq!(out, "REFERENCES\nJohn Smith, 555-1234\n");
    }
}
