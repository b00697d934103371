//! Document rendering: classified lines → downloadable file.
//!
//! Every format reads paragraph styling from `style::STYLE_TABLE` and records the
//! role of each source line it emits, so traces can be compared across formats.

pub mod docx;
pub mod font_metrics;
pub mod handlers;
pub mod pdf;
pub mod plain;
pub mod style;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::{ClassifiedLine, LineRole};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unsupported format '{0}' (expected txt, docx or pdf)")]
    UnsupportedFormat(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Plain,
    WordProcessor,
    PrintReady,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 3] = [
        DocumentFormat::Plain,
        DocumentFormat::WordProcessor,
        DocumentFormat::PrintReady,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Plain => "txt",
            DocumentFormat::WordProcessor => "docx",
            DocumentFormat::PrintReady => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            DocumentFormat::Plain => "text/plain; charset=utf-8",
            DocumentFormat::WordProcessor => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentFormat::PrintReady => "application/pdf",
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "txt" => Ok(DocumentFormat::Plain),
            "docx" => Ok(DocumentFormat::WordProcessor),
            "pdf" => Ok(DocumentFormat::PrintReady),
            _ => Err(RenderError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One rendered download. Built per request and never cached.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub format: DocumentFormat,
    pub bytes: Vec<u8>,
    pub filename: String,
    /// Role of each source line, in emission order.
    pub roles: Vec<LineRole>,
}

/// Bytes plus the role trace a strategy produced.
#[derive(Debug, Clone, Default)]
pub struct RenderOutput {
    pub bytes: Vec<u8>,
    pub roles: Vec<LineRole>,
}

/// One output format.
pub trait Renderer: Send + Sync {
    fn format(&self) -> DocumentFormat;

    fn render(&self, lines: &[ClassifiedLine]) -> Result<RenderOutput, RenderError>;
}

pub fn renderer_for(format: DocumentFormat) -> Box<dyn Renderer> {
    match format {
        DocumentFormat::Plain => Box::new(plain::PlainRenderer),
        DocumentFormat::WordProcessor => Box::new(docx::DocxRenderer),
        DocumentFormat::PrintReady => Box::new(pdf::PdfRenderer::default()),
    }
}

pub fn render(
    classified: &[ClassifiedLine],
    format: DocumentFormat,
) -> Result<RenderedDocument, RenderError> {
    render_at(classified, format, Utc::now())
}

pub fn render_at(
    classified: &[ClassifiedLine],
    format: DocumentFormat,
    timestamp: DateTime<Utc>,
) -> Result<RenderedDocument, RenderError> {
    let renderer = renderer_for(format);
    let output = renderer.render(classified)?;
    Ok(RenderedDocument {
        format: renderer.format(),
        bytes: output.bytes,
        filename: filename(renderer.format(), timestamp),
        roles: output.roles,
    })
}

/// `resume_<YYYYmmdd_HHMMSS_mmm>.<ext>`
pub fn filename(format: DocumentFormat, timestamp: DateTime<Utc>) -> String {
    format!(
        "resume_{}.{}",
        timestamp.format("%Y%m%d_%H%M%S_%3f"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_text;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
            + chrono::Duration::milliseconds(42)
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("txt".parse::<DocumentFormat>().unwrap(), DocumentFormat::Plain);
        assert_eq!("docx".parse::<DocumentFormat>().unwrap(), DocumentFormat::WordProcessor);
        assert_eq!("pdf".parse::<DocumentFormat>().unwrap(), DocumentFormat::PrintReady);
        assert!(matches!(
            "rtf".parse::<DocumentFormat>(),
            Err(RenderError::UnsupportedFormat(f)) if f == "rtf"
        ));
        for alias in ["DOCX", "word", "text", "plain", " pdf"] {
            assert!(alias.parse::<DocumentFormat>().is_err(), "{alias:?} should be rejected");
        }
    }

    #[test]
    fn test_filename_is_timestamped() {
        assert_eq!(
            filename(DocumentFormat::WordProcessor, fixed_time()),
            "resume_20240309_140507_042.docx"
        );
    }

    /// Styles actually written into the docx body, read back from the package.
    fn docx_style_trace(bytes: &[u8]) -> Vec<Option<LineRole>> {
        crate::extract::docx::read_paragraphs(bytes)
            .unwrap()
            .iter()
            .map(|p| p.style.as_deref().and_then(LineRole::from_style_id))
            .collect()
    }

    #[test]
    fn test_role_traces_agree_across_formats() {
        let text = "Jane Doe\njane@x.com\n\nEXPERIENCE\n• Led team of 5 engineers\n\nSKILLS\n• Programming Languages:\n• Rust, Go, Python\n\nREFERENCES\nJohn Smith, 555-1234";
        let classified = classify_text(text);
        let plain = render_at(&classified, DocumentFormat::Plain, fixed_time()).unwrap();
        let docx = render_at(&classified, DocumentFormat::WordProcessor, fixed_time()).unwrap();
        let pdf = render_at(&classified, DocumentFormat::PrintReady, fixed_time()).unwrap();

        let written: Vec<Option<LineRole>> = docx_style_trace(&docx.bytes);
        let expected: Vec<Option<LineRole>> = pdf.roles.iter().copied().map(Some).collect();
        assert_eq!(written, expected);
        assert_eq!(plain.roles, pdf.roles);
        assert_eq!(docx.roles, pdf.roles);
        assert!(pdf.roles.contains(&LineRole::SubBullet));

        for doc in [&plain, &docx, &pdf] {
            assert!(!doc.bytes.is_empty());
            assert!(doc.filename.ends_with(doc.format.extension()));
        }
    }

    #[test]
    fn test_every_renderer_reports_its_format() {
        for format in DocumentFormat::ALL {
            assert_eq!(renderer_for(format).format(), format);
        }
    }

    #[test]
    fn test_empty_document_renders() {
        for format in DocumentFormat::ALL {
            let doc = render(&[], format).unwrap();
            assert!(doc.roles.is_empty());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn role_traces_agree_with_written_docx(lines in prop::collection::vec("[ •A-Za-z0-9@.,:%-]{0,80}", 0..30)) {
            let classified = crate::classify::classify(&lines);
            let docx = render_at(&classified, DocumentFormat::WordProcessor, fixed_time()).unwrap();
            let written = docx_style_trace(&docx.bytes);
            prop_assert_eq!(written.len(), classified.len());
            for format in [DocumentFormat::Plain, DocumentFormat::PrintReady] {
                let doc = render_at(&classified, format, fixed_time()).unwrap();
                let trace: Vec<Option<LineRole>> = doc.roles.iter().copied().map(Some).collect();
                prop_assert_eq!(&trace, &written);
            }
        }
    }
}
