//! Office Open XML (`.docx`) writer.
//!
//! The package holds the minimum parts Word needs: content types, the package and
//! document relationships, a styles part generated from the style table (one
//! paragraph style per role) and the document body, where every paragraph names
//! its role's style through `w:pStyle`.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::classify::{ClassifiedLine, LineRole};
use crate::render::style::{display_text, style_for, Alignment, ParagraphStyle, STYLE_TABLE};
use crate::render::{DocumentFormat, RenderError, RenderOutput, Renderer};

const FONT: &str = "Arial";
const TWIPS_PER_POINT: f32 = 20.0;
/// US Letter in twips.
const PAGE_WIDTH: u32 = 12_240;
const PAGE_HEIGHT: u32 = 15_840;
/// 0.5" top/bottom, 0.75" left/right.
const MARGIN_VERTICAL: u32 = 720;
const MARGIN_HORIZONTAL: u32 = 1_080;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

pub struct DocxRenderer;

impl Renderer for DocxRenderer {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::WordProcessor
    }

    fn render(&self, lines: &[ClassifiedLine]) -> Result<RenderOutput, RenderError> {
        let (document, roles) = document_xml(lines);
        let styles = styles_xml();

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, body) in [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", PACKAGE_RELS),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS),
            ("word/styles.xml", styles.as_str()),
            ("word/document.xml", document.as_str()),
        ] {
            zip.start_file(name, options)?;
            zip.write_all(body.as_bytes())?;
        }
        let bytes = zip.finish()?.into_inner();

        Ok(RenderOutput { bytes, roles })
    }
}

fn twips(points: f32) -> u32 {
    (points * TWIPS_PER_POINT).round() as u32
}

fn half_points(points: f32) -> u32 {
    (points * 2.0).round() as u32
}

fn paragraph_properties(style: &ParagraphStyle) -> String {
    let mut ppr = format!(
        r#"<w:spacing w:before="{}" w:after="{}"/>"#,
        twips(style.space_before_pt),
        twips(style.space_after_pt)
    );
    if style.indent_pt > 0.0 {
        ppr.push_str(&format!(r#"<w:ind w:left="{}"/>"#, twips(style.indent_pt)));
    }
    if style.alignment == Alignment::Center {
        ppr.push_str(r#"<w:jc w:val="center"/>"#);
    }
    if style.role.is_header() {
        ppr.push_str(r#"<w:keepNext/>"#);
    }
    ppr
}

fn run_properties(style: &ParagraphStyle) -> String {
    let bold = if style.bold { "<w:b/><w:bCs/>" } else { "" };
    let size = half_points(style.size_pt);
    format!(r#"{bold}<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#)
}

pub(crate) fn styles_xml() -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{WORD_NS}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{FONT}" w:hAnsi="{FONT}" w:cs="{FONT}" w:eastAsia="{FONT}"/><w:sz w:val="21"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>"#
    );
    for style in STYLE_TABLE.iter() {
        xml.push_str(&format!(
            r#"<w:style w:type="paragraph" w:customStyle="1" w:styleId="{id}"><w:name w:val="{name}"/><w:qFormat/><w:pPr>{ppr}</w:pPr><w:rPr>{rpr}</w:rPr></w:style>"#,
            id = style.role.style_id(),
            name = style.name,
            ppr = paragraph_properties(style),
            rpr = run_properties(style),
        ));
    }
    xml.push_str("</w:styles>");
    xml
}

/// One paragraph and the role of the style it was written with.
fn paragraph_xml(line: &ClassifiedLine) -> (LineRole, String) {
    let style = style_for(line.role);
    let style_id = style.role.style_id();
    let text = display_text(line);
    let xml = if line.role == LineRole::Blank || text.is_empty() {
        format!(r#"<w:p><w:pPr><w:pStyle w:val="{style_id}"/></w:pPr></w:p>"#)
    } else {
        format!(
            r#"<w:p><w:pPr><w:pStyle w:val="{style_id}"/></w:pPr><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            escape(text.as_str())
        )
    };
    (style.role, xml)
}

fn document_xml(lines: &[ClassifiedLine]) -> (String, Vec<LineRole>) {
    let (roles, body): (Vec<LineRole>, String) = lines.iter().map(paragraph_xml).unzip();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{WORD_NS}"><w:body>{body}<w:sectPr><w:pgSz w:w="{PAGE_WIDTH}" w:h="{PAGE_HEIGHT}"/><w:pgMar w:top="{MARGIN_VERTICAL}" w:right="{MARGIN_HORIZONTAL}" w:bottom="{MARGIN_VERTICAL}" w:left="{MARGIN_HORIZONTAL}" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    );
    (xml, roles)
}
