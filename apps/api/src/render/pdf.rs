//! Print-ready PDF writer: US Letter, standard Helvetica faces, greedy word wrap
//! against the static width tables and automatic page breaks.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::classify::{ClassifiedLine, LineRole};
use crate::render::font_metrics::Face;
use crate::render::style::{display_text, style_for, Alignment, MarkerPolicy, ParagraphStyle, BULLET};
use crate::render::{DocumentFormat, RenderError, RenderOutput, Renderer};

/// Page geometry in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Baseline-to-baseline distance as a multiple of the font size.
    pub leading: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin: 50.0,
            leading: 1.25,
        }
    }
}

impl PageGeometry {
    fn text_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    fn top(&self) -> f32 {
        self.height - self.margin
    }
}

#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    pub geometry: PageGeometry,
}

impl Renderer for PdfRenderer {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::PrintReady
    }

    fn render(&self, lines: &[ClassifiedLine]) -> Result<RenderOutput, RenderError> {
        let mut layout = PageLayout::new(self.geometry);
        for line in lines {
            layout.place(line);
        }
        let roles = layout.roles.clone();
        let bytes = build_document(self.geometry, layout.finish())?;
        Ok(RenderOutput { bytes, roles })
    }
}

/// Cursor over the pages being filled.
struct PageLayout {
    geometry: PageGeometry,
    pages: Vec<Vec<Operation>>,
    y: f32,
    roles: Vec<LineRole>,
}

impl PageLayout {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Vec::new()],
            y: geometry.top(),
            roles: Vec::new(),
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = self.geometry.top();
    }

    fn place(&mut self, line: &ClassifiedLine) {
        let style = style_for(line.role);
        self.roles.push(style.role);
        let text = display_text(line);
        if line.role == LineRole::Blank || text.is_empty() {
            self.y -= style.size_pt * 0.6;
            return;
        }

        let face = if style.bold { Face::Bold } else { Face::Regular };
        let metrics = face.metrics();
        let hanging = if style.marker == MarkerPolicy::Normalize {
            metrics.measure_str(&format!("{BULLET} ")) * style.size_pt
        } else {
            0.0
        };
        let available = self.geometry.text_width() - style.indent_pt - hanging;
        let wrapped = metrics.wrap(&text, available / style.size_pt);
        let line_height = style.size_pt * self.geometry.leading;

        // keep a header with at least one following line
        let needed = if line.role.is_header() {
            style.space_before_pt + 3.0 * line_height
        } else {
            style.space_before_pt + line_height
        };
        if self.y - needed < self.geometry.margin && !self.page_is_empty() {
            self.new_page();
        } else if !self.page_is_empty() {
            self.y -= style.space_before_pt;
        }

        for (i, visual) in wrapped.iter().enumerate() {
            if self.y - line_height < self.geometry.margin {
                self.new_page();
            }
            self.y -= line_height;
            let offset = if i == 0 { 0.0 } else { hanging };
            let x = self.x_for(style, visual, face, offset);
            self.emit(face, style.size_pt, x, self.y, visual);
        }
        self.y -= style.space_after_pt;
    }

    fn page_is_empty(&self) -> bool {
        self.pages.last().map_or(true, Vec::is_empty)
    }

    fn x_for(&self, style: &ParagraphStyle, text: &str, face: Face, offset: f32) -> f32 {
        let left = self.geometry.margin + style.indent_pt + offset;
        match style.alignment {
            Alignment::Left => left,
            Alignment::Center => {
                let width = face.metrics().measure_str(text) * style.size_pt;
                left + ((self.geometry.text_width() - style.indent_pt - width) / 2.0).max(0.0)
            }
        }
    }

    fn emit(&mut self, face: Face, size: f32, x: f32, y: f32, text: &str) {
        let ops = [
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(face.resource_name().to_vec()), Object::Real(size)],
            ),
            Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ];
        if let Some(page) = self.pages.last_mut() {
            page.extend(ops);
        }
    }

    fn finish(self) -> Vec<Vec<Operation>> {
        self.pages
    }
}

/// Maps text onto WinAnsiEncoding; unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' => c as u8,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '…' => 0x85,
            '€' => 0x80,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

fn font_dictionary(face: Face) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Object::Name(face.base_font().to_vec()),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn build_document(
    geometry: PageGeometry,
    pages: Vec<Vec<Operation>>,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(Face::Regular));
    let bold_id = doc.add_object(font_dictionary(Face::Bold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations }
            .encode()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), geometry.width.into(), geometry.height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(buffer)
}
