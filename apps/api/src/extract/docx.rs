//! Minimal WordprocessingML reader: paragraph text and paragraph style ids.

use std::io::{Cursor, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::extract::ExtractionError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocxParagraph {
    /// Value of `w:pStyle`, if the paragraph names one.
    pub style: Option<String>,
    pub text: String,
}

/// Reads one part of the package by name.
pub fn read_part(bytes: &[u8], name: &str) -> Result<Vec<u8>, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Corrupt(format!("not a DOCX archive: {e}")))?;
    let mut file = archive
        .by_name(name)
        .map_err(|e| ExtractionError::Corrupt(format!("missing {name}: {e}")))?;
    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    Ok(content)
}

fn get_attribute(e: &BytesStart, name: &str) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name.as_bytes())
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

pub fn read_paragraphs(bytes: &[u8]) -> Result<Vec<DocxParagraph>, ExtractionError> {
    let xml = read_part(bytes, "word/document.xml")?;
    let xml = String::from_utf8_lossy(&xml);

    let mut reader = Reader::from_str(&xml);
    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current = DocxParagraph::default();
    let mut in_paragraph = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" => {
                    in_paragraph = true;
                    current = DocxParagraph::default();
                }
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(DocxParagraph::default()),
                b"pStyle" if in_paragraph => current.style = get_attribute(e, "val"),
                b"tab" if in_paragraph => current.text.push('\t'),
                b"br" if in_paragraph => current.text.push('\n'),
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"p" => {
                    in_paragraph = false;
                    paragraphs.push(std::mem::take(&mut current));
                }
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|err| ExtractionError::Corrupt(format!("bad XML text: {err}")))?;
                current.text.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractionError::Corrupt(format!("XML parse error: {e}"))),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

/// Paragraph texts joined by newlines.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    Ok(read_paragraphs(bytes)?
        .into_iter()
        .map(|p| p.text)
        .collect::<Vec<_>>()
        .join("\n"))
}
