//! Upload validation and binary → text extraction.
//!
//! Extraction is CPU-bound and runs on the blocking pool. PDF uploads are spooled
//! to a `NamedTempFile`, which is removed when it drops on every exit path.

pub mod docx;

use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Uploaded file is empty")]
    Empty,

    #[error("File is {size} bytes; the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    #[error("Unsupported file type '{0}' (expected pdf, docx or txt)")]
    UnsupportedExtension(String),

    #[error("Unsafe filename '{0}'")]
    UnsafeFilename(String),

    #[error("Could not read document: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extraction task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Docx,
    Txt,
}

impl SourceKind {
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "pdf" => Ok(SourceKind::Pdf),
            "docx" => Ok(SourceKind::Docx),
            "txt" => Ok(SourceKind::Txt),
            other => Err(ExtractionError::UnsupportedExtension(other.to_string())),
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            SourceKind::Pdf => ".pdf",
            SourceKind::Docx => ".docx",
            SourceKind::Txt => ".txt",
        }
    }
}

/// One uploaded file, held in memory for the request only.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Bytes,
}

/// Checks name, size and type before any bytes are parsed.
pub fn validate_upload(upload: &Upload, max_bytes: usize) -> Result<SourceKind, ExtractionError> {
    let name = upload.filename.trim();
    if name.is_empty() || name.contains("..") || name.contains(['/', '\\', '\0']) {
        return Err(ExtractionError::UnsafeFilename(upload.filename.clone()));
    }
    if upload.bytes.is_empty() {
        return Err(ExtractionError::Empty);
    }
    if upload.bytes.len() > max_bytes {
        return Err(ExtractionError::TooLarge {
            size: upload.bytes.len(),
            limit: max_bytes,
        });
    }
    SourceKind::from_filename(name)
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, upload: Upload) -> Result<String, ExtractionError>;
}

/// Default extractor: pdf-extract for PDF, the package reader for DOCX, and
/// UTF-8 with a Latin-1 fallback for plain text.
#[derive(Debug, Clone)]
pub struct FileTextExtractor {
    pub max_bytes: usize,
}

impl FileTextExtractor {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

#[async_trait]
impl TextExtractor for FileTextExtractor {
    async fn extract(&self, upload: Upload) -> Result<String, ExtractionError> {
        let kind = validate_upload(&upload, self.max_bytes)?;
        debug!(
            "Extracting {} ({} bytes) as {:?}",
            upload.filename,
            upload.bytes.len(),
            kind
        );
        tokio::task::spawn_blocking(move || extract_sync(kind, &upload.bytes))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))?
    }
}

pub fn extract_sync(kind: SourceKind, bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = match kind {
        SourceKind::Pdf => {
            let mut file = tempfile::Builder::new().suffix(kind.suffix()).tempfile()?;
            file.write_all(bytes)?;
            file.flush()?;
            extract_pdf(&file)?
        }
        SourceKind::Docx => docx::extract_text(bytes)?,
        SourceKind::Txt => decode_text(bytes),
    };
    Ok(normalize_newlines(&text))
}

fn extract_pdf(file: &NamedTempFile) -> Result<String, ExtractionError> {
    pdf_extract::extract_text(file.path()).map_err(|e| ExtractionError::Corrupt(e.to_string()))
}

/// UTF-8 (BOM stripped), falling back to Latin-1 byte-for-char decoding.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// `\r\n` and lone `\r` become `\n`; form feeds from PDF page breaks too.
fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace(['\r', '\u{c}'], "\n")
}
