//! Plain-text extraction from uploaded files, keyed on declared content type

use crate::error::{Error, Result};

/// Returned in place of text when a PDF cannot be parsed
pub const PDF_EXTRACTION_FAILED: &str = "Error extracting text from PDF";

/// Returned in place of text when a Word document cannot be parsed
pub const DOCX_EXTRACTION_FAILED: &str = "Error extracting text from DOCX";

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const DOC_MIME: &str = "application/msword";

/// Upload formats the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Paginated PDF
    Pdf,
    /// Word processor document (.docx, legacy .doc label)
    WordProcessor,
    /// Any `text/*` type
    Text,
}

impl ContentKind {
    /// Classify a content-type label. Parameters such as `; charset=utf-8`
    /// and letter case are ignored.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            PDF_MIME => Some(Self::Pdf),
            DOCX_MIME | DOC_MIME => Some(Self::WordProcessor),
            other if other.starts_with("text/") => Some(Self::Text),
            _ => None,
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::WordProcessor => "DOCX",
            Self::Text => "text",
        }
    }

    /// Text stored when extraction for this kind fails. Plain text never
    /// fails and has none.
    pub fn failure_sentinel(&self) -> Option<&'static str> {
        match self {
            Self::Pdf => Some(PDF_EXTRACTION_FAILED),
            Self::WordProcessor => Some(DOCX_EXTRACTION_FAILED),
            Self::Text => None,
        }
    }
}

/// Converts uploaded bytes into a single plain-text string
pub struct TextExtractor;

impl TextExtractor {
    /// Resolve a declared content type, rejecting anything unsupported
    pub fn classify(content_type: &str) -> Result<ContentKind> {
        ContentKind::from_content_type(content_type)
            .ok_or_else(|| Error::UnsupportedFileType(content_type.to_string()))
    }

    /// Extract text from `data` classified as `kind`.
    ///
    /// Never fails: malformed PDF or DOCX input yields the matching sentinel
    /// string instead.
    pub fn extract(data: &[u8], kind: ContentKind) -> String {
        let parsed = match kind {
            ContentKind::Pdf => Self::extract_pdf(data),
            ContentKind::WordProcessor => Self::extract_docx(data),
            ContentKind::Text => Ok(String::from_utf8_lossy(data).into_owned()),
        };

        let text = parsed.unwrap_or_else(|e| {
            tracing::error!("{} extraction error: {}", kind.display_name(), e);
            kind.failure_sentinel().unwrap_or_default().to_string()
        });

        tracing::debug!(
            "Extracted {} chars from {} upload ({} bytes)",
            text.chars().count(),
            kind.display_name(),
            data.len()
        );

        text
    }

    /// Page text in page order, each page followed by a newline
    fn extract_pdf(data: &[u8]) -> Result<String> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::file_parse("PDF", format!("Failed to load PDF: {}", e)))?;

        let mut text = String::new();
        // BTreeMap keyed by page number, so iteration is already in page order
        for page_number in doc.get_pages().keys() {
            let page_text = doc.extract_text(&[*page_number]).map_err(|e| {
                Error::file_parse("PDF", format!("page {}: {}", page_number, e))
            })?;
            text.push_str(&page_text);
            text.push('\n');
        }

        Ok(text)
    }

    /// Paragraph text in document order, each paragraph followed by a newline
    fn extract_docx(data: &[u8]) -> Result<String> {
        let doc = docx_rs::read_docx(data).map_err(|e| Error::file_parse("DOCX", e.to_string()))?;

        let mut text = String::new();
        for child in &doc.document.children {
            // Tables and section properties are not part of the paragraph stream
            if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
                for child in &paragraph.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in &run.children {
                            match child {
                                docx_rs::RunChild::Text(t) => text.push_str(&t.text),
                                docx_rs::RunChild::Tab(_) => text.push('\t'),
                                _ => {}
                            }
                        }
                    }
                }
                text.push('\n');
            }
        }

        Ok(text)
    }
}
