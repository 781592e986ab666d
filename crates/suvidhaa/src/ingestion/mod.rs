//! Document intake with multi-format text extraction

mod blob;
mod extractor;
mod pipeline;

pub use blob::{
    collect_evidence, store_with_fallback, DOCUMENT_PREFIX, GRIEVANCE_EVIDENCE_PREFIX,
    QUESTION_EVIDENCE_PREFIX,
};
pub use extractor::{ContentKind, TextExtractor, DOCX_EXTRACTION_FAILED, PDF_EXTRACTION_FAILED};
pub use pipeline::{DocumentUpload, IntakePipeline};
