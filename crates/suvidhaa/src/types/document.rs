//! Government document record with AI-derived fields

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Original file bytes as persisted with a record.
///
/// The base-64 copy is always present; the remote URL only when the object
/// store accepted the upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBlob {
    /// Standard base-64 of the raw bytes
    #[serde(rename = "file_base64")]
    pub base64: String,
    /// Public URL returned by the object store
    #[serde(rename = "file_url", default)]
    pub url: Option<String>,
}

impl StoredBlob {
    /// Blob with only the inline encoding
    pub fn inline(base64: String) -> Self {
        Self { base64, url: None }
    }

    /// Whether a remote copy exists
    pub fn is_remote(&self) -> bool {
        self.url.is_some()
    }
}

/// The six fields produced by document analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Short narrative summary
    pub summary_english: String,
    /// Plain-language explanation
    pub plain_language: String,
    /// Main points, in order
    pub key_points: Vec<String>,
    /// Who the document affects
    pub affected_groups: Vec<String>,
    /// Dates mentioned
    pub key_dates: Vec<String>,
    /// Offices responsible for the matter
    pub responsible_offices: Vec<String>,
}

/// A processed government document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier
    pub id: Uuid,
    /// Title supplied by the uploader
    pub title: String,
    /// Free-form category tag (notice, budget, policy, ...)
    pub document_type: String,
    /// Full extracted text (never truncated)
    pub original_content: String,
    /// Translated summary, when available
    #[serde(default)]
    pub summary_nepali: Option<String>,
    /// AI-derived fields
    #[serde(flatten)]
    pub analysis: DocumentAnalysis,
    /// Original file
    #[serde(flatten)]
    pub file: StoredBlob,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When processing finished
    pub processed_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Assemble a new document record. Processing is synchronous, so both
    /// timestamps are set here.
    pub fn new(
        title: String,
        document_type: String,
        original_content: String,
        analysis: DocumentAnalysis,
        file: StoredBlob,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            document_type,
            original_content,
            summary_nepali: None,
            analysis,
            file,
            created_at: now,
            processed_at: Some(now),
        }
    }
}
