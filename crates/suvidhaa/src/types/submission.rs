//! Citizen submissions: questions, suggestions and grievances

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Evidence files attached to a submission.
///
/// `base64` has one entry per attached file; `urls` only for files the
/// object store accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(rename = "evidence_urls", default)]
    pub urls: Vec<String>,
    #[serde(rename = "evidence_base64", default)]
    pub base64: Vec<String>,
}

impl Evidence {
    /// Number of attached files
    pub fn len(&self) -> usize {
        self.base64.len()
    }

    /// Whether nothing was attached
    pub fn is_empty(&self) -> bool {
        self.base64.is_empty()
    }
}

/// Question lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    #[default]
    Submitted,
    Routed,
    Answered,
}

impl QuestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Routed => "routed",
            Self::Answered => "answered",
        }
    }
}

/// Question fields supplied by the citizen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionCreate {
    pub user_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub question_text: String,
    pub category: String,
    /// Loose reference; not checked against stored documents
    #[serde(default)]
    pub related_document_id: Option<String>,
    pub government_office: String,
}

/// A question addressed to a government office
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub question_text: String,
    pub category: String,
    pub related_document_id: Option<String>,
    #[serde(flatten)]
    pub evidence: Evidence,
    pub government_office: String,
    pub status: QuestionStatus,
    pub created_at: DateTime<Utc>,
    pub response_text: Option<String>,
    pub response_at: Option<DateTime<Utc>>,
}

impl Question {
    pub fn new(input: QuestionCreate, evidence: Evidence) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name: input.user_name,
            email: input.email,
            phone: input.phone,
            question_text: input.question_text,
            category: input.category,
            related_document_id: input.related_document_id,
            evidence,
            government_office: input.government_office,
            status: QuestionStatus::default(),
            created_at: Utc::now(),
            response_text: None,
            response_at: None,
        }
    }
}

/// Suggestion lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    #[default]
    Public,
    Reviewed,
    Implemented,
}

impl SuggestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Reviewed => "reviewed",
            Self::Implemented => "implemented",
        }
    }
}

/// Another citizen's endorsement of a suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoSignature {
    pub name: String,
    pub email: String,
    /// RFC 3339 timestamp
    pub signed_at: String,
}

impl CoSignature {
    pub fn new(name: String, email: String) -> Self {
        Self {
            name,
            email,
            signed_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Suggestion fields supplied by the citizen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionCreate {
    pub user_name: String,
    pub email: String,
    pub suggestion_text: String,
    pub category: String,
    #[serde(default)]
    pub related_document_id: Option<String>,
}

/// A public policy suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub suggestion_text: String,
    pub category: String,
    pub related_document_id: Option<String>,
    #[serde(default)]
    pub co_signatures: Vec<CoSignature>,
    pub status: SuggestionStatus,
    pub created_at: DateTime<Utc>,
    pub sentiment_summary: Option<String>,
}

impl Suggestion {
    pub fn new(input: SuggestionCreate) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name: input.user_name,
            email: input.email,
            suggestion_text: input.suggestion_text,
            category: input.category,
            related_document_id: input.related_document_id,
            co_signatures: Vec::new(),
            status: SuggestionStatus::default(),
            created_at: Utc::now(),
            sentiment_summary: None,
        }
    }
}

/// Grievance lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrievanceStatus {
    #[default]
    Filed,
    UnderReview,
    Resolved,
}

impl GrievanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filed => "filed",
            Self::UnderReview => "under_review",
            Self::Resolved => "resolved",
        }
    }
}

/// Grievance fields supplied by the citizen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrievanceCreate {
    pub user_name: String,
    pub email: String,
    pub phone: String,
    pub grievance_text: String,
    pub category: String,
    pub affected_area: String,
    pub government_office: String,
}

/// A formal complaint against a government office
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grievance {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub phone: String,
    pub grievance_text: String,
    pub category: String,
    #[serde(flatten)]
    pub evidence: Evidence,
    #[serde(default)]
    pub legal_references: Vec<String>,
    pub affected_area: String,
    pub government_office: String,
    pub status: GrievanceStatus,
    pub created_at: DateTime<Utc>,
    pub resolution_text: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Grievance {
    pub fn new(input: GrievanceCreate, evidence: Evidence) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name: input.user_name,
            email: input.email,
            phone: input.phone,
            grievance_text: input.grievance_text,
            category: input.category,
            evidence,
            legal_references: Vec::new(),
            affected_area: input.affected_area,
            government_office: input.government_office,
            status: GrievanceStatus::default(),
            created_at: Utc::now(),
            resolution_text: None,
            resolved_at: None,
        }
    }
}
