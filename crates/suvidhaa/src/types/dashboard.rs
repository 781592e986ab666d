//! Aggregate views over stored records

use serde::{Deserialize, Serialize};

use super::submission::{Grievance, Question, Suggestion};

/// Dashboard counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_documents: u64,
    pub documents_this_month: u64,
    pub total_questions: u64,
    pub answered_questions: u64,
    pub total_suggestions: u64,
    pub total_grievances: u64,
    pub resolved_grievances: u64,
}

/// Everything one citizen has submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSubmissions {
    pub questions: Vec<Question>,
    pub suggestions: Vec<Suggestion>,
    pub grievances: Vec<Grievance>,
}
