use crate::models::answer::Answer;
use crate::models::result::AssessmentResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactInfo {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Funnel record created mid-assessment, before completion.
    Partial,
    /// Completed assessment with contact info, ready for the clinic dashboard.
    New,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub session_id: Uuid,
    pub quiz_id: String,
    pub contact: Option<ContactInfo>,
    pub result: Option<AssessmentResult>,
    pub status: LeadStatus,
    pub answers: Vec<Answer>,
    pub created_at: DateTime<Utc>,
}
