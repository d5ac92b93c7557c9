use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A validated lead ready to be forwarded to the CRM.
#[derive(Debug, Serialize, Clone)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
    pub locale: String,
    pub source: String,
    #[serde(rename = "requestCall")]
    pub request_call: bool,
    #[serde(rename = "submittedAt")]
    pub submitted_at: DateTime<Utc>,
}
