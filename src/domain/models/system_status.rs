use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SystemStatus {
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub available: bool,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl SystemStatus {
    pub fn with_phone_number(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            available: true,
            updated_at: Utc::now(),
        }
    }
}
