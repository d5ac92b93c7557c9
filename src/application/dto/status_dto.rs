use chrono::{DateTime, Utc};

use crate::domain::models::system_status::SystemStatus;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SystemStatusDTO {
    pub phone_number: Option<String>,
    pub available: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<SystemStatusDTO> for SystemStatus {
    fn from(value: SystemStatusDTO) -> Self {
        SystemStatus {
            phone_number: value.phone_number.unwrap_or_default().trim().to_string(),
            available: value.available.unwrap_or(false),
            updated_at: value.updated_at.unwrap_or_else(Utc::now),
        }
    }
}
