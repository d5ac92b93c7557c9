use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct LeadResponse {
    pub id: Uuid,
    pub status: String,
}
