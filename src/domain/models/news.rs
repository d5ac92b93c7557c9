use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewsItem {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub locale: String,
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}
