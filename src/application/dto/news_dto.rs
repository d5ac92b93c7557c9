use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::models::news::NewsItem;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NewsRowDTO {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub summary: Option<String>,
    pub locale: String,
    pub published_at: DateTime<Utc>,
    pub image_url: Option<String>,
}

impl From<NewsRowDTO> for NewsItem {
    fn from(value: NewsRowDTO) -> Self {
        NewsItem {
            id: value.id,
            slug: value.slug,
            title: value.title,
            summary: value.summary.unwrap_or_default(),
            locale: value.locale,
            published_at: value.published_at,
            image_url: value.image_url.filter(|url| !url.trim().is_empty()),
        }
    }
}
