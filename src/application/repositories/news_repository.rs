use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::models::news::NewsItem};

#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Newest first, at most `limit` items in `locale`.
    async fn list_news(&self, locale: &str, limit: u32) -> Result<Vec<NewsItem>, ApplicationError>;
}
