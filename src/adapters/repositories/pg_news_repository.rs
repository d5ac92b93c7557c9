use async_trait::async_trait;
use sqlx::query_as;
use tracing::debug;

use crate::{
    application::{
        dto::news_dto::NewsRowDTO, error::ApplicationError,
        repositories::news_repository::NewsRepository,
    },
    domain::models::news::NewsItem,
};

pub struct PgNewsRepository {
    pool: sqlx::PgPool,
}

impl PgNewsRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsRepository for PgNewsRepository {
    async fn list_news(&self, locale: &str, limit: u32) -> Result<Vec<NewsItem>, ApplicationError> {
        debug!("Fetching up to {} news items for locale {}", limit, locale);
        let query = r#"
            SELECT id, slug, title, summary, locale, published_at, image_url
            FROM content.news
            WHERE locale = $1 AND published_at <= now()
            ORDER BY published_at DESC
            LIMIT $2
        "#;

        let rows: Vec<NewsRowDTO> = query_as::<_, NewsRowDTO>(query)
            .bind(locale)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
