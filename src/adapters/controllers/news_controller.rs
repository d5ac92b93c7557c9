use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::info;

use crate::{
    adapters::{dto::news_dto::NewsQuery, state::SiteSettings},
    application::{error::ApplicationError, repositories::news_repository::NewsRepository},
    domain::models::news::NewsItem,
};

pub struct NewsController;

impl NewsController {
    /// GET /api/news?locale=en&limit=10
    pub async fn list_news(
        State(news_repository): State<Arc<dyn NewsRepository>>,
        State(site): State<SiteSettings>,
        query: Result<Query<NewsQuery>, QueryRejection>,
    ) -> Result<Json<Vec<NewsItem>>, ApplicationError> {
        let Query(query) = query?;
        let limit = query.effective_limit();
        let locale = query
            .locale
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| site.default_locale.clone());

        if !site.supported_locales.contains(&locale) {
            return Err(ApplicationError::BadRequest(format!(
                "Unsupported locale '{}'",
                locale
            )));
        }

        info!("Listing news: locale={}, limit={}", locale, limit);
        let items = news_repository.list_news(&locale, limit).await?;
        Ok(Json(items))
    }
}
