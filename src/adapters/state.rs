use std::sync::Arc;

use axum::extract::FromRef;

use crate::application::{
    repositories::{news_repository::NewsRepository, status_repository::StatusRepository},
    services::{CrmClient, SystemStatusCache, TokenService},
};

/// Locale settings shared by the handlers that accept a locale.
#[derive(Clone, Debug)]
pub struct SiteSettings {
    pub supported_locales: Arc<Vec<String>>,
    pub default_locale: String,
}

impl SiteSettings {
    pub fn new(supported_locales: Vec<String>, default_locale: impl Into<String>) -> Self {
        Self {
            supported_locales: Arc::new(supported_locales),
            default_locale: default_locale.into(),
        }
    }
}

/// Shared secret presented by the scheduled status-refresh job.
#[derive(Clone, Debug)]
pub struct CronSecret(pub Arc<str>);

#[derive(Clone, FromRef)]
pub struct AppState {
    pub token_service: TokenService,
    pub status_cache: SystemStatusCache,
    pub status_repository: Arc<dyn StatusRepository>,
    pub news_repository: Arc<dyn NewsRepository>,
    pub crm_client: Arc<dyn CrmClient>,
    pub site: SiteSettings,
    pub cron_secret: CronSecret,
}
