use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use crate::{
    application::{
        error::ApplicationError, repositories::status_repository::StatusRepository,
        services::SystemStatusCache,
    },
    domain::models::system_status::SystemStatus,
};

pub struct StatusController;

impl StatusController {
    /// Cached status for the footer and contact widgets
    /// GET /api/status
    pub async fn get_status(State(cache): State<SystemStatusCache>) -> Json<SystemStatus> {
        Json(cache.get())
    }

    /// Called by the scheduled refresh job
    /// POST /api/status/refresh
    pub async fn refresh_status(
        State(cache): State<SystemStatusCache>,
        State(status_repository): State<Arc<dyn StatusRepository>>,
    ) -> Result<Json<SystemStatus>, ApplicationError> {
        info!("System status refresh requested");
        let status = cache.refresh(status_repository.as_ref()).await?;
        Ok(Json(status))
    }
}
