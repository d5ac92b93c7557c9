use async_trait::async_trait;
use sqlx::query_as;
use tracing::{debug, info};

use crate::{
    application::{
        dto::status_dto::SystemStatusDTO, error::ApplicationError,
        repositories::status_repository::StatusRepository,
    },
    domain::models::system_status::SystemStatus,
};

pub struct PgStatusRepository {
    pool: sqlx::PgPool,
}

impl PgStatusRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusRepository for PgStatusRepository {
    async fn get_status(&self) -> Result<SystemStatus, ApplicationError> {
        debug!("Fetching system status from database");
        let query = "SELECT phone_number, available, updated_at FROM config.system_status LIMIT 1";

        let row: SystemStatusDTO = query_as::<_, SystemStatusDTO>(query)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?
            .ok_or(ApplicationError::NotFound)?;

        let status: SystemStatus = row.into();
        info!(
            "System status fetched: phone_number={}, available={}",
            status.phone_number, status.available
        );
        Ok(status)
    }
}
