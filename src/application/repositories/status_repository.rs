use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::models::system_status::SystemStatus};

#[async_trait]
pub trait StatusRepository: Send + Sync {
    async fn get_status(&self) -> Result<SystemStatus, ApplicationError>;
}
