use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::models::lead::Lead};

/// Outbound CRM integration that receives captured leads and call requests.
#[async_trait]
pub trait CrmClient: Send + Sync {
    async fn submit_lead(&self, lead: &Lead) -> Result<(), ApplicationError>;
}
