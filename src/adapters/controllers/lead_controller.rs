use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;

use crate::{
    adapters::{dto::lead_dto::LeadResponse, state::SiteSettings},
    application::{dto::lead_dto::LeadDTO, error::ApplicationError, services::CrmClient},
};

pub struct LeadController;

impl LeadController {
    /// Forwards a lead-capture form to the CRM
    /// POST /api/leads
    /// Requires a valid X-CSRF-Token, checked by middleware before this runs.
    pub async fn submit_lead(
        State(crm_client): State<Arc<dyn CrmClient>>,
        State(site): State<SiteSettings>,
        payload: Result<Json<LeadDTO>, JsonRejection>,
    ) -> Result<(StatusCode, Json<LeadResponse>), ApplicationError> {
        let Json(body) = payload?;
        let lead = body.into_lead(&site.supported_locales, &site.default_locale, Utc::now())?;
        info!(
            "Received lead {} from source '{}' (locale: {})",
            lead.id, lead.source, lead.locale
        );

        crm_client.submit_lead(&lead).await?;

        Ok((
            StatusCode::CREATED,
            Json(LeadResponse {
                id: lead.id,
                status: "received".to_string(),
            }),
        ))
    }
}
