use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use crate::{
    application::{error::ApplicationError, services::CrmClient},
    domain::models::lead::Lead,
    services::error::CrmError,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpCrmClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpCrmClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, CrmError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CrmError::InternalError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn leads_url(&self) -> String {
        format!("{}/leads", self.base_url)
    }
}

#[async_trait]
impl CrmClient for HttpCrmClient {
    async fn submit_lead(&self, lead: &Lead) -> Result<(), ApplicationError> {
        let response = self
            .client
            .post(self.leads_url())
            .bearer_auth(&self.api_key)
            .json(lead)
            .send()
            .await
            .map_err(CrmError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("CRM responded {} for lead {}: {}", status, lead.id, body);
            return Err(CrmError::from_status(status, body).into());
        }

        info!(
            "Lead {} forwarded to CRM (request_call: {})",
            lead.id, lead.request_call
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;
    use wiremock::{
        matchers::{bearer_token, body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    fn lead() -> Lead {
        Lead {
            id: Uuid::new_v4(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            company: Some("Analytical Engines".to_string()),
            message: None,
            locale: "en".to_string(),
            source: "pricing".to_string(),
            request_call: true,
            submitted_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn posts_lead_with_bearer_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/leads"))
            .and(bearer_token("crm-key"))
            .and(body_partial_json(serde_json::json!({
                "email": "ada@example.com",
                "requestCall": true,
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpCrmClient::new(&format!("{}/", server.uri()), "crm-key").unwrap();
        client.submit_lead(&lead()).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_an_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/leads"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = HttpCrmClient::new(&server.uri(), "crm-key").unwrap();
        assert!(matches!(
            client.submit_lead(&lead()).await,
            Err(ApplicationError::UpstreamError(_))
        ));
    }

    #[tokio::test]
    async fn rejected_credentials_are_an_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = HttpCrmClient::new(&server.uri(), "wrong").unwrap();
        assert!(matches!(
            client.submit_lead(&lead()).await,
            Err(ApplicationError::UpstreamError(_))
        ));
    }
}
