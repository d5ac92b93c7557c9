use axum::{extract::State, http::HeaderMap, Json};
use tracing::info;

use crate::{
    adapters::{dto::token_dto::TokenResponse, middleware::session_id},
    application::{error::ApplicationError, services::TokenService},
};

pub struct CsrfController;

impl CsrfController {
    /// Issues a single-use anti-forgery token
    /// GET /api/csrf
    /// An optional X-Session-Id header binds the token to that session.
    pub async fn issue_token(
        State(token_service): State<TokenService>,
        headers: HeaderMap,
    ) -> Result<Json<TokenResponse>, ApplicationError> {
        let session = session_id(&headers);
        info!("Issuing CSRF token (session bound: {})", session.is_some());

        let issued = token_service.issue(session).await?;

        Ok(Json(TokenResponse {
            token: issued.value,
        }))
    }
}
