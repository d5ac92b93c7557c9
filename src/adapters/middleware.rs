use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::{
    adapters::state::CronSecret,
    application::{error::ApplicationError, services::TokenService},
};

pub const CSRF_TOKEN_HEADER: &str = "X-CSRF-Token";
pub const SESSION_ID_HEADER: &str = "X-Session-Id";
pub const CRON_SECRET_HEADER: &str = "X-CRON-SECRET";

/// Session identifier the caller bound its token to, if any.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Consumes the X-CSRF-Token header before the protected handler runs.
///
/// Missing, malformed and rejected tokens all produce the same response.
pub async fn require_csrf_token(
    State(token_service): State<TokenService>,
    headers: HeaderMap,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApplicationError> {
    let Some(token) = headers
        .get(CSRF_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
    else {
        warn!(
            "{} header missing or not valid UTF-8 on {} {}",
            CSRF_TOKEN_HEADER,
            request.method(),
            request.uri().path()
        );
        return Err(ApplicationError::InvalidToken);
    };

    let session = session_id(&headers);
    token_service.validate(token, session.as_deref()).await?;

    Ok(next.run(request).await)
}

fn secrets_match(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Middleware to validate the X-CRON-SECRET header
pub async fn validate_cron_secret(
    State(secret): State<CronSecret>,
    headers: HeaderMap,
    request: Request<Body>,
    next: Next,
) -> Response {
    match headers.get(CRON_SECRET_HEADER) {
        Some(header_value) => match header_value.to_str() {
            Ok(provided_secret) if secrets_match(provided_secret, &secret.0) => {
                next.run(request).await
            }
            Ok(_) => {
                warn!("Invalid secret provided in {} header", CRON_SECRET_HEADER);
                ApplicationError::Unauthorized.into_response()
            }
            Err(_) => {
                warn!("{} header contains invalid UTF-8", CRON_SECRET_HEADER);
                (StatusCode::BAD_REQUEST, "Bad request").into_response()
            }
        },
        None => {
            warn!("{} header is missing", CRON_SECRET_HEADER);
            ApplicationError::Unauthorized.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn session_id_is_trimmed_and_optional() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id(&headers), None);

        headers.insert(SESSION_ID_HEADER, HeaderValue::from_static("  "));
        assert_eq!(session_id(&headers), None);

        headers.insert(SESSION_ID_HEADER, HeaderValue::from_static(" sess-1 "));
        assert_eq!(session_id(&headers).as_deref(), Some("sess-1"));
    }

    #[test]
    fn secrets_must_match_exactly() {
        assert!(secrets_match("cron-secret", "cron-secret"));
        assert!(!secrets_match("cron-secreT", "cron-secret"));
        assert!(!secrets_match("cron-secret ", "cron-secret"));
        assert!(!secrets_match("", "cron-secret"));
    }
}
