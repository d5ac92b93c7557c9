use reqwest::StatusCode;
use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum CrmError {
    #[error("CRM rejected credentials: {0}")]
    Unauthorized(String),

    #[error("CRM rejected lead: {0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("CRM provider error: {0}")]
    ProviderError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl CrmError {
    pub fn from_status(status: StatusCode, detail: String) -> Self {
        let detail = format!("{}: {}", status, detail);
        match status.as_u16() {
            401 | 403 => CrmError::Unauthorized(detail),
            400 | 409 | 422 => CrmError::Rejected(detail),
            _ => CrmError::ProviderError(detail),
        }
    }
}

impl From<CrmError> for ApplicationError {
    fn from(error: CrmError) -> Self {
        match error {
            CrmError::InternalError(msg) => ApplicationError::InternalError(msg),
            other => ApplicationError::UpstreamError(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for CrmError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            CrmError::NetworkError("Request timeout".to_string())
        } else if error.is_connect() {
            CrmError::NetworkError(format!("Connection failed: {}", error))
        } else if let Some(status) = error.status() {
            CrmError::from_status(status, error.to_string())
        } else {
            CrmError::InternalError(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_error_kinds() {
        assert!(matches!(
            CrmError::from_status(StatusCode::FORBIDDEN, String::new()),
            CrmError::Unauthorized(_)
        ));
        assert!(matches!(
            CrmError::from_status(StatusCode::UNPROCESSABLE_ENTITY, String::new()),
            CrmError::Rejected(_)
        ));
        assert!(matches!(
            CrmError::from_status(StatusCode::BAD_GATEWAY, String::new()),
            CrmError::ProviderError(_)
        ));
    }

    #[test]
    fn internal_errors_stay_internal() {
        let err: ApplicationError = CrmError::InternalError("tls".to_string()).into();
        assert!(matches!(err, ApplicationError::InternalError(_)));

        let err: ApplicationError = CrmError::NetworkError("timeout".to_string()).into();
        assert!(matches!(err, ApplicationError::UpstreamError(_)));
    }
}
