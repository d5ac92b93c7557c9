use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{application::error::ApplicationError, domain::models::lead::Lead};

const MAX_EMAIL_LEN: usize = 254;
const MAX_FIELD_LEN: usize = 2000;

/// Lead form body as posted by the website.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LeadDTO {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
    pub locale: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "requestCall", default)]
    pub request_call: bool,
}

impl LeadDTO {
    /// Trims every field and drops the ones left empty.
    pub fn sanitize(&mut self) {
        for field in [
            &mut self.name,
            &mut self.email,
            &mut self.phone,
            &mut self.company,
            &mut self.message,
            &mut self.locale,
            &mut self.source,
        ] {
            *field = field
                .take()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        }
    }

    pub fn into_lead(
        mut self,
        supported_locales: &[String],
        default_locale: &str,
        now: DateTime<Utc>,
    ) -> Result<Lead, ApplicationError> {
        self.sanitize();

        let name = self
            .name
            .ok_or_else(|| ApplicationError::BadRequest("Missing 'name'".to_string()))?;
        let email = self
            .email
            .ok_or_else(|| ApplicationError::BadRequest("Missing 'email'".to_string()))?;

        if email.len() > MAX_EMAIL_LEN || !is_plausible_email(&email) {
            return Err(ApplicationError::BadRequest("Invalid 'email'".to_string()));
        }

        let locale = self.locale.unwrap_or_else(|| default_locale.to_string());
        if !supported_locales.contains(&locale) {
            return Err(ApplicationError::BadRequest(format!(
                "Unsupported locale '{}'",
                locale
            )));
        }

        if [&name, &email]
            .into_iter()
            .chain(self.message.iter())
            .chain(self.company.iter())
            .any(|v| v.len() > MAX_FIELD_LEN)
        {
            return Err(ApplicationError::BadRequest("Field too long".to_string()));
        }

        Ok(Lead {
            id: Uuid::new_v4(),
            name,
            email,
            phone: self.phone,
            company: self.company,
            message: self.message,
            locale,
            source: self.source.unwrap_or_else(|| "website".to_string()),
            request_call: self.request_call,
            submitted_at: now,
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !email.contains(' ')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales() -> Vec<String> {
        vec!["en".to_string(), "es".to_string()]
    }

    fn body() -> LeadDTO {
        LeadDTO {
            name: Some("  Ada Lovelace ".to_string()),
            email: Some("ada@example.com".to_string()),
            phone: Some("   ".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn valid_body_becomes_lead_with_defaults() {
        let lead = body().into_lead(&locales(), "en", Utc::now()).unwrap();

        assert_eq!(lead.name, "Ada Lovelace");
        assert_eq!(lead.locale, "en");
        assert_eq!(lead.source, "website");
        assert_eq!(lead.phone, None);
        assert!(!lead.request_call);
    }

    #[test]
    fn missing_name_is_rejected() {
        let mut dto = body();
        dto.name = Some(" ".to_string());
        assert!(matches!(
            dto.into_lead(&locales(), "en", Utc::now()),
            Err(ApplicationError::BadRequest(_))
        ));
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in ["ada", "@example.com", "ada@localhost", "ada @example.com"] {
            let mut dto = body();
            dto.email = Some(email.to_string());
            assert!(
                dto.into_lead(&locales(), "en", Utc::now()).is_err(),
                "{} should be rejected",
                email
            );
        }
    }

    #[test]
    fn unsupported_locale_is_rejected() {
        let mut dto = body();
        dto.locale = Some("fr".to_string());
        assert!(dto.into_lead(&locales(), "en", Utc::now()).is_err());
    }
}
