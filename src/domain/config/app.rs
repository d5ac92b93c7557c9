use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// One day. Anti-forgery tokens are meant to be short-lived.
pub const MAX_TOKEN_TTL_SECS: u64 = 86_400;

/// Settings read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub redis_url: Option<String>,
    pub crm_base_url: String,
    pub crm_api_key: String,
    pub cron_secret: String,
    pub token_ttl: Duration,
    pub sweep_interval: Duration,
    pub status_refresh_interval: Option<Duration>,
    pub supported_locales: Vec<String>,
    pub default_locale: String,
    pub default_phone_number: String,
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let seconds = |name: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(name) {
                Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                    name,
                    value: raw,
                }),
                None => Ok(default),
            }
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid {
                    name: "PORT",
                    value: raw,
                })?,
            None => 8080,
        };

        let token_ttl = seconds("CSRF_TOKEN_TTL_SECS", 900)?;
        if token_ttl == 0 || token_ttl > MAX_TOKEN_TTL_SECS {
            return Err(ConfigError::Invalid {
                name: "CSRF_TOKEN_TTL_SECS",
                value: token_ttl.to_string(),
            });
        }
        let sweep_interval = seconds("CSRF_SWEEP_INTERVAL_SECS", 60)?.max(1);
        let status_refresh = seconds("STATUS_REFRESH_INTERVAL_SECS", 0)?;

        let supported_locales = split_list(
            &lookup("SUPPORTED_LOCALES").unwrap_or_else(|| "en,es".to_string()),
        );
        if supported_locales.is_empty() {
            return Err(ConfigError::Invalid {
                name: "SUPPORTED_LOCALES",
                value: String::new(),
            });
        }
        let default_locale = match lookup("DEFAULT_LOCALE") {
            Some(locale) if supported_locales.contains(&locale) => locale,
            Some(locale) => {
                return Err(ConfigError::Invalid {
                    name: "DEFAULT_LOCALE",
                    value: locale,
                })
            }
            None => supported_locales[0].clone(),
        };

        Ok(Self {
            port,
            database_url: required("DATABASE_URL")?,
            redis_url: lookup("REDIS_URL").filter(|v| !v.trim().is_empty()),
            crm_base_url: required("CRM_BASE_URL")?,
            crm_api_key: required("CRM_API_KEY")?,
            cron_secret: required("CRON_SECRET")?,
            token_ttl: Duration::from_secs(token_ttl),
            sweep_interval: Duration::from_secs(sweep_interval),
            status_refresh_interval: (status_refresh > 0)
                .then(|| Duration::from_secs(status_refresh)),
            supported_locales,
            default_locale,
            default_phone_number: lookup("DEFAULT_PHONE_NUMBER").unwrap_or_default(),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|v| split_list(&v))
                .filter(|origins| !origins.is_empty()),
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
