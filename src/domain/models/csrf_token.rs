use chrono::{DateTime, Duration, Utc};

/// One issued anti-forgery token.
///
/// A token is usable while `now <= expires_at` and it has not been consumed.
/// When `binding` is set, only a caller presenting the same binding may
/// consume it.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrfToken {
    pub value: String,
    pub binding: Option<String>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub consumed: bool,
}

impl CsrfToken {
    pub fn new(
        value: String,
        binding: Option<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            value,
            binding,
            issued_at,
            expires_at: issued_at + ttl,
            consumed: false,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Anonymous tokens accept any caller.
    pub fn accepts_binding(&self, binding: Option<&str>) -> bool {
        match self.binding.as_deref() {
            None => true,
            Some(expected) => binding == Some(expected),
        }
    }

    pub fn is_usable(&self, now: DateTime<Utc>, binding: Option<&str>) -> bool {
        !self.consumed && !self.is_expired(now) && self.accepts_binding(binding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(binding: Option<&str>) -> (CsrfToken, DateTime<Utc>) {
        let now = Utc::now();
        let token = CsrfToken::new(
            "abc123".to_string(),
            binding.map(str::to_string),
            now,
            Duration::seconds(900),
        );
        (token, now)
    }

    #[test]
    fn expires_at_is_issued_at_plus_ttl() {
        let (token, now) = token(None);
        assert_eq!(token.expires_at, now + Duration::seconds(900));
        assert!(!token.consumed);
    }

    #[test]
    fn usable_up_to_and_including_expiry() {
        let (token, now) = token(None);
        assert!(token.is_usable(now + Duration::seconds(900), None));
        assert!(!token.is_usable(now + Duration::seconds(901), None));
    }

    #[test]
    fn consumed_token_is_not_usable() {
        let (mut token, now) = token(None);
        token.consumed = true;
        assert!(!token.is_usable(now, None));
    }

    #[test]
    fn bound_token_requires_matching_binding() {
        let (token, now) = token(Some("session-1"));
        assert!(token.is_usable(now, Some("session-1")));
        assert!(!token.is_usable(now, Some("session-2")));
        assert!(!token.is_usable(now, None));
    }

    #[test]
    fn anonymous_token_accepts_any_binding() {
        let (token, now) = token(None);
        assert!(token.is_usable(now, Some("whatever")));
    }
}
