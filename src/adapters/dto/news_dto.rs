use serde::Deserialize;

pub const DEFAULT_NEWS_LIMIT: u32 = 10;
pub const MAX_NEWS_LIMIT: u32 = 50;

#[derive(Debug, Deserialize, Default)]
pub struct NewsQuery {
    pub locale: Option<String>,
    pub limit: Option<u32>,
}

impl NewsQuery {
    pub fn effective_limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_NEWS_LIMIT)
            .clamp(1, MAX_NEWS_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        let query = |limit| NewsQuery {
            locale: None,
            limit,
        };
        assert_eq!(query(None).effective_limit(), 10);
        assert_eq!(query(Some(0)).effective_limit(), 1);
        assert_eq!(query(Some(500)).effective_limit(), 50);
        assert_eq!(query(Some(20)).effective_limit(), 20);
    }
}
