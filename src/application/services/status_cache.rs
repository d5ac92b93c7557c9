use std::{
    sync::{Arc, RwLock},
    time::Duration,
};

use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::{info, warn};

use crate::{
    application::{error::ApplicationError, repositories::status_repository::StatusRepository},
    domain::models::system_status::SystemStatus,
};

/// Process-wide system status read by request handlers and replaced by the
/// refresh job.
#[derive(Clone)]
pub struct SystemStatusCache {
    status: Arc<RwLock<SystemStatus>>,
}

impl SystemStatusCache {
    pub fn new(initial: SystemStatus) -> Self {
        Self {
            status: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn get(&self) -> SystemStatus {
        self.status.read().unwrap().clone()
    }

    pub fn replace(&self, new_status: SystemStatus) {
        let mut status = self.status.write().unwrap();
        *status = new_status;
    }

    /// Reloads the status from `repository`. On failure the cached value is
    /// kept.
    pub async fn refresh(
        &self,
        repository: &dyn StatusRepository,
    ) -> Result<SystemStatus, ApplicationError> {
        let status = repository.get_status().await?;
        self.replace(status.clone());
        info!(
            "System status refreshed: phone_number={}, available={}",
            status.phone_number, status.available
        );
        Ok(status)
    }
}

pub fn spawn_status_refresher(
    cache: SystemStatusCache,
    repository: Arc<dyn StatusRepository>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = cache.refresh(repository.as_ref()).await {
                warn!("Failed to refresh system status: {}", e);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;

    struct FlakyStatusRepository {
        fail: AtomicBool,
    }

    #[async_trait]
    impl StatusRepository for FlakyStatusRepository {
        async fn get_status(&self) -> Result<SystemStatus, ApplicationError> {
            if self.fail.load(Ordering::SeqCst) {
                Err(ApplicationError::DatabaseError("connection refused".to_string()))
            } else {
                Ok(SystemStatus {
                    phone_number: "+1 555 0100".to_string(),
                    available: false,
                    updated_at: chrono::Utc::now(),
                })
            }
        }
    }

    #[tokio::test]
    async fn refresh_replaces_cached_status() {
        let cache = SystemStatusCache::new(SystemStatus::with_phone_number("+1 555 0000"));
        let repo = FlakyStatusRepository {
            fail: AtomicBool::new(false),
        };

        cache.refresh(&repo).await.unwrap();

        let status = cache.get();
        assert_eq!(status.phone_number, "+1 555 0100");
        assert!(!status.available);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_status() {
        let cache = SystemStatusCache::new(SystemStatus::with_phone_number("+1 555 0000"));
        let repo = FlakyStatusRepository {
            fail: AtomicBool::new(true),
        };

        assert!(cache.refresh(&repo).await.is_err());
        assert_eq!(cache.get().phone_number, "+1 555 0000");
    }

    #[tokio::test(start_paused = true)]
    async fn refresher_runs_on_interval() {
        let cache = SystemStatusCache::new(SystemStatus::with_phone_number("+1 555 0000"));
        let repo: Arc<dyn StatusRepository> = Arc::new(FlakyStatusRepository {
            fail: AtomicBool::new(false),
        });

        let handle = spawn_status_refresher(cache.clone(), repo, Duration::from_secs(300));
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(cache.get().phone_number, "+1 555 0100");
        handle.abort();
    }
}
