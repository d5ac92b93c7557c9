use axum::{extract::State, Json};
use serde::Serialize;
use sysinfo::System;
use tracing::info;

use crate::application::{repositories::token_repository::TokenRepository, services::TokenService};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(rename = "tokenStore")]
    pub token_store: String,
    #[serde(rename = "liveTokens")]
    pub live_tokens: Option<usize>,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    #[serde(rename = "cpuUsagePercent")]
    pub cpu_usage_percent: f32,
    #[serde(rename = "memoryUsedBytes")]
    pub memory_used_bytes: u64,
    #[serde(rename = "memoryTotalBytes")]
    pub memory_total_bytes: u64,
    #[serde(rename = "memoryUsagePercent")]
    pub memory_usage_percent: f32,
}

impl SystemMetrics {
    fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let memory_used = sys.used_memory();
        let memory_total = sys.total_memory();
        let memory_usage_percent = if memory_total > 0 {
            (memory_used as f32 / memory_total as f32) * 100.0
        } else {
            0.0
        };

        Self {
            cpu_usage_percent: sys.global_cpu_usage(),
            memory_used_bytes: memory_used,
            memory_total_bytes: memory_total,
            memory_usage_percent,
        }
    }
}

pub struct HealthController;

impl HealthController {
    /// GET /api/health
    pub async fn health_check(State(token_service): State<TokenService>) -> Json<HealthResponse> {
        info!("Health check requested");

        Json(HealthResponse {
            status: "healthy".to_string(),
            token_store: token_service.repository().backend_name().to_string(),
            live_tokens: token_service.live_count().await,
            metrics: SystemMetrics::collect(),
        })
    }
}
