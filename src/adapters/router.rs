use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::adapters::{
    controllers::{
        csrf_controller::CsrfController, health_controller::HealthController,
        lead_controller::LeadController, news_controller::NewsController,
        status_controller::StatusController,
    },
    middleware::{require_csrf_token, validate_cron_secret},
    state::AppState,
};

pub fn create_router(app_state: AppState, cors: CorsLayer) -> Router {
    // Form submissions that must carry a fresh X-CSRF-Token
    let csrf_protected_routes = Router::new()
        .route("/api/leads", post(LeadController::submit_lead))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_csrf_token,
        ));

    // Routes hit by the scheduled job, requiring X-CRON-SECRET
    let cron_routes = Router::new()
        .route("/api/status/refresh", post(StatusController::refresh_status))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            validate_cron_secret,
        ));

    let public_routes = Router::new()
        .route("/api/csrf", get(CsrfController::issue_token))
        .route("/api/news", get(NewsController::list_news))
        .route("/api/status", get(StatusController::get_status))
        .route("/api/health", get(HealthController::health_check));

    Router::new()
        .merge(csrf_protected_routes)
        .merge(cron_routes)
        .merge(public_routes)
        .layer(cors)
        .with_state(app_state)
}
