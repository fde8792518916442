pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    Router,
    routing::{get, post, put, delete},
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::{config::Settings, service::ServiceContext};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        .route("/api", get(handlers::root::api_info))

        // Public routes (consumed by the site frontend)
        .nest("/public", public_routes())

        // Admin routes
        .nest("/admin", admin_routes(app_state.clone()))

        // Add state to the router
        .with_state(app_state)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive()) // Configure properly for production
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/checkpoints", get(handlers::public::list_checkpoints))
        .route("/checkpoints/:id", get(handlers::public::get_checkpoint))
        .route("/feed/rss", get(handlers::public::rss_feed))
        .route("/intake/contact", post(handlers::public::submit_contact))
        .route("/intake/lead", post(handlers::public::submit_lead))
        .route("/intake/chat", post(handlers::public::submit_chat))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/checkpoints", get(handlers::checkpoints::list))
        .route("/checkpoints", post(handlers::checkpoints::create))
        .route("/checkpoints/:id", get(handlers::checkpoints::get))
        .route("/checkpoints/:id", put(handlers::checkpoints::update))
        .route("/checkpoints/:id", delete(handlers::checkpoints::delete))
        .route("/checkpoints/:id/confirm", post(handlers::checkpoints::confirm))
        .route("/checkpoints/:id/cancel", post(handlers::checkpoints::cancel))
        .route("/leads", get(handlers::leads::list))
        .route("/leads/:id", get(handlers::leads::get))
        .route("/leads/:id/status", put(handlers::leads::update_status))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_admin,
        ))
}
