pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    // the widget script and chat endpoint are used from tenant sites
    let public = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/widget.js", get(handlers::chat::widget_script))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/", get(handlers::chat::index_page))
        .route("/health", get(handlers::health::health))
        .merge(public)
        .route("/api/admin/login", post(handlers::admin::login))
        .route("/api/admin/logout", post(handlers::admin::logout))
        .route("/api/admin/status", get(handlers::admin::get_status))
        .route(
            "/api/admin/appointments",
            get(handlers::admin::get_appointments),
        )
        .route(
            "/api/admin/appointments/export",
            get(handlers::admin::export_appointments),
        )
        .route(
            "/api/admin/appointments/:id/delete",
            post(handlers::admin::delete_appointment),
        )
        .route(
            "/api/admin/faqs",
            get(handlers::admin::get_faqs).post(handlers::admin::create_faq),
        )
        .route("/api/admin/faqs/:id", post(handlers::admin::update_faq))
        .route(
            "/api/admin/faqs/:id/delete",
            post(handlers::admin::delete_faq),
        )
        .route("/api/superadmin/login", post(handlers::superadmin::login))
        .route("/api/superadmin/logout", post(handlers::superadmin::logout))
        .route(
            "/api/superadmin/clients",
            get(handlers::superadmin::get_clients).post(handlers::superadmin::create_client),
        )
        .route(
            "/api/superadmin/clients/:id",
            post(handlers::superadmin::update_client),
        )
        .route(
            "/api/superadmin/clients/:id/delete",
            post(handlers::superadmin::delete_client),
        )
        .route(
            "/api/superadmin/analytics",
            get(handlers::superadmin::get_analytics),
        )
        .route(
            "/api/superadmin/faqs",
            get(handlers::superadmin::get_faqs).post(handlers::superadmin::create_faq),
        )
        .route(
            "/api/superadmin/faqs/:id",
            post(handlers::superadmin::update_faq),
        )
        .route(
            "/api/superadmin/faqs/:id/delete",
            post(handlers::superadmin::delete_faq),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
