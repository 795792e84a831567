//! HTTP request handlers

pub mod admin;
pub mod auth;
pub mod contacts;
pub mod middleware;
pub mod public;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub is_production: bool,
    /// Trusted proxy IP prefixes for X-Forwarded-For validation
    pub trusted_proxies: Vec<String>,
    /// SHA-256 hex digest of the admin API token, if one is configured
    pub admin_token_hash: Option<String>,
    /// Contact submissions allowed per IP per hour
    pub max_contact_attempts: i64,
}

/// Routes mounted under `/api`
pub fn api_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/contacts", get(admin::list_contacts))
        .route("/contacts/:id", get(admin::get_contact))
        .route("/contacts/:id/status", patch(admin::update_contact_status))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_admin));

    Router::new()
        // Public endpoints
        .route("/health", get(public::health_check))
        .route("/contact", post(contacts::create_contact))
        .route("/services", get(public::list_services))
        .route("/company", get(public::company_info))
        // Lead management
        .merge(admin_routes)
        .with_state(state)
}
