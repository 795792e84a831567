//! Public contact form endpoint

use crate::handlers::auth::{check_rate_limit, get_client_ip, record_attempt, CONTACT_ENDPOINT};
use crate::models::*;
use crate::validation::validate_contact;
use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use std::net::SocketAddr;
use uuid::Uuid;

use super::AppState;

/// Acknowledgement returned to the visitor
pub const CONTACT_RECEIVED: &str = "Thank you for your inquiry! We will get back to you soon.";

/// Receive a lead inquiry from the contact form
pub async fn create_contact(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(input): Json<CreateContact>,
) -> impl IntoResponse {
    let input = input.trimmed();

    // Validate before touching the database
    if let Err(e) = validate_contact(&input) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ContactCreated>::error(e.to_string())),
        );
    }

    let peer = connect_info.map(|ConnectInfo(addr)| addr.ip());
    let client_ip = get_client_ip(&headers, peer, &state.trusted_proxies);
    if !check_rate_limit(
        &state.pool,
        &client_ip,
        CONTACT_ENDPOINT,
        state.max_contact_attempts,
    )
    .await
    {
        tracing::warn!("Contact rate limit reached for {}", client_ip);
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ApiResponse::error(
                "Too many inquiries. Please try again later.",
            )),
        );
    }
    record_attempt(&state.pool, &client_ip, CONTACT_ENDPOINT).await;

    let result = sqlx::query_as::<_, Contact>(
        r#"
        INSERT INTO contacts (name, email, phone, service, message)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(input.normalized_phone())
    .bind(input.normalized_service())
    .bind(&input.message)
    .fetch_one(&state.pool)
    .await;

    match result {
        Ok(contact) => {
            log_audit(
                &state.pool,
                "contact_created",
                Some(contact.id),
                "visitor",
                serde_json::json!({ "service": contact.service }),
            )
            .await;

            tracing::info!(
                "New inquiry {} ({})",
                contact.id,
                contact.service.as_deref().unwrap_or("no service selected")
            );

            (
                StatusCode::CREATED,
                Json(ApiResponse::success(ContactCreated {
                    id: contact.id,
                    message: CONTACT_RECEIVED.to_string(),
                })),
            )
        }
        Err(e) => {
            tracing::error!("Failed to save contact: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Internal server error")),
            )
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

pub(crate) async fn log_audit(
    pool: &PgPool,
    action: &str,
    entity_id: Option<Uuid>,
    actor_type: &str,
    details: serde_json::Value,
) {
    let result = sqlx::query(
        r#"
        INSERT INTO audit_log (action, entity_type, entity_id, actor_type, details)
        VALUES ($1, 'contact', $2, $3, $4)
        "#,
    )
    .bind(action)
    .bind(entity_id)
    .bind(actor_type)
    .bind(details)
    .execute(pool)
    .await;

    if let Err(e) = result {
        tracing::warn!("Failed to write audit log entry {}: {}", action, e);
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::{api_router, test_support::lazy_state};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn post_contact(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_contact_rejects_invalid_email() {
        let app = api_router(lazy_state(None));
        let response = app
            .oneshot(post_contact(serde_json::json!({
                "name": "Jane",
                "email": "jane-at-x",
                "phone": "",
                "service": "furniture",
                "message": "Hi"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Invalid email format");
    }

    #[tokio::test]
    async fn test_create_contact_accepts_padded_email() {
        let app = api_router(lazy_state(None));
        let response = app
            .oneshot(post_contact(serde_json::json!({
                "name": "Jane",
                "email": "jane@x.com ",
                "phone": "",
                "service": "furniture",
                "message": "Hi"
            })))
            .await
            .unwrap();

        // Past validation the insert hits the unreachable pool
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_create_contact_rejects_blank_message() {
        let app = api_router(lazy_state(None));
        let response = app
            .oneshot(post_contact(serde_json::json!({
                "name": "Jane",
                "email": "jane@x.com",
                "message": " "
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_contact_rejects_missing_fields() {
        let app = api_router(lazy_state(None));
        let response = app
            .oneshot(post_contact(serde_json::json!({ "name": "Jane" })))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }
}
