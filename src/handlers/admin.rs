//! Lead management handlers

use crate::handlers::contacts::log_audit;
use crate::models::*;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::AppState;

// =============================================================================
// Query Parameters
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ListContactsQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<ContactStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusQuery {
    pub status: String,
}

/// Clamp pagination input to `(page, per_page, offset)`
fn page_window(page: Option<i64>, per_page: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(20).clamp(1, 100);
    (page, per_page, (page - 1) * per_page)
}

fn total_pages(total: i64, per_page: i64) -> i64 {
    (total + per_page - 1) / per_page
}

// =============================================================================
// Endpoints
// =============================================================================

/// List inquiries, newest first
pub async fn list_contacts(
    State(state): State<AppState>,
    Query(query): Query<ListContactsQuery>,
) -> impl IntoResponse {
    let (page, per_page, offset) = page_window(query.page, query.per_page);

    let contacts = sqlx::query_as::<_, Contact>(
        r#"
        SELECT * FROM contacts
        WHERE ($1::contact_status IS NULL OR status = $1)
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(query.status)
    .bind(per_page)
    .bind(offset)
    .fetch_all(&state.pool)
    .await;

    let contacts = match contacts {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Error fetching contacts: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<PaginatedResponse<Contact>>::error(
                    "Internal server error",
                )),
            );
        }
    };

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM contacts WHERE ($1::contact_status IS NULL OR status = $1)",
    )
    .bind(query.status)
    .fetch_one(&state.pool)
    .await
    .unwrap_or(0);

    tracing::info!(
        "Listed contacts (page {}, {} results)",
        page,
        contacts.len()
    );

    (
        StatusCode::OK,
        Json(ApiResponse::success(PaginatedResponse {
            items: contacts,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })),
    )
}

/// Get a single inquiry
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let contact = sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await;

    match contact {
        Ok(Some(contact)) => (StatusCode::OK, Json(ApiResponse::success(contact))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Contact not found")),
        ),
        Err(e) => {
            tracing::error!("Error fetching contact {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Internal server error")),
            )
        }
    }
}

/// Move an inquiry through the sales pipeline
pub async fn update_contact_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<UpdateStatusQuery>,
) -> impl IntoResponse {
    let status: ContactStatus = match query.status.parse() {
        Ok(s) => s,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<Contact>::error(message)),
            );
        }
    };

    let result = sqlx::query_as::<_, Contact>(
        r#"
        UPDATE contacts
        SET status = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(status)
    .bind(id)
    .fetch_optional(&state.pool)
    .await;

    match result {
        Ok(Some(contact)) => {
            log_audit(
                &state.pool,
                "contact_status_changed",
                Some(id),
                "admin",
                serde_json::json!({ "new_status": status }),
            )
            .await;

            tracing::info!("Contact {} status changed to {}", id, status.as_str());

            (StatusCode::OK, Json(ApiResponse::success(contact)))
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Contact not found")),
        ),
        Err(e) => {
            tracing::error!("Error updating contact status: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Internal server error")),
            )
        }
    }
}
