//! Admin token checks, client identification and rate limiting

use axum::http::{header, HeaderMap};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use std::net::IpAddr;

/// Rate limit bucket for contact form submissions
pub const CONTACT_ENDPOINT: &str = "contact";

// =============================================================================
// Admin Token
// =============================================================================

pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Token from an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Constant-time comparison of a presented token against a stored digest
pub fn token_matches(provided: &str, expected_hash: &str) -> bool {
    let provided_hash = hash_token(provided);
    provided_hash
        .bytes()
        .zip(expected_hash.bytes())
        .fold(provided_hash.len() == expected_hash.len(), |acc, (a, b)| {
            acc & (a == b)
        })
}

// =============================================================================
// Client IP
// =============================================================================

/// Resolve the client IP, honouring proxy headers only from trusted peers
pub fn get_client_ip(
    headers: &HeaderMap,
    peer: Option<IpAddr>,
    trusted_proxies: &[String],
) -> String {
    let peer_str = peer.map(|ip| ip.to_string());

    let peer_is_trusted = peer_str
        .as_deref()
        .map(|ip| trusted_proxies.iter().any(|prefix| ip.starts_with(prefix.as_str())))
        .unwrap_or(false);

    if peer_is_trusted {
        // Check X-Forwarded-For first (for reverse proxy setups)
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }

        let real_ip = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());
        if let Some(ip) = real_ip {
            return ip.to_string();
        }
    }

    peer_str.unwrap_or_else(|| "unknown".to_string())
}

// =============================================================================
// Rate Limiting
// =============================================================================

/// Whether `ip` is still under `max_attempts` for `endpoint` in the last hour.
/// Fails open on database errors.
pub async fn check_rate_limit(
    pool: &PgPool,
    ip: &str,
    endpoint: &str,
    max_attempts: i64,
) -> bool {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM rate_limit_attempts
        WHERE ip_address = $1 AND endpoint = $2
        AND attempted_at > NOW() - INTERVAL '1 hour'
        "#,
    )
    .bind(ip)
    .bind(endpoint)
    .fetch_one(pool)
    .await
    .unwrap_or_else(|e| {
        tracing::warn!("Rate limit lookup failed: {}", e);
        0
    });

    count < max_attempts
}

pub async fn record_attempt(pool: &PgPool, ip: &str, endpoint: &str) {
    let result =
        sqlx::query("INSERT INTO rate_limit_attempts (ip_address, endpoint) VALUES ($1, $2)")
            .bind(ip)
            .bind(endpoint)
            .execute(pool)
            .await;

    if let Err(e) = result {
        tracing::warn!("Failed to record rate limit attempt: {}", e);
    }
}
