//! Submission transport
//!
//! Carries a [`ContactRequest`] to the backend's `POST /api/contact` endpoint
//! and reports whether the backend accepted it.

use super::ContactRequest;
use std::future::Future;

/// Path of the inquiry endpoint, relative to the backend base URL
pub const CONTACT_PATH: &str = "/api/contact";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The backend answered, but not with a 2xx status
    #[error("Backend rejected the inquiry with status {status}")]
    Rejected { status: u16 },

    /// The request never completed normally
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// Delivery mechanism for inquiries.
///
/// `Ok(())` means the backend acknowledged the inquiry. Both error variants
/// are treated the same by the form session.
pub trait SubmissionTransport: Send + Sync {
    fn send(
        &self,
        request: &ContactRequest,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

// =============================================================================
// HTTP Transport
// =============================================================================

/// JSON-over-HTTP transport against a fixed backend base URL.
///
/// No request timeout is configured; a stalled backend keeps the call pending.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("etana-interiors/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: contact_endpoint(base_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SubmissionTransport for HttpTransport {
    async fn send(&self, request: &ContactRequest) -> Result<(), TransportError> {
        tracing::debug!("POST {}", self.endpoint);

        // `json` sets Content-Type: application/json
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

fn contact_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), CONTACT_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::testing::{jane, spawn_backend};
    use axum::http::StatusCode;

    #[test]
    fn test_contact_endpoint_joins_base_url() {
        assert_eq!(
            contact_endpoint("http://localhost:8001"),
            "http://localhost:8001/api/contact"
        );
        assert_eq!(
            contact_endpoint("https://api.example.com/"),
            "https://api.example.com/api/contact"
        );
    }

    #[tokio::test]
    async fn test_send_posts_exact_json_body() {
        let (base_url, stub) = spawn_backend(StatusCode::OK).await;
        let transport = HttpTransport::new(&base_url).unwrap();

        transport.send(&jane()).await.unwrap();

        let received = stub.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let (content_type, body) = &received[0];
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(
            body,
            &serde_json::json!({
                "name": "Jane",
                "email": "jane@x.com",
                "phone": "",
                "service": "furniture",
                "message": "Hi"
            })
        );
    }

    #[tokio::test]
    async fn test_send_accepts_any_2xx() {
        let (base_url, _stub) = spawn_backend(StatusCode::CREATED).await;
        let transport = HttpTransport::new(&base_url).unwrap();
        assert!(transport.send(&jane()).await.is_ok());
    }

    #[tokio::test]
    async fn test_send_rejects_non_2xx() {
        let (base_url, _stub) = spawn_backend(StatusCode::INTERNAL_SERVER_ERROR).await;
        let transport = HttpTransport::new(&base_url).unwrap();
        assert!(matches!(
            transport.send(&jane()).await,
            Err(TransportError::Rejected { status: 500 })
        ));
    }

    #[tokio::test]
    async fn test_send_connection_refused_is_network_error() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new(&format!("http://{}", addr)).unwrap();
        assert!(matches!(
            transport.send(&jane()).await,
            Err(TransportError::Network(_))
        ));
    }
}
