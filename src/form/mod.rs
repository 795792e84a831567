//! Contact form session
//!
//! The client side of the lead inquiry flow: the field values a visitor is
//! editing, the lifecycle of a submission, and the transport that carries the
//! inquiry to the backend.

pub mod manager;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use manager::FormStateManager;
pub use transport::{HttpTransport, SubmissionTransport};

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Shown after the backend acknowledged the inquiry
pub const SUCCESS_MESSAGE: &str = "Thank you! We will get back to you soon.";

/// Shown for every kind of failure, application or transport
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

// =============================================================================
// Contact Request
// =============================================================================

/// The inquiry payload, serialized as-is onto the wire.
///
/// Optional fields are carried as empty strings, never omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl ContactRequest {
    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Name => &self.name,
            FieldKey::Email => &self.email,
            FieldKey::Phone => &self.phone,
            FieldKey::Service => &self.service,
            FieldKey::Message => &self.message,
        }
    }

    pub fn set(&mut self, key: FieldKey, value: String) {
        let slot = match key {
            FieldKey::Name => &mut self.name,
            FieldKey::Email => &mut self.email,
            FieldKey::Phone => &mut self.phone,
            FieldKey::Service => &mut self.service,
            FieldKey::Message => &mut self.message,
        };
        *slot = value;
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        FieldKey::ALL.iter().all(|k| self.get(*k).is_empty())
    }
}

// =============================================================================
// Field Keys
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Name,
    Email,
    Phone,
    Service,
    Message,
}

impl FieldKey {
    pub const ALL: [FieldKey; 5] = [
        FieldKey::Name,
        FieldKey::Email,
        FieldKey::Phone,
        FieldKey::Service,
        FieldKey::Message,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Email => "email",
            FieldKey::Phone => "phone",
            FieldKey::Service => "service",
            FieldKey::Message => "message",
        }
    }

    /// Fields the presentation layer must see filled before submitting
    pub fn is_required(self) -> bool {
        matches!(self, FieldKey::Name | FieldKey::Email | FieldKey::Message)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FieldKey {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

// =============================================================================
// Submission State
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Completed { outcome: Outcome, message: String },
}

impl SubmissionState {
    pub fn success() -> Self {
        SubmissionState::Completed {
            outcome: Outcome::Success,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn failure() -> Self {
        SubmissionState::Completed {
            outcome: Outcome::Failure,
            message: FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            SubmissionState::Completed { outcome, .. } => Some(*outcome),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionState::Completed { message, .. } => Some(message),
            _ => None,
        }
    }
}

// =============================================================================
// Form Session
// =============================================================================

/// Everything the presentation layer renders from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSession {
    pub request: ContactRequest,
    pub state: SubmissionState,
}
