//! Form state manager
//!
//! Single owner of a [`FormSession`]. Presentation reads snapshots and
//! dispatches `update_field`, `submit` and `reset`; nothing else touches the
//! session.
//!
//! The submission guard is the session state itself: `submit` is a no-op
//! while the state is [`SubmissionState::Submitting`], so at most one inquiry
//! is in flight per session. The lock is never held across the transport
//! await, which lets field edits land while a submission is pending.

use super::{ContactRequest, FieldKey, FormSession, SubmissionState, SubmissionTransport};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct FormStateManager<T> {
    session: Mutex<FormSession>,
    transport: T,
}

impl<T: SubmissionTransport> FormStateManager<T> {
    /// Fresh session: all fields empty, state `Idle`
    pub fn new(transport: T) -> Self {
        Self {
            session: Mutex::new(FormSession::default()),
            transport,
        }
    }

    pub fn snapshot(&self) -> FormSession {
        self.lock().clone()
    }

    pub fn request(&self) -> ContactRequest {
        self.lock().request.clone()
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state.clone()
    }

    #[cfg(test)]
    pub fn is_submitting(&self) -> bool {
        self.lock().state.is_submitting()
    }

    /// Replace one field's value. Leaves the other fields and the
    /// submission state alone.
    pub fn update_field(&self, key: FieldKey, value: impl Into<String>) {
        self.lock().request.set(key, value.into());
    }

    /// Send the current field values to the backend.
    ///
    /// Returns immediately if a submission is already in flight. Otherwise
    /// the session is `Submitting` until the transport returns, then
    /// `Completed` with the outcome. Fields are cleared on success and kept
    /// on failure.
    pub async fn submit(&self) {
        let request = {
            let mut session = self.lock();
            if session.state.is_submitting() {
                tracing::debug!("Submission already in flight, ignoring submit");
                return;
            }
            session.state = SubmissionState::Submitting;
            session.request.clone()
        };

        tracing::debug!("Submitting inquiry ({} service)", display_service(&request));
        let result = self.transport.send(&request).await;

        let mut session = self.lock();
        match result {
            Ok(()) => {
                tracing::info!("Inquiry accepted by backend");
                session.request = ContactRequest::default();
                session.state = SubmissionState::success();
            }
            Err(e) => {
                tracing::warn!("Inquiry submission failed: {}", e);
                session.state = SubmissionState::failure();
            }
        }
    }

    /// Clear all fields and return to `Idle`
    pub fn reset(&self) {
        let mut session = self.lock();
        session.request = ContactRequest::default();
        session.state = SubmissionState::Idle;
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn lock(&self) -> MutexGuard<'_, FormSession> {
        // Session data stays consistent even if a holder panicked
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn display_service(request: &ContactRequest) -> &str {
    if request.service.is_empty() {
        "unspecified"
    } else {
        &request.service
    }
}
