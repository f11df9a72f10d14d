//! Lifecycle of the learning path request.
//!
//! The request moves through:
//! - `Idle` -> `Pending` on submit
//! - `Pending` -> `Resolved` when a path arrives
//! - `Pending` -> `Failed` when the request fails
//! - `Resolved` / `Failed` -> `Pending` on the next submit
//! - any -> `Idle` on restart
//!
//! Every submission is issued a [`Ticket`]. A completion is only applied if it
//! carries the ticket of the request that is currently pending; anything else
//! is stale and gets dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, ViewerError};
use crate::path::GenerateRequest;

// ============================================================================
// RequestStatus
// ============================================================================

/// Where the learning path request stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Nothing requested yet, or the session was restarted.
    #[default]
    Idle,
    /// Waiting for the backend.
    Pending,
    /// A learning path is installed.
    Resolved,
    /// The last request failed.
    Failed,
}

impl RequestStatus {
    /// Returns `true` if a request has finished, successfully or not.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Resolved | Self::Failed)
    }

    /// Returns `true` if a new submission is allowed.
    #[must_use]
    pub const fn accepts_submit(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Pending => write!(f, "pending"),
            Self::Resolved => write!(f, "resolved"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

// ============================================================================
// Ticket
// ============================================================================

/// Identifies one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ticket(u64);

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// RequestState
// ============================================================================

/// The request lifecycle plus what the learner last asked for.
#[derive(Debug, Clone, Default)]
pub struct RequestState {
    status: RequestStatus,
    request: Option<GenerateRequest>,
    error_message: Option<String>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    current: Option<Ticket>,
    issued: u64,
}

impl RequestState {
    /// Creates an idle request state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    /// The most recent submission, if any.
    #[must_use]
    pub const fn request(&self) -> Option<&GenerateRequest> {
        self.request.as_ref()
    }

    /// Failure message of the last request, when `Failed`.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// When the most recent request was submitted.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// When the most recent request settled.
    #[must_use]
    pub const fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Time the most recent request took to settle.
    #[must_use]
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        Some(self.finished_at? - self.started_at?)
    }

    /// Returns `true` while waiting for the backend.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, RequestStatus::Pending)
    }

    /// Starts a new request and returns its ticket.
    ///
    /// # Errors
    ///
    /// Returns `ViewerError::RequestInFlight` if a request is already pending.
    pub fn begin(&mut self, request: GenerateRequest) -> Result<Ticket> {
        if !self.status.accepts_submit() {
            warn!(
                topic = %request.topic,
                "Rejecting submission while a request is pending"
            );
            return Err(ViewerError::RequestInFlight);
        }

        self.issued += 1;
        let ticket = Ticket(self.issued);
        info!(%ticket, topic = %request.topic, level = %request.level, "Learning path requested");

        self.status = RequestStatus::Pending;
        self.request = Some(request);
        self.error_message = None;
        self.started_at = Some(Utc::now());
        self.finished_at = None;
        self.current = Some(ticket);
        Ok(ticket)
    }

    /// Returns `true` if a completion for `ticket` should be applied.
    #[must_use]
    pub fn accepts(&self, ticket: Ticket) -> bool {
        self.is_pending() && self.current == Some(ticket)
    }

    /// Marks the request for `ticket` as resolved.
    ///
    /// Returns `false`, changing nothing, if the ticket is stale.
    pub fn resolve(&mut self, ticket: Ticket) -> bool {
        if !self.accepts(ticket) {
            warn!(%ticket, status = %self.status, "Discarding stale learning path");
            return false;
        }
        self.settle(RequestStatus::Resolved);
        info!(%ticket, "Learning path resolved");
        true
    }

    /// Marks the request for `ticket` as failed with `message`.
    ///
    /// Returns `false`, changing nothing, if the ticket is stale.
    pub fn fail(&mut self, ticket: Ticket, message: impl Into<String>) -> bool {
        if !self.accepts(ticket) {
            warn!(%ticket, status = %self.status, "Discarding stale request failure");
            return false;
        }
        let message = message.into();
        warn!(%ticket, error = %message, "Learning path request failed");
        self.error_message = Some(message);
        self.settle(RequestStatus::Failed);
        true
    }

    fn settle(&mut self, status: RequestStatus) {
        self.status = status;
        self.finished_at = Some(Utc::now());
        self.current = None;
    }

    /// Returns to `Idle`, forgetting the last request.
    ///
    /// Tickets keep counting up, so a completion for a request issued before
    /// the reset is recognised as stale.
    pub fn reset(&mut self) {
        let issued = self.issued;
        *self = Self {
            issued,
            ..Self::default()
        };
    }
}

// ============================================================================
// Tests
// ============================================================================
