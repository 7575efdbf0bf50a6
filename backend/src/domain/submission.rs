//! Friend-request submission orchestration.
//!
//! [`SubmissionController`] drives one attempt from raw form input to a
//! terminal, presentation-visible outcome: validate, dispatch through
//! the [`AddFriendEndpoint`] port, classify the result. Nothing escapes
//! the controller; every failure becomes a field error on the email
//! input.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::friend_request::FriendRequestInput;
use super::ports::AddFriendEndpoint;

/// Fixed message shown when a failure carries no safe user-facing detail.
pub const FALLBACK_FIELD_ERROR: &str = "Something went wrong";

/// Progress of the current submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    /// No attempt in flight; a previous outcome may still be displayed.
    Idle,
    /// The raw input is being checked against the format predicate.
    Validating,
    /// The validated email is on its way to the remote endpoint.
    Dispatching,
    /// The attempt finished successfully.
    Succeeded,
    /// The attempt finished with a field error.
    Failed,
}

/// Terminal result of one submission attempt.
///
/// Success and failure are mutually exclusive by construction: no value
/// carries both a success flag and a field error. The wire form is
/// `{ "succeeded": bool, "fieldError": string? }` and deserialisation
/// rejects envelopes violating the exclusivity rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SubmissionOutcomeDto", into = "SubmissionOutcomeDto")]
pub enum SubmissionOutcome {
    Succeeded,
    Failed { field_error: String },
}

impl SubmissionOutcome {
    /// Build a failed outcome carrying `field_error`.
    pub fn failed(field_error: impl Into<String>) -> Self {
        Self::Failed {
            field_error: field_error.into(),
        }
    }

    /// Whether the attempt succeeded.
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Message bound to the email field, present exactly when the
    /// attempt failed.
    pub fn field_error(&self) -> Option<&str> {
        match self {
            Self::Succeeded => None,
            Self::Failed { field_error } => Some(field_error.as_str()),
        }
    }
}

/// Validation errors raised when decoding a [`SubmissionOutcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcomeValidationError {
    SucceededWithFieldError,
    FailedWithoutFieldError,
}

impl fmt::Display for SubmissionOutcomeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SucceededWithFieldError => {
                write!(f, "a successful outcome must not carry a field error")
            }
            Self::FailedWithoutFieldError => {
                write!(f, "a failed outcome must carry a field error")
            }
        }
    }
}

impl std::error::Error for SubmissionOutcomeValidationError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionOutcomeDto {
    succeeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field_error: Option<String>,
}

impl From<SubmissionOutcome> for SubmissionOutcomeDto {
    fn from(value: SubmissionOutcome) -> Self {
        match value {
            SubmissionOutcome::Succeeded => Self {
                succeeded: true,
                field_error: None,
            },
            SubmissionOutcome::Failed { field_error } => Self {
                succeeded: false,
                field_error: Some(field_error),
            },
        }
    }
}

impl TryFrom<SubmissionOutcomeDto> for SubmissionOutcome {
    type Error = SubmissionOutcomeValidationError;

    fn try_from(value: SubmissionOutcomeDto) -> Result<Self, Self::Error> {
        match (value.succeeded, value.field_error) {
            (true, None) => Ok(Self::Succeeded),
            (false, Some(field_error)) => Ok(Self::Failed { field_error }),
            (true, Some(_)) => Err(SubmissionOutcomeValidationError::SucceededWithFieldError),
            (false, None) => Err(SubmissionOutcomeValidationError::FailedWithoutFieldError),
        }
    }
}

/// Drives friend-request attempts and owns the current outcome slot.
///
/// Single-writer contract: the controller is the only writer of its
/// outcome, and each attempt's outcome replaces the previous one
/// wholesale. The exclusive borrow taken by [`SubmissionController::submit`]
/// doubles as the re-entrancy guard — a second dispatch of the same
/// in-flight attempt cannot be started.
pub struct SubmissionController {
    endpoint: Arc<dyn AddFriendEndpoint>,
    phase: SubmissionPhase,
    outcome: Option<SubmissionOutcome>,
}

impl SubmissionController {
    /// Create a controller dispatching through `endpoint`.
    pub fn new(endpoint: Arc<dyn AddFriendEndpoint>) -> Self {
        Self {
            endpoint,
            phase: SubmissionPhase::Idle,
            outcome: None,
        }
    }

    /// Current phase of the attempt in progress, if any.
    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Outcome of the most recently resolved attempt.
    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        self.outcome.as_ref()
    }

    /// Run one submission attempt over `raw` to its terminal outcome.
    ///
    /// Classification order, first match wins:
    /// 1. validation failure → the schema's message;
    /// 2. endpoint rejection carrying a server message → that message;
    /// 3. anything else (bodyless rejection, timeout, transport fault)
    ///    → [`FALLBACK_FIELD_ERROR`].
    pub async fn submit(&mut self, raw: &serde_json::Value) -> &SubmissionOutcome {
        self.phase = SubmissionPhase::Validating;
        let input = match FriendRequestInput::validate(raw) {
            Ok(input) => input,
            Err(error) => return self.resolve(SubmissionOutcome::failed(error.to_string())),
        };

        // Defence in depth: the predicate is idempotent, so this only
        // fails if an invalid value was constructed outside `validate`.
        let email = match input.email.revalidated() {
            Ok(email) => email,
            Err(error) => return self.resolve(SubmissionOutcome::failed(error.to_string())),
        };

        self.phase = SubmissionPhase::Dispatching;
        let outcome = match self.endpoint.add_friend(&email).await {
            Ok(()) => SubmissionOutcome::Succeeded,
            Err(error) => {
                warn!(error = %error, "add-friend dispatch failed");
                match error.rejection_message() {
                    Some(message) => SubmissionOutcome::failed(message),
                    None => SubmissionOutcome::failed(FALLBACK_FIELD_ERROR),
                }
            }
        };
        self.resolve(outcome)
    }

    fn resolve(&mut self, outcome: SubmissionOutcome) -> &SubmissionOutcome {
        self.phase = if outcome.succeeded() {
            SubmissionPhase::Succeeded
        } else {
            SubmissionPhase::Failed
        };
        self.outcome.insert(outcome)
    }
}
