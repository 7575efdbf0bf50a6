//! Driven port for the remote add-friend endpoint.
//!
//! The endpoint performs the actual friend-request side effect. The
//! domain only depends on its response contract: success, a structured
//! rejection, or a transport-level failure.

use async_trait::async_trait;

use crate::domain::friend_request::FriendRequestEmail;

/// Errors surfaced while calling the add-friend endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddFriendEndpointError {
    /// Network transport failed before a response arrived.
    #[error("add-friend transport failed: {message}")]
    Transport { message: String },
    /// The call exceeded the adapter's timeout.
    #[error("add-friend request timed out: {message}")]
    Timeout { message: String },
    /// The endpoint answered with a non-success status.
    ///
    /// `message` carries the server-provided rejection text when the
    /// response body contained one.
    #[error("add-friend request rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

impl AddFriendEndpointError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn rejected(status: u16, message: impl Into<Option<String>>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Server-provided text safe to show next to the email field, if any.
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Port for dispatching a validated friend request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddFriendEndpoint: Send + Sync {
    /// Send one friend request for `email`.
    ///
    /// The address has already passed the format predicate; adapters
    /// must not re-interpret it.
    ///
    /// # Errors
    ///
    /// Returns an [`AddFriendEndpointError`] classifying the failure as
    /// a rejection (with optional server message), a timeout, or a
    /// transport fault.
    async fn add_friend(&self, email: &FriendRequestEmail) -> Result<(), AddFriendEndpointError>;
}

/// Fixture implementation that accepts every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureAddFriendEndpoint;

#[async_trait]
impl AddFriendEndpoint for FixtureAddFriendEndpoint {
    async fn add_friend(&self, _email: &FriendRequestEmail) -> Result<(), AddFriendEndpointError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_is_only_present_for_rejections_with_a_body() {
        let with_message = AddFriendEndpointError::rejected(409, Some("Already friends".to_owned()));
        assert_eq!(with_message.rejection_message(), Some("Already friends"));

        let without_message = AddFriendEndpointError::rejected(502, None);
        assert_eq!(without_message.rejection_message(), None);

        let transport = AddFriendEndpointError::transport("connection refused");
        assert_eq!(transport.rejection_message(), None);
    }

    #[tokio::test]
    async fn fixture_endpoint_accepts_requests() {
        let endpoint = FixtureAddFriendEndpoint;
        let email = FriendRequestEmail::new("friend@example.com").expect("fixture address");
        endpoint
            .add_friend(&email)
            .await
            .expect("fixture must accept");
    }
}
