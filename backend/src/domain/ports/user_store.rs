//! Driven port for looking up stored session users.

use async_trait::async_trait;

use crate::domain::user::{SessionUser, UserId};

/// Errors surfaced while reading the user store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserStoreError {
    /// Transport to the store failed.
    #[error("user store transport failed: {message}")]
    Transport { message: String },
    /// The store answered with a non-success status.
    #[error("user store rejected the request with status {status}")]
    Rejected { status: u16 },
    /// The stored record could not be decoded.
    #[error("stored user record could not be decoded: {message}")]
    Decode { message: String },
}

impl UserStoreError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn rejected(status: u16) -> Self {
        Self::Rejected { status }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for fetching the stored record behind a session user id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the stored user for `id`, or `None` when no record exists.
    ///
    /// # Errors
    ///
    /// Returns a [`UserStoreError`] when the store is unreachable,
    /// rejects the request, or holds an undecodable record.
    async fn fetch_user(&self, id: &UserId) -> Result<Option<SessionUser>, UserStoreError>;
}

/// Fixture implementation with no stored users.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureUserStore;

#[async_trait]
impl UserStore for FixtureUserStore {
    async fn fetch_user(&self, _id: &UserId) -> Result<Option<SessionUser>, UserStoreError> {
        Ok(None)
    }
}
