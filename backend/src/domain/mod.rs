//! Domain primitives and the submission flow.
//!
//! Purpose: define strongly typed domain entities and the friend-request
//! submission orchestration consumed by the HTTP adapters. Keep types
//! immutable and document invariants and serialisation contracts (serde)
//! in each type's Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — transport-agnostic error payload for adapters.
//! - `FriendRequestEmail` / `FriendRequestInput` — validated submission input.
//! - `SubmissionController` / `SubmissionOutcome` — one attempt, one outcome.
//! - `UserId` / `SessionUser` — identity types copied into sessions.

pub mod error;
pub mod friend_request;
pub mod ports;
pub mod submission;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::friend_request::{
    FriendRequestEmail, FriendRequestInput, FriendRequestValidationError,
};
pub use self::submission::{SubmissionController, SubmissionOutcome, SubmissionPhase};
pub use self::user::{SessionUser, UserId, UserIdValidationError};

/// Convenient result alias for adapter-facing fallible operations.
pub type ApiResult<T> = Result<T, Error>;
