//! Friend-request input validation.
//!
//! The types here are the single source of truth for what counts as a
//! submittable friend request: every dispatch path goes through
//! [`FriendRequestEmail`], so an unvalidated address can never reach the
//! remote endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors raised while parsing friend-request input.
///
/// The `Display` output is written for end users; adapters surface it
/// verbatim as the field error attached to the email input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendRequestValidationError {
    /// The payload has no `email` field at all.
    MissingEmail,
    /// The `email` field is present but not a JSON string.
    EmailNotAString,
    EmptyEmail,
    ContainsWhitespace,
    MissingAtSign,
    MultipleAtSigns,
    EmptyLocalPart,
    EmptyDomain,
    DomainMissingDot,
    EmptyDomainLabel,
}

impl fmt::Display for FriendRequestValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEmail => write!(f, "email is required"),
            Self::EmailNotAString => write!(f, "email must be a string"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::ContainsWhitespace => write!(f, "email must not contain whitespace"),
            Self::MissingAtSign => write!(f, "email must contain an @ sign"),
            Self::MultipleAtSigns => write!(f, "email must contain exactly one @ sign"),
            Self::EmptyLocalPart => write!(f, "email must have a local part before the @ sign"),
            Self::EmptyDomain => write!(f, "email must have a domain after the @ sign"),
            Self::DomainMissingDot => write!(f, "email domain must contain a dot"),
            Self::EmptyDomainLabel => write!(f, "email domain must not contain empty labels"),
        }
    }
}

impl std::error::Error for FriendRequestValidationError {}

/// Syntactically valid email address for a friend request.
///
/// ## Invariants
/// - Non-empty, no whitespace anywhere.
/// - Exactly one `@` with a non-empty local part before it.
/// - The domain contains at least one dot with non-empty labels on
///   either side of every dot.
///
/// Validation is pure and idempotent: re-validating the string form of
/// an existing value always succeeds and returns it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FriendRequestEmail(String);

impl FriendRequestEmail {
    /// Validate and construct a [`FriendRequestEmail`].
    ///
    /// # Errors
    ///
    /// Returns the first [`FriendRequestValidationError`] the address
    /// violates, checked in the order listed on the type.
    pub fn new(email: impl Into<String>) -> Result<Self, FriendRequestValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, FriendRequestValidationError> {
        validate_email_format(&email)?;
        Ok(Self(email))
    }

    /// Re-run the format predicate over the already-validated value.
    ///
    /// Used for defence-in-depth immediately before dispatch; by
    /// construction this cannot fail for a value built through
    /// [`FriendRequestEmail::new`].
    pub fn revalidated(self) -> Result<Self, FriendRequestValidationError> {
        Self::from_owned(self.0)
    }
}

fn validate_email_format(email: &str) -> Result<(), FriendRequestValidationError> {
    if email.is_empty() {
        return Err(FriendRequestValidationError::EmptyEmail);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(FriendRequestValidationError::ContainsWhitespace);
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or(FriendRequestValidationError::MissingAtSign)?;
    if domain.contains('@') {
        return Err(FriendRequestValidationError::MultipleAtSigns);
    }
    if local.is_empty() {
        return Err(FriendRequestValidationError::EmptyLocalPart);
    }
    if domain.is_empty() {
        return Err(FriendRequestValidationError::EmptyDomain);
    }
    if !domain.contains('.') {
        return Err(FriendRequestValidationError::DomainMissingDot);
    }
    if domain.split('.').any(str::is_empty) {
        return Err(FriendRequestValidationError::EmptyDomainLabel);
    }

    Ok(())
}

impl AsRef<str> for FriendRequestEmail {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FriendRequestEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<FriendRequestEmail> for String {
    fn from(value: FriendRequestEmail) -> Self {
        value.0
    }
}

impl TryFrom<String> for FriendRequestEmail {
    type Error = FriendRequestValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Validated friend-request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequestInput {
    /// Address of the user to befriend.
    pub email: FriendRequestEmail,
}

impl FriendRequestInput {
    /// Validate an untyped JSON payload into a [`FriendRequestInput`].
    ///
    /// Accepts arbitrary JSON so callers can gate submission before any
    /// network traffic happens: a missing `email` field, a non-string
    /// value, and every format violation each map to a distinct error.
    ///
    /// # Errors
    ///
    /// Returns a [`FriendRequestValidationError`] describing the first
    /// violated rule.
    pub fn validate(value: &serde_json::Value) -> Result<Self, FriendRequestValidationError> {
        let field = value
            .get("email")
            .ok_or(FriendRequestValidationError::MissingEmail)?;
        let raw = field
            .as_str()
            .ok_or(FriendRequestValidationError::EmailNotAString)?;
        Ok(Self {
            email: FriendRequestEmail::new(raw)?,
        })
    }
}

#[cfg(test)]
mod tests;
