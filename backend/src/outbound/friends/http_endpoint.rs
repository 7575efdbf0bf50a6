//! Reqwest-backed add-friend endpoint adapter.
//!
//! This adapter owns transport details only: request serialisation,
//! timeout and HTTP error mapping, and extraction of the server's
//! rejection message from error bodies.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::json;

use crate::domain::friend_request::FriendRequestEmail;
use crate::domain::ports::{AddFriendEndpoint, AddFriendEndpointError};

/// Errors raised while constructing the adapter.
#[derive(Debug, thiserror::Error)]
pub enum FriendsEndpointBuildError {
    /// The configured base URL cannot carry path segments.
    #[error("friends API base URL cannot be a base: {url}")]
    CannotBeABase { url: String },
    /// The underlying reqwest client failed to build.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Add-friend adapter that performs HTTP POST requests against one endpoint.
pub struct FriendsHttpEndpoint {
    client: Client,
    endpoint: Url,
}

impl FriendsHttpEndpoint {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// `base` is the root of the friends API; the submission path is
    /// appended here so callers configure one URL only.
    ///
    /// # Errors
    ///
    /// Returns an error when `base` cannot carry path segments or the
    /// reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, FriendsEndpointBuildError> {
        let endpoint = submission_url(&base)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl AddFriendEndpoint for FriendsHttpEndpoint {
    async fn add_friend(&self, email: &FriendRequestEmail) -> Result<(), AddFriendEndpointError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&json!({ "email": email.as_ref() }))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(rejection_from_response(status, body.as_ref()))
    }
}

fn submission_url(base: &Url) -> Result<Url, FriendsEndpointBuildError> {
    let mut endpoint = base.clone();
    endpoint
        .path_segments_mut()
        .map_err(|()| FriendsEndpointBuildError::CannotBeABase {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(["api", "friends", "add"]);
    Ok(endpoint)
}

fn map_transport_error(error: reqwest::Error) -> AddFriendEndpointError {
    if error.is_timeout() {
        AddFriendEndpointError::timeout(error.to_string())
    } else {
        AddFriendEndpointError::transport(error.to_string())
    }
}

fn rejection_from_response(status: StatusCode, body: &[u8]) -> AddFriendEndpointError {
    AddFriendEndpointError::rejected(status.as_u16(), extract_rejection_message(body))
}

/// Pull the user-facing rejection text out of an error body.
///
/// Servers answer with a JSON object carrying a `message` or `error`
/// string, a bare JSON string, or plain text. Anything blank or
/// undecipherable yields `None` so the caller falls back to its
/// generic wording.
fn extract_rejection_message(body: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(body);
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) {
        let candidate = match &value {
            serde_json::Value::Object(fields) => ["message", "error"]
                .iter()
                .find_map(|key| fields.get(*key).and_then(serde_json::Value::as_str)),
            serde_json::Value::String(message) => Some(message.as_str()),
            _ => None,
        };
        return candidate.map(str::trim).filter(|m| !m.is_empty()).map(preview);
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(preview(trimmed))
    }
}

fn preview(message: &str) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = message.split_whitespace().collect::<Vec<_>>().join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::message_field(r#"{"message":"Already friends"}"#, Some("Already friends"))]
    #[case::error_field(r#"{"error":"User not found"}"#, Some("User not found"))]
    #[case::message_wins(
        r#"{"message":"This person is blocked","error":"ignored"}"#,
        Some("This person is blocked")
    )]
    #[case::bare_string(r#""You already sent a request""#, Some("You already sent a request"))]
    #[case::plain_text("upstream exploded", Some("upstream exploded"))]
    #[case::blank_message(r#"{"message":"   "}"#, None)]
    #[case::non_string_message(r#"{"message":42}"#, None)]
    #[case::json_number("42", None)]
    #[case::empty_body("", None)]
    #[case::whitespace_body("   \n", None)]
    fn extracts_rejection_messages(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            extract_rejection_message(body.as_bytes()).as_deref(),
            expected
        );
    }

    #[test]
    fn long_messages_are_compacted_and_capped() {
        let body = format!(r#"{{"message":"{}"}}"#, "word ".repeat(100));
        let message = extract_rejection_message(body.as_bytes()).expect("message should extract");
        assert!(message.ends_with("..."), "long messages should be elided");
        assert_eq!(message.chars().count(), 163);
        assert!(!message.contains("  "), "whitespace runs should collapse");
    }

    #[rstest]
    #[case::bare_host("https://social.example.com", "https://social.example.com/api/friends/add")]
    #[case::trailing_slash(
        "https://social.example.com/",
        "https://social.example.com/api/friends/add"
    )]
    #[case::sub_path(
        "https://social.example.com/v2",
        "https://social.example.com/v2/api/friends/add"
    )]
    fn builds_submission_url_from_base(#[case] base: &str, #[case] expected: &str) {
        let base = Url::parse(base).expect("base should parse");
        let endpoint = submission_url(&base).expect("URL should build");
        assert_eq!(endpoint.as_str(), expected);
    }

    #[test]
    fn rejects_bases_that_cannot_carry_paths() {
        let base = Url::parse("mailto:ops@example.com").expect("URL should parse");
        let error = submission_url(&base).expect_err("opaque URLs must fail");
        assert!(matches!(
            error,
            FriendsEndpointBuildError::CannotBeABase { .. }
        ));
    }

    #[rstest]
    #[case::with_json_body(
        StatusCode::CONFLICT,
        r#"{"message":"Already friends"}"#.as_bytes(),
        409,
        Some("Already friends")
    )]
    #[case::bodyless(StatusCode::BAD_GATEWAY, b"", 502, None)]
    fn maps_error_statuses_to_rejections(
        #[case] status: StatusCode,
        #[case] body: &[u8],
        #[case] expected_status: u16,
        #[case] expected_message: Option<&str>,
    ) {
        let error = rejection_from_response(status, body);
        match error {
            AddFriendEndpointError::Rejected { status, message } => {
                assert_eq!(status, expected_status);
                assert_eq!(message.as_deref(), expected_message);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
