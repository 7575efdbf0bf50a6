//! Minimal Upstash Redis REST client.

use std::time::Duration;

use reqwest::{header, Client, Url};
use serde::Deserialize;

/// Redis read commands supported over the REST protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedisCommand {
    Zrange,
    Sismember,
    Get,
    Smembers,
}

impl RedisCommand {
    /// Wire name of the command, used as the first path segment.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zrange => "zrange",
            Self::Sismember => "sismember",
            Self::Get => "get",
            Self::Smembers => "smembers",
        }
    }
}

/// Errors surfaced by the REST client.
#[derive(Debug, thiserror::Error)]
pub enum UpstashError {
    /// The configured REST URL cannot carry path segments.
    #[error("Upstash REST URL cannot be a base: {url}")]
    InvalidRestUrl { url: String },
    /// Transport to Upstash failed.
    #[error("Upstash transport failed: {message}")]
    Transport { message: String },
    /// Upstash answered with a non-success status.
    #[error("Upstash rejected the request with status {status}")]
    Rejected { status: u16 },
    /// The response envelope could not be decoded.
    #[error("Upstash response could not be decoded: {message}")]
    Decode { message: String },
    /// The underlying reqwest client failed to build.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct ResultEnvelope {
    result: serde_json::Value,
}

/// Client for one Upstash database, authorised with a bearer token.
pub struct UpstashClient {
    client: Client,
    rest_url: Url,
    token: String,
}

impl UpstashClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(rest_url: Url, token: String, timeout: Duration) -> Result<Self, UpstashError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            rest_url,
            token,
        })
    }

    /// Run `command` with `args` and return the unwrapped `result` value.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstashError`] when the URL cannot be formed, the
    /// request fails in transit, Upstash answers with an error status,
    /// or the envelope does not decode.
    pub async fn fetch(
        &self,
        command: RedisCommand,
        args: &[&str],
    ) -> Result<serde_json::Value, UpstashError> {
        let url = self.command_url(command, args)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header(header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|error| UpstashError::Transport {
                message: error.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstashError::Rejected {
                status: status.as_u16(),
            });
        }

        let envelope: ResultEnvelope =
            response
                .json()
                .await
                .map_err(|error| UpstashError::Decode {
                    message: error.to_string(),
                })?;
        Ok(envelope.result)
    }

    // Path segments are percent-encoded by the url crate, so keys with
    // reserved characters travel intact.
    fn command_url(&self, command: RedisCommand, args: &[&str]) -> Result<Url, UpstashError> {
        let mut url = self.rest_url.clone();
        url.path_segments_mut()
            .map_err(|()| UpstashError::InvalidRestUrl {
                url: self.rest_url.to_string(),
            })?
            .pop_if_empty()
            .push(command.as_str())
            .extend(args);
        Ok(url)
    }
}
