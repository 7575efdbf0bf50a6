//! Upstash-backed implementation of the `UserStore` port.
//!
//! User records live under `user:{id}` keys, stored either as a JSON
//! string or as a structured value.

use async_trait::async_trait;

use super::client::{RedisCommand, UpstashClient, UpstashError};
use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::user::{SessionUser, UserId};

const USER_KEY_PREFIX: &str = "user:";

/// User store reading records from one Upstash database.
pub struct UpstashUserStore {
    client: UpstashClient,
}

impl UpstashUserStore {
    pub fn new(client: UpstashClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserStore for UpstashUserStore {
    async fn fetch_user(&self, id: &UserId) -> Result<Option<SessionUser>, UserStoreError> {
        let key = user_key(id);
        let result = self
            .client
            .fetch(RedisCommand::Get, &[key.as_str()])
            .await
            .map_err(map_client_error)?;
        decode_user(result)
    }
}

fn user_key(id: &UserId) -> String {
    format!("{USER_KEY_PREFIX}{id}")
}

fn decode_user(result: serde_json::Value) -> Result<Option<SessionUser>, UserStoreError> {
    let user = match result {
        // GET on a missing key answers a null result.
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::String(raw) => serde_json::from_str(&raw)
            .map_err(|error| UserStoreError::decode(format!("invalid user JSON: {error}")))?,
        other => serde_json::from_value(other)
            .map_err(|error| UserStoreError::decode(format!("invalid user value: {error}")))?,
    };
    Ok(Some(user))
}

fn map_client_error(error: UpstashError) -> UserStoreError {
    match error {
        UpstashError::Rejected { status } => UserStoreError::rejected(status),
        UpstashError::Decode { message } => UserStoreError::decode(message),
        UpstashError::InvalidRestUrl { .. }
        | UpstashError::Transport { .. }
        | UpstashError::Client(_) => UserStoreError::transport(error.to_string()),
    }
}
