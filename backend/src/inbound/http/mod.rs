//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod friends;
pub mod health;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use crate::domain::ApiResult;
