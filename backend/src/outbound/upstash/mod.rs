//! Upstash Redis REST adapters.
//!
//! Upstash exposes Redis over HTTPS: the command and its arguments
//! travel as URL path segments and the reply arrives wrapped in a
//! `{"result": ...}` envelope. The client here speaks that protocol;
//! `UpstashUserStore` implements the `UserStore` port on top of it.

mod client;
mod user_store;

pub use client::{RedisCommand, UpstashClient, UpstashError};
pub use user_store::UpstashUserStore;
