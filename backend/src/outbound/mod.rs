//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and wire formats.
//! They own transport details only and contain no submission logic:
//!
//! - **friends**: reqwest-backed friend-request endpoint client
//! - **upstash**: Upstash Redis REST client and the user store built on it

pub mod friends;
pub mod upstash;
