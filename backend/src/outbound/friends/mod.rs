//! Friend-request outbound adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `AddFriendEndpoint` port.

mod http_endpoint;

pub use http_endpoint::{FriendsEndpointBuildError, FriendsHttpEndpoint};
