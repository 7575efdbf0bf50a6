//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AddFriendEndpoint, UserStore};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub add_friend: Arc<dyn AddFriendEndpoint>,
    pub users: Arc<dyn UserStore>,
}

impl HttpState {
    /// Bundle the port implementations the handlers dispatch through.
    pub fn new(add_friend: Arc<dyn AddFriendEndpoint>, users: Arc<dyn UserStore>) -> Self {
        Self { add_friend, users }
    }
}
