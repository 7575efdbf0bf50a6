//! Driven ports consumed by the domain.
//!
//! The domain owns the request shapes and error contracts so the
//! submission flow stays adapter-agnostic.

pub mod add_friend_endpoint;
pub mod user_store;

pub use self::add_friend_endpoint::{
    AddFriendEndpoint, AddFriendEndpointError, FixtureAddFriendEndpoint,
};
pub use self::user_store::{FixtureUserStore, UserStore, UserStoreError};
