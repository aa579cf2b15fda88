//! JSON API for Amity.
//!
//! Exposes an axum [`Router`] backed by a [`RelationshipEngine`] over any
//! [`RelationshipStore`]. Every endpoint is a `POST` taking and returning
//! JSON; validation failures are 400 and store failures 500, both with an
//! `{"error": "..."}` body. Transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", amity_api::api_router(engine.clone()))
//! ```

pub mod error;
pub mod friends;
pub mod subscriptions;
pub mod users;

use amity_core::{RelationshipEngine, store::RelationshipStore};
use axum::{Router, routing::post};

pub use error::ApiError;

/// Build a fully-materialised API router for `engine`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(engine: RelationshipEngine<S>) -> Router<()>
where
  S: RelationshipStore + 'static,
{
  Router::new()
    // Accounts
    .route("/users/createUser", post(users::create::<S>))
    // Friends
    .route("/friends/createConnection", post(friends::create_connection::<S>))
    .route("/friends/showFriendsByEmail", post(friends::list::<S>))
    .route("/friends/showCommonFriendList", post(friends::common::<S>))
    // Subscriptions
    .route("/friends/subscribeFromEmail", post(subscriptions::subscribe::<S>))
    .route("/friends/blockSubscribeByEmail", post(subscriptions::block::<S>))
    .route(
      "/friends/showSubscribingEmailListByEmail",
      post(subscriptions::recipients::<S>),
    )
    .with_state(engine)
}
