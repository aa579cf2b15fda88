//! Core types, validation, and the relationship query engine for Amity.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::RelationshipStore`]; the HTTP surface
//! drives [`engine::RelationshipEngine`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod email;
pub mod engine;
pub mod error;
pub mod mention;
pub mod relationship;
pub mod request;
pub mod sets;
pub mod store;

pub use email::Email;
pub use engine::RelationshipEngine;
pub use error::{Error, Result};
