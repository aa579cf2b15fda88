//! Error types for `amity-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The request has the wrong shape (wrong arity, duplicates, empty list).
  #[error("invalid request: {0}")]
  InvalidRequest(String),

  #[error("invalid email address: {0:?}")]
  InvalidEmail(String),

  /// A failure reported by the relationship store, passed through untouched.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error.
  pub fn storage<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(e))
  }

  /// `true` for errors caused by the caller's input rather than the store.
  pub fn is_validation(&self) -> bool {
    matches!(self, Self::InvalidRequest(_) | Self::InvalidEmail(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
