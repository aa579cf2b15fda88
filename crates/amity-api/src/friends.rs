//! Handlers for `/friends` endpoints.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `POST` | `/friends/createConnection` | `{"friends": [a, b]}` |
//! | `POST` | `/friends/showFriendsByEmail` | `{"email": e}` |
//! | `POST` | `/friends/showCommonFriendList` | `{"friends": [a, b, ...]}` |

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use amity_core::{
  RelationshipEngine,
  request::{
    CommonFriendListRequest, CommonFriendListResponse, FriendConnectionRequest,
    FriendConnectionResponse, FriendListRequest, FriendListResponse,
  },
  store::RelationshipStore,
};

use crate::error::ApiError;

// ─── Connect ──────────────────────────────────────────────────────────────────

/// `POST /friends/createConnection`
pub async fn create_connection<S>(
  State(engine): State<RelationshipEngine<S>>,
  payload: Result<Json<FriendConnectionRequest>, JsonRejection>,
) -> Result<Json<FriendConnectionResponse>, ApiError>
where
  S: RelationshipStore + 'static,
{
  let Json(req) = payload?;
  Ok(Json(engine.create_friend_connection(req).await?))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `POST /friends/showFriendsByEmail`
pub async fn list<S>(
  State(engine): State<RelationshipEngine<S>>,
  payload: Result<Json<FriendListRequest>, JsonRejection>,
) -> Result<Json<FriendListResponse>, ApiError>
where
  S: RelationshipStore + 'static,
{
  let Json(req) = payload?;
  Ok(Json(engine.friends(req).await?))
}

// ─── Common ───────────────────────────────────────────────────────────────────

/// `POST /friends/showCommonFriendList`
pub async fn common<S>(
  State(engine): State<RelationshipEngine<S>>,
  payload: Result<Json<CommonFriendListRequest>, JsonRejection>,
) -> Result<Json<CommonFriendListResponse>, ApiError>
where
  S: RelationshipStore + 'static,
{
  let Json(req) = payload?;
  Ok(Json(engine.common_friends(req).await?))
}
