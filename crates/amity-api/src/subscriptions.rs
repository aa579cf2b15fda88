//! Handlers for subscription, blocking, and broadcast endpoints.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `POST` | `/friends/subscribeFromEmail` | `{"requestor": r, "target": t}` |
//! | `POST` | `/friends/blockSubscribeByEmail` | `{"requestor": r, "target": t}` |
//! | `POST` | `/friends/showSubscribingEmailListByEmail` | `{"sender": s, "text": "..."}` |

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use amity_core::{
  RelationshipEngine,
  request::{
    BlockSubscribeRequest, BlockSubscribeResponse, BroadcastRequest,
    BroadcastResponse, SubscribeRequest, SubscribeResponse,
  },
  store::RelationshipStore,
};

use crate::error::ApiError;

/// `POST /friends/subscribeFromEmail`
pub async fn subscribe<S>(
  State(engine): State<RelationshipEngine<S>>,
  payload: Result<Json<SubscribeRequest>, JsonRejection>,
) -> Result<Json<SubscribeResponse>, ApiError>
where
  S: RelationshipStore + 'static,
{
  let Json(req) = payload?;
  Ok(Json(engine.subscribe(req).await?))
}

/// `POST /friends/blockSubscribeByEmail`
pub async fn block<S>(
  State(engine): State<RelationshipEngine<S>>,
  payload: Result<Json<BlockSubscribeRequest>, JsonRejection>,
) -> Result<Json<BlockSubscribeResponse>, ApiError>
where
  S: RelationshipStore + 'static,
{
  let Json(req) = payload?;
  Ok(Json(engine.block_subscribe(req).await?))
}

/// `POST /friends/showSubscribingEmailListByEmail`
///
/// Who receives `text` when `sender` posts it.
pub async fn recipients<S>(
  State(engine): State<RelationshipEngine<S>>,
  payload: Result<Json<BroadcastRequest>, JsonRejection>,
) -> Result<Json<BroadcastResponse>, ApiError>
where
  S: RelationshipStore + 'static,
{
  let Json(req) = payload?;
  Ok(Json(engine.broadcast_recipients(req).await?))
}
