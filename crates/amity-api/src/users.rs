//! Handler for `POST /users/createUser`, body `{"email": "..."}`.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use amity_core::{
  RelationshipEngine,
  request::{CreateUserRequest, CreateUserResponse},
  store::RelationshipStore,
};

use crate::error::ApiError;

pub async fn create<S>(
  State(engine): State<RelationshipEngine<S>>,
  payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<CreateUserResponse>, ApiError>
where
  S: RelationshipStore + 'static,
{
  let Json(req) = payload?;
  Ok(Json(engine.create_user(req).await?))
}
