//! Channel CRUD handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use crate::errors::{AppError, AppResult};
use crate::models::{Channel, ChannelInput};
use crate::services::catalog::CHANNEL_RESOURCE;
use crate::web::AppState;
use crate::web::responses::{ErrorResponse, json_rejection};

/// A path id that is not an integer cannot name a channel
fn parse_channel_id(raw: &str) -> AppResult<i32> {
    raw.parse::<i32>()
        .map_err(|_| AppError::not_found(CHANNEL_RESOURCE, raw))
}

#[utoipa::path(
    get,
    path = "/api/channels",
    tag = "channels",
    responses(
        (status = 200, description = "All channels in ascending id order", body = [Channel]),
    )
)]
pub async fn list_channels(State(state): State<AppState>) -> AppResult<Json<Vec<Channel>>> {
    Ok(Json(state.catalog.list_channels().await?))
}

#[utoipa::path(
    get,
    path = "/api/channels/{id}",
    tag = "channels",
    params(("id" = i32, Path, description = "Channel id")),
    responses(
        (status = 200, description = "Channel found", body = Channel),
        (status = 404, description = "Channel not found", body = ErrorResponse),
    )
)]
pub async fn get_channel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Channel>> {
    let id = parse_channel_id(&id)?;
    Ok(Json(state.catalog.get_channel(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/channels",
    tag = "channels",
    request_body = ChannelInput,
    responses(
        (status = 201, description = "Channel created", body = Channel),
        (status = 400, description = "Validation failed", body = ErrorResponse),
    )
)]
pub async fn create_channel(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Channel>)> {
    let Json(body) = body.map_err(json_rejection)?;
    let channel = state.catalog.create_channel(&body).await?;
    Ok((StatusCode::CREATED, Json(channel)))
}

#[utoipa::path(
    put,
    path = "/api/channels/{id}",
    tag = "channels",
    params(("id" = i32, Path, description = "Channel id")),
    request_body(content = ChannelInput, description = "Any subset of channel fields"),
    responses(
        (status = 200, description = "Channel updated", body = Channel),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Channel not found", body = ErrorResponse),
    )
)]
pub async fn update_channel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Channel>> {
    let id = parse_channel_id(&id)?;
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            // An unknown id is reported before a malformed body
            state.catalog.get_channel(id).await?;
            return Err(json_rejection(rejection));
        }
    };
    Ok(Json(state.catalog.update_channel(id, &body).await?))
}

#[utoipa::path(
    delete,
    path = "/api/channels/{id}",
    tag = "channels",
    params(("id" = i32, Path, description = "Channel id")),
    responses(
        (status = 204, description = "Channel deleted"),
        (status = 404, description = "Channel not found", body = ErrorResponse),
    )
)]
pub async fn delete_channel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_channel_id(&id)?;
    state.catalog.delete_channel(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
