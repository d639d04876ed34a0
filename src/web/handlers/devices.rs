//! Device linking handlers; both routes require a session

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;

use crate::errors::AppResult;
use crate::models::{Device, LinkDeviceRequest};
use crate::web::AppState;
use crate::web::extractors::AuthUser;
use crate::web::responses::ErrorResponse;

#[utoipa::path(
    post,
    path = "/api/devices/link",
    tag = "devices",
    request_body = LinkDeviceRequest,
    responses(
        (status = 200, description = "Device linked to the caller", body = Device),
        (status = 400, description = "MAC address missing", body = ErrorResponse),
        (status = 401, description = "No active session", body = ErrorResponse),
    )
)]
pub async fn link_device(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Device>> {
    // Any body without a string `mac` is treated as missing the MAC
    let mac = body
        .ok()
        .and_then(|Json(body)| body.get("mac").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_default();

    let device = state.catalog.link_device(&mac, &user.id).await?;
    Ok(Json(device))
}

#[utoipa::path(
    get,
    path = "/api/devices",
    tag = "devices",
    responses(
        (status = 200, description = "Devices linked to the caller", body = [Device]),
        (status = 401, description = "No active session", body = ErrorResponse),
    )
)]
pub async fn list_devices(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Vec<Device>>> {
    Ok(Json(state.catalog.list_devices_for_user(&user.id).await?))
}
