//! OpenAPI document assembled from the handler annotations

use utoipa::OpenApi;

use crate::models::{Channel, ChannelInput, Device, LinkDeviceRequest, User};
use crate::web::handlers;
use crate::web::responses::{ErrorResponse, HealthResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "IPTV Catalog API",
        description = "Personal IPTV channel catalog with M3U export and device linking"
    ),
    paths(
        handlers::channels::list_channels,
        handlers::channels::get_channel,
        handlers::channels::create_channel,
        handlers::channels::update_channel,
        handlers::channels::delete_channel,
        handlers::playlist::export_playlist,
        handlers::devices::link_device,
        handlers::devices::list_devices,
        handlers::auth::login,
        handlers::auth::callback,
        handlers::auth::me,
        handlers::auth::logout,
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::health::liveness_check,
    ),
    components(schemas(
        Channel,
        ChannelInput,
        Device,
        LinkDeviceRequest,
        User,
        ErrorResponse,
        HealthResponse,
    )),
    tags(
        (name = "channels", description = "Channel catalog and playlist export"),
        (name = "devices", description = "Device linking (login required)"),
        (name = "auth", description = "Login handshake and session"),
        (name = "health", description = "Liveness and readiness probes"),
    )
)]
pub struct ApiDoc;

pub fn openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
