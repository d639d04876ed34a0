use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::errors::AppResult;
use crate::playlist::{M3U_CONTENT_TYPE, M3U_FILENAME};
use crate::web::AppState;

/// Download the catalog as an extended M3U playlist
#[utoipa::path(
    get,
    path = "/api/playlist.m3u",
    tag = "channels",
    responses(
        (status = 200, description = "Extended M3U playlist", content_type = "text/plain", body = String),
    )
)]
pub async fn export_playlist(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let body = state.catalog.export_playlist().await?;
    Ok((
        [
            (header::CONTENT_TYPE, M3U_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", M3U_FILENAME),
            ),
        ],
        body,
    ))
}
