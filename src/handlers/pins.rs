use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::PinDto;
use crate::state::AppState;
use crate::{extractor, fetcher, normalizer};

// ── Query params ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PinQuery {
    pub url: Option<String>,
}

// ── Handler ────────────────────────────────────────────────────────────────

/// GET /?url=<encoded-pin-url>
///
/// Fetches the pin page, pulls out the embedded closeup payload and returns
/// the normalized pin.
pub async fn get_pin(
    State(state): State<AppState>,
    query: Result<Query<PinQuery>, QueryRejection>,
) -> AppResult<Json<PinDto>> {
    let Query(params) = query?;
    let url = params
        .url
        .filter(|u| !u.is_empty())
        .ok_or(AppError::MissingParameter)?;

    let html = fetcher::fetch_page(&state.http_client, &url).await?;
    let payload = extractor::extract_pin_payload(&html)?;
    let pin = normalizer::normalize(&payload)?;

    tracing::info!(
        url = %url,
        pin_id = ?pin.pin_id,
        media_type = ?pin.media_type,
        "Pin extracted"
    );

    Ok(Json(pin))
}
