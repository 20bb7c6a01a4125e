use reqwest::Client;

use crate::fetcher;

/// Shared application state passed to all handlers.
/// Holds the outbound client only; nothing here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    pub http_client: Client,
}

impl AppState {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(AppState {
            http_client: fetcher::build_client()?,
        })
    }
}
