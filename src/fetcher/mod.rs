use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;

use crate::error::AppResult;

/// Mobile Chrome; the closeup page serves its relay payload to it.
pub const USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Mobile Safari/537.36";
pub const ACCEPT_HEADER: &str = "application/json, text/javascript, */*; q=0.01";

/// Build the outbound client with the fixed browser-like header set.
/// Redirects follow the reqwest default policy.
pub fn build_client() -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
}

/// GET `url` and return the body text. Non-2xx statuses are errors.
pub async fn fetch_page(client: &Client, url: &str) -> AppResult<String> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| {
            tracing::warn!(error = ?e, url = %url, "Failed to fetch pin page");
            e
        })?;

    let html = response.text().await?;
    tracing::debug!(url = %url, bytes = html.len(), "Fetched pin page");
    Ok(html)
}
