use scraper::{Html, Selector};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Inline script elements carrying server-rendered relay responses.
pub const RELAY_SCRIPT_SELECTOR: &str =
    r#"script[data-relay-response="true"][type="application/json"]"#;
/// `requestParameters.name` of the relay response describing the pin itself.
pub const CLOSEUP_QUERY_NAME: &str = "CloseupDetailQuery";

/// Find the closeup relay payload embedded in `html`.
///
/// Candidates whose text is not valid JSON are skipped. When several
/// candidates match, the last one in document order wins.
pub fn extract_pin_payload(html: &str) -> AppResult<Value> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(RELAY_SCRIPT_SELECTOR)
        .map_err(|e| AppError::Internal(format!("invalid relay selector: {e:?}")))?;

    document
        .select(&selector)
        .filter_map(|el| {
            let text = el.text().collect::<String>();
            match serde_json::from_str::<Value>(text.trim()) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping relay candidate that is not valid JSON");
                    None
                }
            }
        })
        .filter(is_closeup_query)
        .last()
        .ok_or(AppError::NotFound)
}

fn is_closeup_query(candidate: &Value) -> bool {
    candidate
        .pointer("/requestParameters/name")
        .and_then(Value::as_str)
        == Some(CLOSEUP_QUERY_NAME)
}
