pub mod espn_api;
pub mod mlb_stats_api;

pub use espn_api::EspnApiClient;
pub use mlb_stats_api::MlbStatsApiClient;

use crate::error::{DashboardError, Result};
use reqwest::header::CACHE_CONTROL;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Send a GET that bypasses upstream caches and decode the JSON body.
/// Non-2xx statuses and unparseable bodies are errors, never partial data.
pub(crate) async fn send_json<T: DeserializeOwned>(url: &str, request: RequestBuilder) -> Result<T> {
    tracing::debug!("GET {}", url);

    let response = request.header(CACHE_CONTROL, "no-cache").send().await?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("Upstream {} responded with {}", url, status);
        return Err(DashboardError::UpstreamStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    let parsed = serde_json::from_str(&body)?;
    Ok(parsed)
}

/// Upstream numbers show up as JSON numbers, numeric strings (".312", "5"),
/// or `{ "value": .. }` objects depending on the endpoint
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Object(map) => map.get("value").and_then(value_as_f64),
        _ => None,
    }
}

/// Ids are strings on some ESPN endpoints and numbers on others
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}
