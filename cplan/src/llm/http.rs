//! Shared HTTP plumbing for the provider clients
//!
//! One request, one response: status mapping only, no retries.

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::LlmError;

/// Send a prepared JSON request and decode the JSON reply
pub(super) async fn send_json<T: DeserializeOwned>(request: RequestBuilder, timeout: Duration) -> Result<T, LlmError> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            debug!(?timeout, "send_json: request timed out");
            LlmError::Timeout(timeout)
        } else {
            debug!(error = %e, "send_json: network error");
            LlmError::Network(e)
        }
    })?;

    let status = response.status().as_u16();

    if status == 429 {
        debug!("send_json: rate limited (429)");
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        return Err(LlmError::RateLimited { retry_after });
    }

    if !response.status().is_success() {
        debug!(%status, "send_json: API error");
        let text = response.text().await.unwrap_or_default();
        return Err(LlmError::api(status, &text));
    }

    let body = response.text().await?;
    debug!(body_len = body.len(), "send_json: success");
    Ok(serde_json::from_str(&body)?)
}
