//! HTTP transport: one GET per forecast, shared client.

use std::time::Duration;

use reqwest::{Client, Url};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::RawForecast;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the shared HTTP client. Providers embed credentials in the request
/// URL, so no default headers are needed.
pub fn client() -> Result<Client> {
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    Ok(client)
}

/// Issue a single GET and parse the response body as JSON.
///
/// Non-2xx responses and non-JSON bodies are errors; there is no retry.
pub async fn get_json(http: &Client, url: Url) -> Result<RawForecast> {
    let res = http.get(url).send().await?;

    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        return Err(Error::Http {
            status,
            body: truncate_body(&body),
        });
    }

    let value: serde_json::Value = serde_json::from_str(&body)
        .map_err(|e| Error::Parse(format!("response body was not valid JSON: {e}")))?;

    debug!(bytes = body.len(), "fetched forecast document");

    Ok(RawForecast(value))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
