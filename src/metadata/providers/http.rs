//! Shared HTTP plumbing for provider clients.
//!
//! Maps reqwest failures onto [`ProviderError`] so every provider reports
//! transport, status, and decoding problems the same way. Requests are never
//! retried.

use std::fmt;
use std::time::Duration;

use reelsearch_common::{ProviderError, ProviderId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

/// Per-request timeout. The dispatcher's batch timeout is usually tighter.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client shared by one provider's calls.
pub(crate) fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("reelsearch/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            warn!("Failed to build HTTP client with timeout: {}", e);
            reqwest::Client::new()
        })
}

/// Mask every occurrence of `secret` in `url` for logging.
pub(crate) fn redact(url: &str, secret: Option<&str>) -> String {
    match secret {
        Some(secret) if !secret.is_empty() => url.replace(secret, "***"),
        _ => url.to_string(),
    }
}

/// GET `url` with query `params` and return the body as text.
///
/// `url` is logged without its parameters, and with `secret` masked for
/// providers that put their API key in the path.
pub(crate) async fn get_text(
    client: &reqwest::Client,
    provider: ProviderId,
    url: &str,
    params: &[(&str, &str)],
    secret: Option<&str>,
) -> Result<String, ProviderError> {
    debug!(provider = %provider, url = %redact(url, secret), "Provider request");

    let resp = client
        .get(url)
        .query(params)
        .send()
        .await
        .map_err(|e| ProviderError::request(provider, e.without_url().to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
        });
    }

    resp.text()
        .await
        .map_err(|e| ProviderError::request(provider, e.without_url().to_string()))
}

/// GET a JSON document and deserialize it.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    provider: ProviderId,
    url: &str,
    params: &[(&str, &str)],
    secret: Option<&str>,
) -> Result<T, ProviderError> {
    let body = get_text(client, provider, url, params, secret).await?;
    serde_json::from_str(&body).map_err(|e| ProviderError::decode(provider, e.to_string()))
}

/// GET an XML document and deserialize it.
pub(crate) async fn get_xml<T: DeserializeOwned>(
    client: &reqwest::Client,
    provider: ProviderId,
    url: &str,
    params: &[(&str, &str)],
    secret: Option<&str>,
) -> Result<T, ProviderError> {
    let body = get_text(client, provider, url, params, secret).await?;
    quick_xml::de::from_str(&body).map_err(|e| ProviderError::decode(provider, e.to_string()))
}

/// Join a base URL and a path without doubling slashes.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// An identifier that providers send either as a JSON string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    Text(String),
    Number(u64),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}
