//! Shared HTTP plumbing for upstream clients

use crate::error::{PlatformError, PlatformResult};
use anyhow::Context;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Build a reqwest client with the given request timeout
pub fn build_http_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

/// Parse a base URL so that path segments can be appended to it
pub fn parse_base_url(base_url: &str) -> PlatformResult<Url> {
    let url = Url::parse(base_url)?;
    if url.cannot_be_a_base() {
        return Err(PlatformError::InvalidUrl(
            url::ParseError::RelativeUrlWithCannotBeABaseBase,
        ));
    }
    Ok(url)
}

/// Append percent-encoded path segments to `base`
pub fn join_segments(base: &Url, segments: &[&str]) -> PlatformResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| PlatformError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// GET `url` and decode the JSON body
///
/// 404 maps to `NotFound`, any other non-success status to `Status`.
pub async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: Url,
    token: Option<&str>,
) -> PlatformResult<T> {
    let target = url.to_string();
    tracing::debug!("GET {}", target);

    let mut req = http.get(url);
    if let Some(token) = token {
        req = req.bearer_auth(token);
    }

    let resp = req.send().await.map_err(|source| PlatformError::Transport {
        url: target.clone(),
        source,
    })?;

    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Err(PlatformError::NotFound { url: target });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!("{} returned {}: {}", target, status, body);
        return Err(PlatformError::Status {
            url: target,
            status: status.as_u16(),
            body,
        });
    }

    resp.json::<T>()
        .await
        .map_err(|source| PlatformError::Decode {
            url: target,
            source,
        })
}
