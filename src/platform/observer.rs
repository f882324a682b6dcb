//! Observer (logs) client
//!
//! The observability backend is optional. Without a base URL every query
//! fails with `PlatformError::NotConfigured` so callers can tell "logs are
//! unavailable" apart from "there are no logs".

use super::api::{LogQuery, LogSource};
use super::transport::{build_http_client, get_json, join_segments, parse_base_url};
use crate::aggregate::ComponentRef;
use crate::config::{ObserverConfig, parse_duration};
use crate::error::{PlatformError, PlatformResult};
use crate::models::responses::LogEntry;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_LOG_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogsResponse {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    logs: Vec<LogEntry>,
    #[serde(default)]
    total_count: Option<u64>,
}

/// Client for the observer logs API
#[derive(Clone)]
pub struct ObserverClient {
    http: reqwest::Client,
    base_url: Option<Url>,
}

impl ObserverClient {
    pub fn new(config: &ObserverConfig) -> anyhow::Result<Self> {
        let timeout = parse_duration(&config.timeout).context("Invalid observer.timeout")?;
        let base_url = match &config.base_url {
            Some(url) => Some(
                parse_base_url(url).with_context(|| format!("Invalid observer.baseUrl: {}", url))?,
            ),
            None => {
                tracing::info!("Observer base URL not set, component logs are disabled");
                None
            }
        };

        Ok(Self {
            http: build_http_client(timeout)?,
            base_url,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn logs_url(base: &Url, component: &ComponentRef, query: &LogQuery) -> PlatformResult<Url> {
        let mut url = join_segments(
            base,
            &[
                "api",
                "v1",
                "logs",
                "namespaces",
                &component.namespace,
                "projects",
                &component.project,
                "components",
                &component.name,
            ],
        )?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(environment) = query.environment.as_deref().filter(|e| !e.is_empty()) {
                pairs.append_pair("environment", environment);
            }
            pairs.append_pair(
                "limit",
                &query.limit.unwrap_or(DEFAULT_LOG_LIMIT).to_string(),
            );
        }
        Ok(url)
    }
}

#[async_trait]
impl LogSource for ObserverClient {
    async fn component_logs(
        &self,
        component: &ComponentRef,
        query: &LogQuery,
    ) -> PlatformResult<Vec<LogEntry>> {
        let base = self
            .base_url
            .as_ref()
            .ok_or_else(|| PlatformError::NotConfigured("observer".to_string()))?;

        let url = Self::logs_url(base, component, query)?;
        let response: LogsResponse = get_json(&self.http, url, None).await?;
        tracing::debug!(
            "Fetched {} of {:?} log lines for {}",
            response.logs.len(),
            response.total_count,
            component.key()
        );
        Ok(response.logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_observer_is_distinct_from_empty() {
        let client = ObserverClient::new(&ObserverConfig::default()).unwrap();
        assert!(!client.is_configured());

        let err = client
            .component_logs(
                &ComponentRef::new("team-a", "shop", "api"),
                &LogQuery::default(),
            )
            .await
            .unwrap_err();
        assert!(err.is_not_configured());
    }

    #[test]
    fn test_logs_url() {
        let base = Url::parse("http://observer:9097").unwrap();
        let query = LogQuery {
            environment: Some("dev".to_string()),
            limit: None,
        };
        let url =
            ObserverClient::logs_url(&base, &ComponentRef::new("team-a", "shop", "api"), &query)
                .unwrap();
        assert_eq!(
            url.as_str(),
            "http://observer:9097/api/v1/logs/namespaces/team-a/projects/shop/components/api?environment=dev&limit=100"
        );
    }
}
