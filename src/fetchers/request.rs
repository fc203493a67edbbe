use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT,
};
use reqwest::{Client, StatusCode, Url};

use super::Fetcher;
use crate::config::EngineConfig;
use crate::error::FetchError;
use crate::observer::{ExtractionEvent, ExtractionObserver, LogObserver};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Fetches pages over HTTP while presenting itself as a desktop browser.
///
/// A 403 answer to the primary identity gets exactly one more attempt with
/// the fallback identity. Nothing else is retried.
pub struct RequestFetcher {
    client: Client,
    user_agent: HeaderValue,
    fallback_user_agent: HeaderValue,
    observer: Arc<dyn ExtractionObserver>,
}

impl RequestFetcher {
    pub fn new(config: &EngineConfig) -> Result<Self, FetchError> {
        Self::with_observer(config, Arc::new(LogObserver))
    }

    pub fn with_observer(
        config: &EngineConfig,
        observer: Arc<dyn ExtractionObserver>,
    ) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&config.accept_language)?);
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            user_agent: HeaderValue::from_str(&config.user_agent)?,
            fallback_user_agent: HeaderValue::from_str(&config.fallback_user_agent)?,
            observer,
        })
    }

    async fn get(&self, url: Url, user_agent: &HeaderValue) -> Result<reqwest::Response, FetchError> {
        Ok(self
            .client
            .get(url)
            .header(USER_AGENT, user_agent.clone())
            .send()
            .await?)
    }
}

#[async_trait]
impl Fetcher for RequestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "{url}: unsupported scheme {}",
                parsed.scheme()
            )));
        }

        let mut response = self.get(parsed.clone(), &self.user_agent).await?;
        if response.status() == StatusCode::FORBIDDEN {
            self.observer.on_event(&ExtractionEvent::FallbackIdentity {
                url: url.to_string(),
            });
            response = self.get(parsed, &self.fallback_user_agent).await?;
        }

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
