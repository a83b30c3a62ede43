use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;
use url::Url;

use crate::config::ResolverConfig;
use data_error::{CrError, Result};
use data_player::PlayerSnapshot;
use data_tag::PlayerTag;

/// Result of a single attempt to fetch a profile.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Fetched(PlayerSnapshot),
    /// No complete response within the time bound.
    TimedOut,
    /// The body could not be parsed into a snapshot.
    Malformed(String),
    /// Connection failure or an error status.
    Unreachable(String),
}

/// Remote source of player profiles.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch(&self, tag: &PlayerTag) -> FetchOutcome;
}

/// Profile source backed by an HTTP JSON API.
#[derive(Debug, Clone)]
pub struct HttpProfileSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpProfileSource {
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        let base_url = config.profile_api_url.clone().ok_or_else(|| {
            CrError::Config("profile API URL is not configured".to_owned())
        })?;
        Self::with_base_url(base_url, config.fetch_timeout)
    }

    pub fn with_base_url(base_url: Url, timeout: Duration) -> Result<Self> {
        let mut header = HeaderMap::new();
        header.insert(
            "User-Agent",
            HeaderValue::from_static(concat!(
                "cr-profile/",
                env!("CARGO_PKG_VERSION")
            )),
        );
        let client = reqwest::Client::builder()
            .default_headers(header)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base_url })
    }

    pub fn url_for(&self, tag: &PlayerTag) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url, tag))?)
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch(&self, tag: &PlayerTag) -> FetchOutcome {
        let url = match self.url_for(tag) {
            Ok(url) => url,
            Err(e) => return FetchOutcome::Unreachable(e.to_string()),
        };
        log::debug!("http: GET {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return FetchOutcome::TimedOut,
            Err(e) => return FetchOutcome::Unreachable(e.to_string()),
        };

        let status = response.status();
        if !status.is_success() {
            return FetchOutcome::Unreachable(format!("HTTP {}", status));
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => return FetchOutcome::TimedOut,
            Err(e) => return FetchOutcome::Unreachable(e.to_string()),
        };

        match PlayerSnapshot::from_json(&body) {
            Ok(snapshot) => FetchOutcome::Fetched(snapshot),
            Err(e) => FetchOutcome::Malformed(e.to_string()),
        }
    }
}
