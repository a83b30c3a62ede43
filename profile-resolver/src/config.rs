use std::time::Duration;
use url::Url;

/// Upper bound on a single profile fetch.
pub const API_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Base URL the canonical tag is appended to,
    /// e.g. `http://domain.com/path/` for `http://domain.com/path/LQQ`.
    pub profile_api_url: Option<Url>,
    pub fetch_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            profile_api_url: None,
            fetch_timeout: API_FETCH_TIMEOUT,
        }
    }
}
