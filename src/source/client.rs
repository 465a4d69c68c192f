//! GitLab REST client
//!
//! Blocking `ureq` calls, moved off the async runtime with
//! `spawn_blocking`. One request per page, no retries.

use super::paginate::{Page, PageSource};
use crate::config::schema::SourceConfig;
use crate::error::{CacheError, CacheResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use ureq::Agent;

/// Header carrying the next page number
const NEXT_PAGE_HEADER: &str = "x-next-page";

/// GitLab v4 API client authenticated with a bearer token
#[derive(Clone)]
pub struct GitlabClient {
    agent: Agent,
    base_url: String,
    token: String,
    per_page: u32,
}

impl GitlabClient {
    /// Create a client for `base_url` (e.g. `https://gitlab.com`)
    pub fn new(base_url: &str, token: impl Into<String>, per_page: u32, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();

        Self {
            agent: config.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            per_page: per_page.clamp(1, 100),
        }
    }

    /// Create a client from config, reading the token from the configured env var
    pub fn from_config(config: &SourceConfig) -> CacheResult<Self> {
        let token = std::env::var(&config.token_env)
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CacheError::MissingToken(config.token_env.clone()))?;

        Ok(Self::new(
            &config.base_url,
            token,
            config.per_page,
            Duration::from_secs(config.timeout_secs),
        ))
    }

    /// URL of a resource collection
    pub fn resource_url(&self, resource: &str) -> String {
        format!(
            "{}/api/v4/{}",
            self.base_url,
            resource.trim_start_matches('/')
        )
    }

    fn get_page(&self, url: &str, page: u32) -> CacheResult<Page> {
        let http_err = |reason: String| CacheError::Http {
            url: url.to_string(),
            reason,
        };

        let mut response = self
            .agent
            .get(url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .query("page", page.to_string())
            .query("per_page", self.per_page.to_string())
            .call()
            .map_err(|e| match e {
                ureq::Error::StatusCode(status) => CacheError::ApiStatus {
                    url: url.to_string(),
                    status,
                },
                other => http_err(other.to_string()),
            })?;

        let next_page = response
            .headers()
            .get(NEXT_PAGE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_next_page);

        let items: Vec<serde_json::Value> = response
            .body_mut()
            .read_json()
            .map_err(|e| http_err(e.to_string()))?;

        Ok(Page { items, next_page })
    }
}

/// GitLab sends an empty header on the last page
fn parse_next_page(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

#[async_trait]
impl PageSource for GitlabClient {
    async fn fetch_page(&self, resource: &str, page: u32) -> CacheResult<Page> {
        let client = self.clone();
        let url = self.resource_url(resource);
        debug!("GET {} page {}", url, page);

        tokio::task::spawn_blocking(move || client.get_page(&url, page))
            .await
            .map_err(|e| CacheError::Internal(format!("page fetch task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GitlabClient {
        GitlabClient::new("https://gitlab.example.com/", "t", 500, Duration::from_secs(5))
    }

    #[test]
    fn resource_url_joins_cleanly() {
        let c = client();
        assert_eq!(
            c.resource_url("/projects/9/merge_requests"),
            "https://gitlab.example.com/api/v4/projects/9/merge_requests"
        );
        assert_eq!(c.resource_url("users"), "https://gitlab.example.com/api/v4/users");
    }

    #[test]
    fn per_page_is_clamped() {
        assert_eq!(client().per_page, 100);
    }

    #[test]
    fn next_page_header_parsing() {
        assert_eq!(parse_next_page("3"), Some(3));
        assert_eq!(parse_next_page(""), None);
        assert_eq!(parse_next_page(" 12 "), Some(12));
    }

    #[test]
    #[serial_test::serial]
    fn missing_token_is_reported() {
        let config = SourceConfig {
            token_env: "J1CACHE_TEST_TOKEN_THAT_IS_UNSET".to_string(),
            ..SourceConfig::default()
        };

        let err = GitlabClient::from_config(&config).err().unwrap();

        assert!(matches!(err, CacheError::MissingToken(ref name) if name == &config.token_env));
    }
}
