use crate::error::{AutoStarError, Result};
use crate::types::{Repository, SearchResults};
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use std::time::{Duration, SystemTime};
use tokio::time::sleep;
use tracing::warn;
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Rate limit state read from a rate-limited response's headers.
#[derive(Debug, Clone)]
pub struct RateLimit {
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
}

impl RateLimit {
    /// Read `X-RateLimit-Remaining` and `X-RateLimit-Reset` from response
    /// headers. A missing remaining count defaults to zero; a missing or
    /// non-numeric reset time is an error, because without it the retry
    /// loop has no authoritative wait duration.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self> {
        let remaining = headers
            .get("X-RateLimit-Remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(0);

        let reset_raw = headers
            .get("X-RateLimit-Reset")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("");

        let reset_epoch = reset_raw
            .parse::<i64>()
            .map_err(|_| AutoStarError::ResetHeader(reset_raw.to_string()))?;

        let reset_at = DateTime::from_timestamp(reset_epoch, 0)
            .ok_or_else(|| AutoStarError::ResetHeader(reset_raw.to_string()))?;

        Ok(RateLimit {
            remaining,
            reset_at,
        })
    }

    /// Time left until the quota resets, clamped at zero.
    pub fn wait_duration(&self) -> Duration {
        let reset_time =
            SystemTime::UNIX_EPOCH + Duration::from_secs(self.reset_at.timestamp().max(0) as u64);
        reset_time
            .duration_since(SystemTime::now())
            .unwrap_or(Duration::from_secs(0))
    }
}

pub struct GitHubClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl GitHubClient {
    pub fn new(token: String) -> Result<Self> {
        Self::with_base_url(token, API_BASE_URL)
    }

    /// Build a client against a custom API base URL. Tests point this at a
    /// local mock server.
    pub fn with_base_url(token: String, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("GitHub Auto Star/0.1.0")
            .timeout(Duration::from_secs(30))
            .build()?;
        let base_url = Url::parse(base_url)?;

        Ok(GitHubClient {
            client,
            base_url,
            token,
        })
    }

    /// Search for repositories matching `query`, restricted to `language`,
    /// sorted by ascending star count. Returns up to `per_page` items in
    /// the order GitHub returned them.
    ///
    /// There is no retry here: a search failure aborts the whole run.
    pub async fn search_repositories(
        &self,
        query: &str,
        language: &str,
        per_page: u32,
    ) -> Result<Vec<Repository>> {
        let mut url = self.base_url.join("search/repositories")?;
        url.query_pairs_mut()
            .append_pair("q", &format!("{} language:{}", query, language))
            .append_pair("per_page", &per_page.to_string())
            .append_pair("sort", "stars")
            .append_pair("order", "asc");

        let response = self
            .client
            .get(url)
            .header("Accept", ACCEPT_HEADER)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(AutoStarError::UnexpectedStatus(response.status()));
        }

        // Read the body first so a transport failure and a malformed body
        // surface as different errors.
        let body = response.text().await?;
        let results: SearchResults = serde_json::from_str(&body)?;

        Ok(results.items)
    }

    /// Star a repository on behalf of the authenticated account.
    ///
    /// A 401 carrying rate limit headers is a temporary quota exhaustion:
    /// the call sleeps until the advertised reset time and re-issues the
    /// identical request. There is no attempt cap — the reset time is
    /// authoritative, so the loop runs until the API answers with
    /// something other than a rate limit signal. A reset header that does
    /// not parse ends the loop instead of retrying blind.
    pub async fn star_repository(&self, full_name: &str) -> Result<()> {
        let parts: Vec<&str> = full_name.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(AutoStarError::InvalidRepoName(full_name.to_string()));
        }

        let url = self.base_url.join(&format!("user/starred/{}", full_name))?;

        loop {
            let response = self
                .client
                .put(url.clone())
                .header("Accept", ACCEPT_HEADER)
                .header("Authorization", format!("Bearer {}", self.token))
                .send()
                .await?;

            match response.status() {
                StatusCode::NO_CONTENT => return Ok(()),
                StatusCode::UNAUTHORIZED => {
                    let rate_limit = RateLimit::from_headers(response.headers())?;
                    let wait = rate_limit.wait_duration();

                    warn!(
                        repo = full_name,
                        remaining = rate_limit.remaining,
                        reset_at = %rate_limit.reset_at,
                        "Rate limit exceeded. Waiting {}s before retrying",
                        wait.as_secs()
                    );

                    if !wait.is_zero() {
                        sleep(wait).await;
                    }
                }
                status => {
                    return Err(AutoStarError::StarRejected {
                        full_name: full_name.to_string(),
                        status,
                    });
                }
            }
        }
    }
}
