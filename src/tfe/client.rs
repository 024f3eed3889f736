//! Blocking HTTP client for the Terraform Enterprise JSON:API.

use std::time::Duration;

use reqwest::Method;
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, trace};

use super::TeamTokenApi;
use super::types::{
    ErrorDocument, Team, TeamDocument, TeamTokenListOptions, TeamTokenPage, TokenListDocument,
};
use crate::config::ApiConfig;
use crate::error::{PruneError, Result};

const JSON_API: &str = "application/vnd.api+json";

/// Retry behavior for throttled and failing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retry_server_errors: bool,
    pub max_retries: u32,
    pub wait_min: Duration,
    pub wait_max: Duration,
}

impl RetryPolicy {
    fn from_config(config: &ApiConfig) -> Self {
        Self {
            retry_server_errors: config.retry_server_errors,
            max_retries: config.max_retries,
            wait_min: config.retry_wait_min,
            wait_max: config.retry_wait_max.max(config.retry_wait_min),
        }
    }

    fn should_retry(&self, status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS
            || (self.retry_server_errors && status.is_server_error())
    }

    /// Connection failures and timeouts count as server errors.
    fn should_retry_error(&self, err: &reqwest::Error) -> bool {
        self.retry_server_errors && (err.is_connect() || err.is_timeout())
    }

    /// Linear backoff from `wait_min`, capped at `wait_max`.
    fn backoff(&self, attempt: u32) -> Duration {
        self.wait_min
            .saturating_mul(attempt.saturating_add(1))
            .min(self.wait_max)
    }
}

/// Client for the team token endpoints of a Terraform Enterprise instance.
#[derive(Debug)]
pub struct TfeClient {
    http: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl TfeClient {
    /// Build a client from API settings.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(PruneError::ClientInit("missing API token".to_string()));
        }

        let base = format!("{}/api/v2/", config.address.trim_end_matches('/'));
        let base_url = Url::parse(&base)
            .map_err(|err| PruneError::ClientInit(format!("invalid address {}: {err}", config.address)))?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|err| PruneError::ClientInit(format!("invalid API token: {err}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_API));

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| PruneError::ClientInit(err.to_string()))?;

        Ok(Self {
            http,
            base_url,
            retry: RetryPolicy::from_config(config),
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| PruneError::Config(format!("invalid API path {path}: {err}")))
    }

    fn send(&self, method: &Method, url: &Url) -> Result<Response> {
        let mut attempt = 0;
        loop {
            trace!(%method, %url, attempt, "sending request");
            let response = match self.http.request(method.clone(), url.clone()).send() {
                Ok(response) => response,
                Err(err) if attempt < self.retry.max_retries && self.retry.should_retry_error(&err) => {
                    let wait = self.retry.backoff(attempt);
                    debug!(%method, %url, error = %err, attempt, ?wait, "retrying request");
                    std::thread::sleep(wait);
                    attempt += 1;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            let status = response.status();
            if attempt < self.retry.max_retries && self.retry.should_retry(status) {
                let wait = self.retry.backoff(attempt);
                debug!(%method, %url, %status, attempt, ?wait, "retrying request");
                std::thread::sleep(wait);
                attempt += 1;
                continue;
            }
            return check_status(response);
        }
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ErrorDocument>(&body)
        .ok()
        .and_then(|doc| doc.summary())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_lowercase()
        });
    Err(PruneError::Api {
        status: status.as_u16(),
        message,
    })
}

impl TeamTokenApi for TfeClient {
    fn list_team_tokens(
        &self,
        organization: &str,
        options: &TeamTokenListOptions,
    ) -> Result<TeamTokenPage> {
        let mut url = self.endpoint(&format!(
            "organizations/{}/team-tokens",
            urlencoding::encode(organization)
        ))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in options.query_pairs() {
                pairs.append_pair(key, &value);
            }
        }

        let document: TokenListDocument = self.send(&Method::GET, &url)?.json()?;
        Ok(TeamTokenPage {
            items: document.data.into_iter().map(Into::into).collect(),
            pagination: document.meta.pagination.unwrap_or_default(),
        })
    }

    fn read_team(&self, team_id: &str) -> Result<Team> {
        let url = self.endpoint(&format!("teams/{}", urlencoding::encode(team_id)))?;
        let document: TeamDocument = self.send(&Method::GET, &url)?.json()?;
        Ok(document.data.into())
    }

    fn delete_team_token(&self, token_id: &str) -> Result<()> {
        let url = self.endpoint(&format!(
            "authentication-tokens/{}",
            urlencoding::encode(token_id)
        ))?;
        self.send(&Method::DELETE, &url)?;
        Ok(())
    }
}
