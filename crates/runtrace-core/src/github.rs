//! GitHub REST client for the workflow jobs endpoint.
//!
//! Only `GET /repos/{owner}/{repo}/actions/runs/{run_id}/jobs` is used.

use crate::error::{Result, RuntraceError};
use crate::repository::RepositoryRef;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";

/// One job of a workflow run, as returned by the jobs endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkflowJob {
    pub id: i64,
    pub name: String,
    pub run_id: i64,
    pub run_attempt: i64,
    /// `None` while the job is still queued.
    #[serde(default)]
    pub runner_name: Option<String>,
}

/// A single page of the jobs listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowJobsPage {
    pub total_count: u64,
    pub jobs: Vec<WorkflowJob>,
}

/// Source of workflow job listings.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Fetch one page (1-based) of jobs for a run.
    async fn list_run_jobs(
        &self,
        repo: &RepositoryRef,
        run_id: i64,
        page: u32,
        per_page: u32,
    ) -> Result<WorkflowJobsPage>;
}

/// Authenticated client for the GitHub REST API.
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
}

impl GitHubClient {
    /// Create a client against the public API.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    /// Create a client for a specific API base URL (GHES or a test server).
    pub fn with_api_url(token: &str, api_url: &str) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(RuntraceError::MissingToken);
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| RuntraceError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );

        let http = reqwest::Client::builder()
            .user_agent(concat!("runtrace/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl JobSource for GitHubClient {
    async fn list_run_jobs(
        &self,
        repo: &RepositoryRef,
        run_id: i64,
        page: u32,
        per_page: u32,
    ) -> Result<WorkflowJobsPage> {
        let url = format!(
            "{}/repos/{}/{}/actions/runs/{}/jobs",
            self.api_url, repo.owner, repo.name, run_id
        );
        debug!(%url, page, per_page, "listing workflow jobs");

        let response = self
            .http
            .get(&url)
            .query(&[("per_page", per_page), ("page", page)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RuntraceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<WorkflowJobsPage>().await?)
    }
}
