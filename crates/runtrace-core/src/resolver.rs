//! Resolve the job executing on this runner from a run's job listing.

use crate::error::{Result, RuntraceError};
use crate::github::{JobSource, WorkflowJob};
use crate::repository::RepositoryRef;
use tracing::{debug, info};

/// Largest page size accepted by the jobs endpoint.
pub const MAX_PER_PAGE: u32 = 100;

/// Identity of the job currently running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInfo {
    /// Decimal job ID.
    pub job_id: String,
    pub job_name: String,
}

/// Everything needed to locate the current job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobQuery {
    /// Repository owner as reported by the runner. The owner parsed from
    /// `repository` takes precedence.
    pub owner_hint: Option<String>,
    /// Combined `owner/name`.
    pub repository: String,
    pub run_id: i64,
    pub run_attempt: i64,
    pub runner_name: String,
}

/// Paging behaviour for the jobs listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    pub per_page: u32,
    /// Number of pages to inspect. `1` only looks at the first page, so jobs
    /// past the first `per_page` entries are never matched.
    pub max_pages: u32,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            per_page: MAX_PER_PAGE,
            max_pages: 1,
        }
    }
}

impl ResolverOptions {
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }
}

/// Find the first job with the given attempt that ran on `runner_name`.
pub fn select_job<'a>(
    jobs: &'a [WorkflowJob],
    run_attempt: i64,
    runner_name: &str,
) -> Option<&'a WorkflowJob> {
    jobs.iter().find(|job| {
        job.run_attempt == run_attempt && job.runner_name.as_deref() == Some(runner_name)
    })
}

/// Looks up the current job through a [`JobSource`].
pub struct JobResolver<S> {
    source: S,
    options: ResolverOptions,
}

impl<S: JobSource> JobResolver<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, ResolverOptions::default())
    }

    pub fn with_options(source: S, options: ResolverOptions) -> Self {
        Self { source, options }
    }

    /// Resolve the job ID and name for `query`.
    ///
    /// The repository string is validated before any request is made.
    pub async fn resolve(&self, query: &JobQuery) -> Result<JobInfo> {
        let repo = RepositoryRef::parse(&query.repository)?;

        if let Some(hint) = query.owner_hint.as_deref() {
            if !hint.is_empty() && hint != repo.owner {
                debug!(owner_hint = %hint, owner = %repo.owner, "owner hint ignored");
            }
        }

        let per_page = self.options.per_page.clamp(1, MAX_PER_PAGE);
        let max_pages = self.options.max_pages.max(1);
        let mut seen: u64 = 0;

        for page in 1..=max_pages {
            let listing = self
                .source
                .list_run_jobs(&repo, query.run_id, page, per_page)
                .await?;
            seen += listing.jobs.len() as u64;
            debug!(
                page,
                jobs = listing.jobs.len(),
                total_count = listing.total_count,
                "received workflow jobs"
            );

            if let Some(job) = select_job(&listing.jobs, query.run_attempt, &query.runner_name) {
                info!(job_id = job.id, job_name = %job.name, page, "matched workflow job");
                return Ok(JobInfo {
                    job_id: job.id.to_string(),
                    job_name: job.name.clone(),
                });
            }

            if (listing.jobs.len() as u64) < u64::from(per_page) || seen >= listing.total_count {
                break;
            }
        }

        Err(RuntraceError::JobNotFound)
    }
}
