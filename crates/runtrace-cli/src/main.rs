//! set-up-telemetry - GitHub Action entry point
//!
//! Computes the run's trace ID, resolves the job executing on this runner
//! and publishes both as step outputs:
//!
//! - `trace-id`: 32 hex characters derived from run ID and attempt
//! - `job-id`: decimal job ID
//! - `job-name`: job display name

use anyhow::{Context, Result};
use clap::Parser;
use runtrace_core::obs;
use runtrace_core::{
    init_tracing, ActionsEnv, BuildInfo, GitHubClient, JobResolver, RawRunEnv, ResolverOptions,
    RunContext, RuntraceError, DEFAULT_API_URL,
};
use std::process::ExitCode;
use tracing::{error, Instrument, Level};

const ACTION_NAME: &str = "set-up-telemetry";

#[derive(Parser, Debug)]
#[command(name = "set-up-telemetry")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Derive a run trace ID and resolve the current GitHub Actions job", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,

    /// GitHub token (defaults to the `github-token` action input)
    #[arg(long)]
    github_token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Pages of the run's job list to inspect (100 jobs per page)
    #[arg(long, env = "RUNTRACE_MAX_PAGES", default_value_t = 1)]
    max_pages: u32,

    /// Workflow run ID
    #[arg(long, env = "GITHUB_RUN_ID")]
    run_id: Option<String>,

    /// Workflow run attempt
    #[arg(long, env = "GITHUB_RUN_ATTEMPT")]
    run_attempt: Option<String>,

    /// Repository owner
    #[arg(long, env = "GITHUB_REPOSITORY_OWNER")]
    repository_owner: Option<String>,

    /// Repository in `owner/name` form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Name of the runner executing this job
    #[arg(long, env = "RUNNER_NAME")]
    runner_name: Option<String>,
}

impl Cli {
    fn raw_env(&self) -> RawRunEnv {
        RawRunEnv {
            run_id: self.run_id.clone(),
            run_attempt: self.run_attempt.clone(),
            repository_owner: self.repository_owner.clone(),
            repository: self.repository.clone(),
            runner_name: self.runner_name.clone(),
        }
    }

    fn token(&self, actions: &ActionsEnv) -> Option<String> {
        self.github_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| actions.get_input("github-token"))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let actions = ActionsEnv::from_process();
    match run(&cli, &actions).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            actions.error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, actions: &ActionsEnv) -> Result<()> {
    obs::emit_started(ACTION_NAME, &BuildInfo::current());

    let Some(token) = cli.token(actions) else {
        error!("No GitHub token provided");
        return Err(RuntraceError::MissingToken.into());
    };

    let ctx = RunContext::from(cli.raw_env());
    let span = obs::run_span(&ctx.identity);
    publish(cli, actions, &token, &ctx).instrument(span).await
}

/// Emit `trace-id`, then resolve the job and emit `job-id` and `job-name`.
async fn publish(cli: &Cli, actions: &ActionsEnv, token: &str, ctx: &RunContext) -> Result<()> {
    let trace_id = ctx.identity.trace_id();
    actions
        .set_output("trace-id", trace_id.as_str())
        .context("failed to set trace-id output")?;
    obs::emit_trace_id_computed(&trace_id);

    let client = GitHubClient::with_api_url(token, &cli.api_url)?;
    let resolver = JobResolver::with_options(
        client,
        ResolverOptions::default().with_max_pages(cli.max_pages),
    );

    let job = match resolver.resolve(&ctx.job_query()).await {
        Ok(job) => job,
        Err(err) => {
            obs::emit_job_resolution_failed(&err);
            return Err(err).context("Error getting job info");
        }
    };

    actions
        .set_output("job-id", &job.job_id)
        .context("failed to set job-id output")?;
    actions
        .set_output("job-name", &job.job_name)
        .context("failed to set job-name output")?;
    obs::emit_job_resolved(&job);

    Ok(())
}
