//! runtrace core library
//!
//! Derives a deterministic trace ID for a GitHub Actions run attempt and
//! resolves which job of the run is executing on the current runner.

pub mod actions;
pub mod build_info;
pub mod config;
pub mod error;
pub mod github;
pub mod obs;
pub mod repository;
pub mod resolver;
pub mod telemetry;
pub mod trace_id;

pub use actions::ActionsEnv;
pub use build_info::BuildInfo;
pub use config::{RawRunEnv, RunContext};
pub use error::{Result, RuntraceError};
pub use github::{GitHubClient, JobSource, WorkflowJob, WorkflowJobsPage, DEFAULT_API_URL};
pub use repository::RepositoryRef;
pub use resolver::{select_job, JobInfo, JobQuery, JobResolver, ResolverOptions};
pub use telemetry::init_tracing;
pub use trace_id::{generate as generate_trace_id, RunIdentity, TraceId};
