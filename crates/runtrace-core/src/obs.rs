//! Structured log events for the set-up lifecycle.
//!
//! Each function emits one event with an `event` field so JSON log
//! consumers can filter on it.

use crate::build_info::BuildInfo;
use crate::resolver::JobInfo;
use crate::trace_id::{RunIdentity, TraceId};
use tracing::{error, info};

/// Span tagged with the run coordinates; attach with `Instrument`.
pub fn run_span(identity: &RunIdentity) -> tracing::Span {
    tracing::info_span!(
        "runtrace.run",
        run_id = identity.run_id,
        run_attempt = identity.run_attempt
    )
}

pub fn emit_started(action: &str, build: &BuildInfo) {
    info!(
        event = "action.started",
        version = %build.version,
        build_date = %build.date,
        commit = %build.commit,
        "Starting {} {}",
        action,
        build.banner()
    );
}

pub fn emit_trace_id_computed(trace_id: &TraceId) {
    info!(event = "trace_id.computed", trace_id = %trace_id, "Trace ID: {}", trace_id);
}

pub fn emit_job_resolved(job: &JobInfo) {
    info!(
        event = "job.resolved",
        job_id = %job.job_id,
        job_name = %job.job_name,
        "Job ID: {}, Job name: {}",
        job.job_id,
        job.job_name
    );
}

pub fn emit_job_resolution_failed(err: &dyn std::fmt::Display) {
    error!(event = "job.resolution_failed", error = %err, "Error getting job info: {}", err);
}
