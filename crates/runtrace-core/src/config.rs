//! Run context assembled from the runner environment.
//!
//! The environment is read once at the entry point; everything downstream
//! receives explicit values.

use crate::resolver::JobQuery;
use crate::trace_id::RunIdentity;
use tracing::warn;

pub const GITHUB_RUN_ID: &str = "GITHUB_RUN_ID";
pub const GITHUB_RUN_ATTEMPT: &str = "GITHUB_RUN_ATTEMPT";
pub const GITHUB_REPOSITORY_OWNER: &str = "GITHUB_REPOSITORY_OWNER";
pub const GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const RUNNER_NAME: &str = "RUNNER_NAME";

/// Unparsed values as the runner provides them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRunEnv {
    pub run_id: Option<String>,
    pub run_attempt: Option<String>,
    pub repository_owner: Option<String>,
    pub repository: Option<String>,
    pub runner_name: Option<String>,
}

impl RawRunEnv {
    /// Collect the raw values through `lookup` (usually `std::env::var`).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            run_id: lookup(GITHUB_RUN_ID),
            run_attempt: lookup(GITHUB_RUN_ATTEMPT),
            repository_owner: lookup(GITHUB_REPOSITORY_OWNER),
            repository: lookup(GITHUB_REPOSITORY),
            runner_name: lookup(RUNNER_NAME),
        }
    }
}

/// Typed run context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub identity: RunIdentity,
    pub owner_hint: Option<String>,
    pub repository: String,
    pub runner_name: String,
}

impl RunContext {
    /// Build the context. Numeric values that fail to parse become `0`.
    pub fn from_raw(raw: RawRunEnv) -> Self {
        let run_id = parse_or_zero(GITHUB_RUN_ID, raw.run_id.as_deref());
        let run_attempt = parse_or_zero(GITHUB_RUN_ATTEMPT, raw.run_attempt.as_deref());

        Self {
            identity: RunIdentity::new(run_id, run_attempt),
            owner_hint: raw.repository_owner.filter(|o| !o.is_empty()),
            repository: raw.repository.unwrap_or_default(),
            runner_name: raw.runner_name.unwrap_or_default(),
        }
    }

    pub fn job_query(&self) -> JobQuery {
        JobQuery {
            owner_hint: self.owner_hint.clone(),
            repository: self.repository.clone(),
            run_id: self.identity.run_id,
            run_attempt: self.identity.run_attempt,
            runner_name: self.runner_name.clone(),
        }
    }
}

impl From<RawRunEnv> for RunContext {
    fn from(raw: RawRunEnv) -> Self {
        Self::from_raw(raw)
    }
}

fn parse_or_zero(name: &str, raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        warn!(variable = name, "not set, using 0");
        return 0;
    };
    match raw.trim().parse::<i64>() {
        Ok(value) => value,
        Err(err) => {
            warn!(variable = name, value = %raw, error = %err, "not an integer, using 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn raw(pairs: &[(&str, &str)]) -> RawRunEnv {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RawRunEnv::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let env = raw(&[
            (GITHUB_RUN_ID, "12345"),
            (GITHUB_RUN_ATTEMPT, "2"),
            (GITHUB_REPOSITORY_OWNER, "octo"),
            (GITHUB_REPOSITORY, "octo/widgets"),
            (RUNNER_NAME, "runner-7"),
        ]);
        let ctx = RunContext::from(env);

        assert_eq!(ctx.identity, RunIdentity::new(12345, 2));
        assert_eq!(ctx.owner_hint.as_deref(), Some("octo"));
        assert_eq!(ctx.repository, "octo/widgets");
        assert_eq!(ctx.runner_name, "runner-7");
    }

    #[test]
    fn test_unparseable_numbers_default_to_zero() {
        let ctx = RunContext::from_raw(raw(&[
            (GITHUB_RUN_ID, "not-a-number"),
            (GITHUB_RUN_ATTEMPT, ""),
        ]));
        assert_eq!(ctx.identity, RunIdentity::new(0, 0));
        assert_eq!(ctx.owner_hint, None);
        assert_eq!(ctx.repository, "");
    }

    #[test]
    fn test_job_query_carries_context() {
        let ctx = RunContext::from_raw(raw(&[
            (GITHUB_RUN_ID, "99"),
            (GITHUB_RUN_ATTEMPT, "3"),
            (GITHUB_REPOSITORY, "octo/widgets"),
            (RUNNER_NAME, "runner-1"),
        ]));
        let query = ctx.job_query();
        assert_eq!(query.run_id, 99);
        assert_eq!(query.run_attempt, 3);
        assert_eq!(query.repository, "octo/widgets");
        assert_eq!(query.runner_name, "runner-1");
    }
}
