//! Deterministic trace ID derivation for a CI run.
//!
//! The trace ID is the first 128 bits (32 hex characters) of
//! `SHA-256("{run_id}{run_attempt}t")`. Every step of a run attempt derives
//! the same value without coordination, so spans emitted by separate jobs
//! land in one trace.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
pub const TRACE_ID_HEX_LEN: usize = 32;

const TRACE_SUFFIX: char = 't';

/// Identity of a single workflow run attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunIdentity {
    pub run_id: i64,
    pub run_attempt: i64,
}

impl RunIdentity {
    pub fn new(run_id: i64, run_attempt: i64) -> Self {
        Self {
            run_id,
            run_attempt,
        }
    }

    /// Derive the trace ID for this run attempt.
    pub fn trace_id(&self) -> TraceId {
        generate(self.run_id, self.run_attempt)
    }
}

/// 32-character lowercase hex trace identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceId(String);

impl TraceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate the trace ID for `(run_id, run_attempt)`.
///
/// Any pair is accepted, including zero and negative values.
pub fn generate(run_id: i64, run_attempt: i64) -> TraceId {
    let input = format!("{run_id}{run_attempt}{TRACE_SUFFIX}");
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let mut hex = hex::encode(hasher.finalize());
    hex.truncate(TRACE_ID_HEX_LEN);
    TraceId(hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn is_lower_hex(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    #[test]
    fn test_known_vector() {
        // sha256("123451t")[0..32]
        assert_eq!(
            generate(12345, 1).as_str(),
            "5c89a9ce56397ace4b0fd1e7c1e458a5"
        );
    }

    #[test]
    fn test_generate_deterministic() {
        let a = generate(9_876_543_210, 3);
        let b = generate(9_876_543_210, 3);
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), TRACE_ID_HEX_LEN);
        assert!(is_lower_hex(a.as_str()));
    }

    #[test]
    fn test_zero_and_negative_inputs_accepted() {
        assert_eq!(generate(0, 0).as_str(), "f3c168b1bb542077f5158b46ede4a163");
        assert_eq!(
            generate(-1, -1).as_str(),
            "2723bca6978fd4b85174ee82886a749f"
        );
    }

    #[test]
    fn test_attempt_changes_trace_id() {
        assert_eq!(generate(12345, 2).as_str(), "42b7eb1519a872b5e2bffbfd35836b46");
        assert_ne!(generate(12345, 1), generate(12345, 2));
    }

    #[test]
    fn test_distinct_pairs_yield_distinct_ids() {
        let mut seen = HashSet::new();
        for run_id in [1_i64, 42, 12345, 7_000_000_001, i64::MAX] {
            for attempt in 1..=5 {
                let id = generate(run_id, attempt);
                assert!(seen.insert(id), "collision for ({run_id}, {attempt})");
            }
        }
        assert_eq!(seen.len(), 25);
    }

    #[test]
    fn test_run_identity_delegates_to_generate() {
        let identity = RunIdentity::new(12345, 1);
        assert_eq!(identity.trace_id(), generate(12345, 1));
        assert_eq!(identity.trace_id().to_string(), "5c89a9ce56397ace4b0fd1e7c1e458a5");
    }
}
