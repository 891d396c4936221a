//! `owner/name` repository references.

use crate::error::{Result, RuntraceError};
use std::str::FromStr;

/// A GitHub repository, parsed from the combined `owner/name` form used by
/// `GITHUB_REPOSITORY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    /// Parse `owner/name`. Exactly one `/` with non-empty parts on both sides.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut parts = raw.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(RuntraceError::MalformedRepository(raw.to_string())),
        }
    }
}

impl FromStr for RepositoryRef {
    type Err = RuntraceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_and_name() {
        let repo = RepositoryRef::parse("ownerX/repoY").unwrap();
        assert_eq!(repo.owner, "ownerX");
        assert_eq!(repo.name, "repoY");
        assert_eq!(repo.to_string(), "ownerX/repoY");
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let err = RepositoryRef::parse("invalidrepo").unwrap_err();
        assert!(matches!(err, RuntraceError::MalformedRepository(ref raw) if raw == "invalidrepo"));
    }

    #[test]
    fn test_parse_rejects_extra_separator() {
        let err = "a/b/c".parse::<RepositoryRef>().unwrap_err();
        assert!(matches!(err, RuntraceError::MalformedRepository(ref raw) if raw == "a/b/c"));
    }

    #[test]
    fn test_parse_rejects_empty_parts() {
        for raw in ["", "/", "/repo", "owner/"] {
            assert!(
                RepositoryRef::parse(raw).is_err(),
                "expected {raw:?} to be rejected"
            );
        }
    }
}
