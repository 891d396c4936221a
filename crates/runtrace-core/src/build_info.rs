//! Build metadata embedded at compile time.
//!
//! Release pipelines set `RUNTRACE_BUILD_DATE` and `RUNTRACE_COMMIT_ID` in
//! the build environment; local builds report `unknown`.

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: String,
    pub date: String,
    pub commit: String,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::new(
            env!("CARGO_PKG_VERSION"),
            option_env!("RUNTRACE_BUILD_DATE"),
            option_env!("RUNTRACE_COMMIT_ID"),
        )
    }

    pub fn new(version: &str, date: Option<&str>, commit: Option<&str>) -> Self {
        let or_unknown = |v: Option<&str>| {
            v.filter(|s| !s.is_empty())
                .unwrap_or(UNKNOWN)
                .to_string()
        };
        Self {
            version: version.to_string(),
            date: or_unknown(date),
            commit: or_unknown(commit),
        }
    }

    /// `version: X (DATE) commit: SHA`
    pub fn banner(&self) -> String {
        format!(
            "version: {} ({}) commit: {}",
            self.version, self.date, self.commit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_format() {
        let info = BuildInfo::new("1.2.3", Some("2024-05-01"), Some("deadbeef"));
        assert_eq!(info.banner(), "version: 1.2.3 (2024-05-01) commit: deadbeef");
    }

    #[test]
    fn test_missing_values_are_unknown() {
        let info = BuildInfo::new("1.2.3", None, Some(""));
        assert_eq!(info.date, "unknown");
        assert_eq!(info.commit, "unknown");
    }

    #[test]
    fn test_current_uses_package_version() {
        assert_eq!(BuildInfo::current().version, env!("CARGO_PKG_VERSION"));
    }
}
