//! Error taxonomy for runtrace.

/// Errors produced while resolving run identity and publishing outputs.
#[derive(Debug, thiserror::Error)]
pub enum RuntraceError {
    #[error("no GitHub token provided")]
    MissingToken,

    #[error("GitHub token contains characters not valid in an HTTP header")]
    InvalidToken,

    #[error("GITHUB_REPOSITORY environment variable is malformed: {0}")]
    MalformedRepository(String),

    #[error("GitHub API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GitHub API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("no job found matching the criteria")]
    JobNotFound,

    #[error("failed to write action output: {0}")]
    Output(#[from] std::io::Error),
}

impl RuntraceError {
    /// Whether the error came back from the platform API (transport or status).
    pub fn is_upstream(&self) -> bool {
        matches!(self, RuntraceError::Transport(_) | RuntraceError::Api { .. })
    }
}

/// Result type for runtrace operations.
pub type Result<T> = std::result::Result<T, RuntraceError>;
