//! GitHub Actions runner protocol: inputs, step outputs and annotations.
//!
//! Inputs arrive as `INPUT_<NAME>` variables. Outputs are appended to the
//! file named by `GITHUB_OUTPUT`; runners that predate that file get the
//! legacy `::set-output` workflow command on stdout instead.

use crate::error::Result;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Snapshot of the runner environment relevant to the action protocol.
#[derive(Debug, Clone, Default)]
pub struct ActionsEnv {
    vars: HashMap<String, String>,
    output_file: Option<PathBuf>,
}

impl ActionsEnv {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let output_file = vars
            .get(GITHUB_OUTPUT)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Self { vars, output_file }
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    /// Read an action input. Empty after trimming counts as absent.
    pub fn get_input(&self, name: &str) -> Option<String> {
        self.vars
            .get(&input_env_name(name))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Publish a step output.
    pub fn set_output(&self, name: &str, value: &str) -> Result<()> {
        match &self.output_file {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(output_record(name, value).as_bytes())?;
                debug!(output = %name, file = %path.display(), "wrote step output");
            }
            None => println!("{}", set_output_command(name, value)),
        }
        Ok(())
    }

    /// Emit an `::error::` annotation on stdout.
    pub fn error(&self, message: &str) {
        println!("{}", error_command(message));
    }
}

/// `github-token` -> `INPUT_GITHUB-TOKEN`.
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Format one entry for the `GITHUB_OUTPUT` file.
///
/// Multi-line values use the heredoc form with a delimiter derived from
/// the content, so it never collides with a line of the value.
pub fn output_record(name: &str, value: &str) -> String {
    if !value.contains('\n') && !value.contains('\r') {
        return format!("{name}={value}\n");
    }

    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(b"\0");
    hasher.update(value.as_bytes());
    let delimiter = format!("ghadelimiter_{}", &hex::encode(hasher.finalize())[..16]);
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

/// Legacy `::set-output` workflow command for runners without `GITHUB_OUTPUT`.
pub fn set_output_command(name: &str, value: &str) -> String {
    format!(
        "::set-output name={}::{}",
        escape_property(name),
        escape_data(value)
    )
}

pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
