use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("git command failed: {command}: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("git command failed: could not run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs one git invocation and returns its trimmed stdout.
///
/// `SystemGit` is the real implementation; tests substitute canned output.
pub trait GitRunner {
    fn run(&self, args: &[&str]) -> Result<String, GitError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemGit;

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let command = command_line(args);
        debug!(%command, "running");
        let output = Command::new("git")
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stderr = if stderr.is_empty() {
                format!("exited with status: {}", output.status)
            } else {
                stderr
            };
            debug!(%command, %stderr, "failed");
            return Err(GitError::CommandFailed { command, stderr });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

pub(crate) fn command_line(args: &[&str]) -> String {
    let mut s = String::from("git");
    for a in args {
        s.push(' ');
        s.push_str(a);
    }
    s
}

pub fn ensure_git_available() -> anyhow::Result<()> {
    let ok = Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false);
    if ok {
        Ok(())
    } else {
        anyhow::bail!("git not found in PATH");
    }
}

pub fn fetch_prune(git: &dyn GitRunner) -> Result<(), GitError> {
    git.run(&["fetch", "--prune"]).map(|_| ())
}

/// `None` when the key is unset; git exits 1 in that case.
pub fn default_branch_config(git: &dyn GitRunner) -> Option<String> {
    match git.run(&["config", "--get", "init.defaultBranch"]) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        Ok(_) => None,
        Err(e) => {
            debug!(error = %e, "init.defaultBranch not readable");
            None
        }
    }
}

pub fn local_branches(git: &dyn GitRunner) -> Result<String, GitError> {
    git.run(&["branch"])
}

pub fn merged_branches(git: &dyn GitRunner, main: &str) -> Result<String, GitError> {
    git.run(&["branch", "--merged", main])
}

pub fn remote_branches(git: &dyn GitRunner) -> Result<String, GitError> {
    git.run(&["branch", "-r"])
}

/// Safe delete: git refuses branches that are not fully merged.
pub fn delete_branch(git: &dyn GitRunner, name: &str) -> Result<(), GitError> {
    git.run(&["branch", "-d", name]).map(|_| ())
}
