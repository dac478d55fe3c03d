use std::io::Write;

use anyhow::{Context, Result};
use dialoguer::console::style;
use tracing::debug;

use crate::branches;
use crate::git::{self, GitRunner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    DryRun,
    Delete,
}

/// Supplies the operator's raw answer to the yes/no question.
pub trait Confirmer {
    fn confirm(&mut self, prompt: &str) -> Result<String>;
}

/// `y` or `s` (localized yes), case-insensitive. Anything else declines.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "s")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    pub deleted: Vec<String>,
    /// (branch, git error text)
    pub failed: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneOutcome {
    NothingToPrune,
    Reported(Vec<String>),
    Cancelled(Vec<String>),
    Deleted(DeleteSummary),
}

/// Result of the read-only part of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StalePlan {
    pub main_branch: String,
    pub stale: Vec<String>,
}

pub struct Pruner<'a> {
    git: &'a dyn GitRunner,
}

impl<'a> Pruner<'a> {
    pub fn new(git: &'a dyn GitRunner) -> Self {
        Self { git }
    }

    /// Sync, detect the main branch and compute the stale set.
    ///
    /// Any git failure here aborts the run before anything is printed.
    pub fn plan(&self) -> Result<StalePlan, git::GitError> {
        git::fetch_prune(self.git)?;

        let main_branch = self.detect_main_branch()?;
        debug!(%main_branch, "main branch detected");

        let merged_text = git::merged_branches(self.git, &main_branch)?;
        let merged = branches::parse_merged_branches(&merged_text, &main_branch);
        let remote_text = git::remote_branches(self.git)?;
        let remote = branches::parse_remote_branches(&remote_text);
        debug!(merged = merged.len(), remote = remote.len(), "branch lists read");

        let stale = branches::stale_branches(&merged, &remote);
        Ok(StalePlan { main_branch, stale })
    }

    fn detect_main_branch(&self) -> Result<String, git::GitError> {
        if let Some(v) = git::default_branch_config(self.git) {
            return Ok(v);
        }
        let local_text = git::local_branches(self.git)?;
        let local = branches::parse_local_branches(&local_text);
        Ok(branches::detect_main_branch(None, &local))
    }

    pub fn run(
        &self,
        mode: Mode,
        confirmer: &mut dyn Confirmer,
        out: &mut dyn Write,
    ) -> Result<PruneOutcome> {
        let plan = self.plan()?;

        writeln!(out, "Main branch: {}", plan.main_branch)?;
        if plan.stale.is_empty() {
            writeln!(out, "No stale branches to prune.")?;
            return Ok(PruneOutcome::NothingToPrune);
        }

        writeln!(
            out,
            "Stale branches (merged into {}, gone from remote):",
            plan.main_branch
        )?;
        for name in &plan.stale {
            writeln!(out, "{name}")?;
        }

        if mode == Mode::DryRun {
            writeln!(out, "Dry run. Re-run with --delete to remove them.")?;
            return Ok(PruneOutcome::Reported(plan.stale));
        }

        let prompt = format!("Delete {} branch(es)? [y/s/N]", plan.stale.len());
        let answer = confirmer.confirm(&prompt).context("Prompt failed")?;
        if !is_affirmative(&answer) {
            writeln!(out, "Cancelled. No branches were deleted.")?;
            return Ok(PruneOutcome::Cancelled(plan.stale));
        }

        let summary = self.delete_all(&plan.stale, out)?;
        writeln!(
            out,
            "Done: {} deleted, {} failed.",
            summary.deleted.len(),
            summary.failed.len()
        )?;
        Ok(PruneOutcome::Deleted(summary))
    }

    fn delete_all(&self, stale: &[String], out: &mut dyn Write) -> Result<DeleteSummary> {
        let mut summary = DeleteSummary::default();
        for name in stale {
            match git::delete_branch(self.git, name) {
                Ok(()) => {
                    writeln!(out, "{} {name}", style("✓").green())?;
                    summary.deleted.push(name.clone());
                }
                Err(e) => {
                    debug!(branch = %name, error = %e, "delete failed");
                    writeln!(out, "{} {name}: {e}", style("✗").red())?;
                    summary.failed.push((name.clone(), e.to_string()));
                }
            }
        }
        Ok(summary)
    }
}
