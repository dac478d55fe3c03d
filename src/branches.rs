//! Parsers for `git branch` output and the stale-set computation.
//!
//! Everything here is pure: raw command text in, branch names out.

/// Always excluded from the merged set, whatever the detected main branch is.
pub const PROTECTED_BRANCH: &str = "master";

const CURRENT_MARKER: char = '*';
/// Branch checked out in another linked worktree.
const WORKTREE_MARKER: char = '+';

/// `git branch`: every local branch, with the current-branch and worktree
/// markers removed.
pub fn parse_local_branches(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim())
        .map(|line| {
            line.strip_prefix([CURRENT_MARKER, WORKTREE_MARKER])
                .map(str::trim_start)
                .unwrap_or(line)
        })
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// `git branch --merged <main>`: merged branches minus the current one,
/// those checked out in other worktrees, `main` itself and
/// [`PROTECTED_BRANCH`]. Order is preserved.
pub fn parse_merged_branches(text: &str, main: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        // covers "(HEAD detached at ...)" too
        .filter(|line| !line.starts_with([CURRENT_MARKER, WORKTREE_MARKER]))
        .filter(|name| *name != main && *name != PROTECTED_BRANCH)
        .map(str::to_string)
        .collect()
}

/// `git branch -r`: remote branch names with the `<remote>/` prefix removed.
pub fn parse_remote_branches(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim())
        .map(|line| match line.split_once(" -> ") {
            Some((left, _)) => left.trim(),
            None => line,
        })
        .map(|line| match line.split_once('/') {
            Some((_remote, name)) => name,
            None => line,
        })
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn stale_branches(merged: &[String], remote: &[String]) -> Vec<String> {
    merged
        .iter()
        .filter(|name| !remote.contains(*name))
        .cloned()
        .collect()
}

/// Configured default branch if set, else `main` when such a local branch
/// exists, else `master`.
pub fn detect_main_branch(config_value: Option<&str>, local: &[String]) -> String {
    if let Some(v) = config_value.map(str::trim).filter(|v| !v.is_empty()) {
        return v.to_string();
    }
    if local.iter().any(|b| b == "main") {
        "main".to_string()
    } else {
        "master".to_string()
    }
}
