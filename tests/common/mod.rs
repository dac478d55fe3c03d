#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Keeps the developer's global git config (e.g. `init.defaultBranch`)
/// out of the test repositories and out of the binary under test.
pub const ISOLATED_GIT_ENV: [(&str, &str); 6] = [
    ("GIT_CONFIG_GLOBAL", "/dev/null"),
    ("GIT_CONFIG_NOSYSTEM", "1"),
    ("GIT_AUTHOR_NAME", "prune-test"),
    ("GIT_AUTHOR_EMAIL", "prune-test@example.com"),
    ("GIT_COMMITTER_NAME", "prune-test"),
    ("GIT_COMMITTER_EMAIL", "prune-test@example.com"),
];

pub fn run_git(dir: &Path, args: &[&str]) -> String {
    let out = StdCommand::new("git")
        .current_dir(dir)
        .envs(ISOLATED_GIT_ENV)
        .args(args)
        .output()
        .expect("spawn git");
    assert!(
        out.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).to_string()
}

pub fn init_repo(repo: &Path) {
    fs::create_dir_all(repo).unwrap();
    run_git(repo, &["init", "-b", "main"]);
    fs::write(repo.join("README.md"), "hello\n").unwrap();
    run_git(repo, &["add", "-A"]);
    run_git(repo, &["commit", "-m", "init"]);
}

pub fn branch_exists(repo: &Path, name: &str) -> bool {
    StdCommand::new("git")
        .current_dir(repo)
        .envs(ISOLATED_GIT_ENV)
        .args(["show-ref", "--verify", "--quiet", &format!("refs/heads/{name}")])
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Bare `origin` plus a clone of it, returned as (origin, clone).
///
/// In the clone: `feature-a` and `feature-c` are merged into `main`,
/// `wip` carries an extra commit. All three are pushed, then `feature-c`
/// and `wip` are deleted on the origin so the next `fetch --prune` drops
/// their remote-tracking refs.
pub fn clone_with_gone_branches(root: &Path) -> (PathBuf, PathBuf) {
    let origin = root.join("origin.git");
    let seed = root.join("seed");
    let repo = root.join("repo");

    run_git(root, &["init", "--bare", "-b", "main", origin.to_str().unwrap()]);
    init_repo(&seed);
    run_git(&seed, &["remote", "add", "origin", origin.to_str().unwrap()]);
    run_git(&seed, &["push", "origin", "main"]);

    run_git(root, &["clone", origin.to_str().unwrap(), repo.to_str().unwrap()]);
    run_git(&repo, &["branch", "feature-a"]);
    run_git(&repo, &["branch", "feature-c"]);
    run_git(&repo, &["checkout", "-b", "wip"]);
    fs::write(repo.join("wip.txt"), "not merged\n").unwrap();
    run_git(&repo, &["add", "-A"]);
    run_git(&repo, &["commit", "-m", "wip"]);
    run_git(&repo, &["checkout", "main"]);
    run_git(&repo, &["push", "origin", "feature-a", "feature-c", "wip"]);

    run_git(&origin, &["branch", "-D", "feature-c", "wip"]);
    (origin, repo)
}

#[cfg(unix)]
pub fn write_executable(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, script).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

pub fn prepend_path(stub_bin: &Path) -> String {
    let old = std::env::var("PATH").unwrap_or_default();
    format!("{}:{}", stub_bin.display(), old)
}
