use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use prune_branches::git::{self, SystemGit};
use prune_branches::prune::{Mode, PruneOutcome, Pruner};

use crate::prompt::{AssumeYes, StdinConfirmer};

#[derive(Parser, Debug)]
#[command(
    name = "prune-branches",
    version,
    about = "List (and optionally delete) local branches merged into main whose remote branch is gone"
)]
struct Cli {
    /// Delete the stale branches (safe delete, asks for confirmation first)
    #[arg(short, long)]
    delete: bool,
    /// With --delete, skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
    /// Log every git invocation to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.delete {
            Mode::Delete
        } else {
            Mode::DryRun
        }
    }
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    git::ensure_git_available()?;

    let mode = cli.mode();
    if cli.yes && mode == Mode::DryRun {
        eprintln!("Warning: --yes has no effect without --delete");
    }

    let system_git = SystemGit;
    let pruner = Pruner::new(&system_git);
    let mut stdout = std::io::stdout();
    let outcome = if cli.yes {
        pruner.run(mode, &mut AssumeYes, &mut stdout)?
    } else {
        pruner.run(mode, &mut StdinConfirmer, &mut stdout)?
    };

    if let PruneOutcome::Deleted(summary) = &outcome {
        if !summary.failed.is_empty() {
            eprintln!(
                "Warning: {} branch(es) were not deleted; git refused them (use `git branch -D` to force)",
                summary.failed.len()
            );
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    use std::io::IsTerminal;
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .try_init();
}
