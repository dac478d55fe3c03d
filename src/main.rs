mod cli;
mod prompt;

fn main() -> anyhow::Result<()> {
    crate::cli::run()
}
