use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input};

use prune_branches::prune::Confirmer;

/// Interactive input on a terminal, a single stdin line otherwise.
pub(crate) struct StdinConfirmer;

impl Confirmer for StdinConfirmer {
    fn confirm(&mut self, prompt: &str) -> Result<String> {
        if can_prompt() {
            return Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .context("Prompt failed");
        }
        let mut stdout = std::io::stdout();
        write!(stdout, "{prompt} ")?;
        stdout.flush()?;
        let answer = read_answer(std::io::stdin().lock())?;
        writeln!(stdout)?;
        Ok(answer)
    }
}

pub(crate) struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> Result<String> {
        Ok("y".to_string())
    }
}

fn can_prompt() -> bool {
    use std::io::IsTerminal;
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// End of input reads as an empty answer.
fn read_answer(mut input: impl BufRead) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read confirmation from stdin")?;
    Ok(line.trim().to_string())
}
