mod session;

pub use session::*;

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

/// splitledger - shared expense tracker
#[derive(Parser)]
#[command(name = "splitledger")]
#[command(about = "Track shared expenses in a group and work out who owes whom")]
#[command(version)]
pub struct Cli {
    /// Currency label shown next to amounts
    #[arg(short, long, default_value = "SEK", global = true)]
    pub currency: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session reading commands from stdin (default)
    Session,

    /// Replay session commands from a script file
    Run {
        /// Script with one session command per line
        script: PathBuf,

        /// Report failing lines and continue instead of stopping
        #[arg(long)]
        keep_going: bool,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();

        match self.command.unwrap_or(Commands::Session) {
            Commands::Session => {
                let stdin = io::stdin();
                let prompt = stdin.is_terminal();
                run_interactive(stdin.lock(), &mut out, &self.currency, prompt)?;
            }

            Commands::Run { script, keep_going } => {
                run_script(&script, &mut out, &self.currency, keep_going)?;
            }
        }

        Ok(())
    }
}

/// Read commands until end of input or `quit`. Rejected commands are
/// reported as notices and the session carries on.
pub fn run_interactive<R: BufRead>(
    input: R,
    out: &mut dyn Write,
    currency: &str,
    prompt: bool,
) -> Result<Session> {
    let mut session = Session::new(currency);

    if prompt {
        writeln!(out, "Weekly Expense Tracker (type 'help' for commands)")?;
    }

    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        match session.execute(&line, out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => writeln!(out, "Notice: {}", err)?,
        }
    }

    info!(
        players = session.ledger().participants().len(),
        expenses = session.ledger().expenses().len(),
        "session ended"
    );
    Ok(session)
}

/// Replay a script. Stops at the first failing line unless `keep_going` is set.
pub fn run_script(
    path: &Path,
    out: &mut dyn Write,
    currency: &str,
    keep_going: bool,
) -> Result<Session> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open script: {}", path.display()))?;
    let mut session = Session::new(currency);

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_no))?;

        match session.execute(&line, out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) if keep_going => {
                writeln!(out, "Line {}: {}", line_no, err)?;
            }
            Err(err) => {
                return Err(err.context(format!("{}:{}", path.display(), line_no)));
            }
        }
    }

    Ok(session)
}
