use std::fs::File;
use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::application::{format_balance_line, format_expense_line, ExpenseForm, LedgerService};
use crate::domain::read_amount;
use crate::io::Exporter;

/// One line typed into a session.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
#[command(name = "session", about = "Session commands")]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Add a player to the group
    #[command(name = "add-player", alias = "player")]
    AddPlayer {
        /// Player name (must be unique)
        name: String,
    },

    /// List players
    Players,

    /// Select who paid for the expense being entered
    Payer {
        /// Player name
        name: String,
    },

    /// Set the amount of the expense being entered
    Amount {
        /// Amount (e.g., "50" or "12.5")
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Set the activity of the expense being entered (e.g., "Refreshment")
    Activity {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Include or exclude a player from the split
    Toggle {
        /// Player name
        name: String,
    },

    /// Show the expense being entered
    Form,

    /// Record the expense being entered
    #[command(name = "add-expense")]
    AddExpense,

    /// Record an expense in one go
    Expense {
        /// Who paid
        payer: String,

        /// Amount paid
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// What it was for
        #[arg(short, long, default_value = "")]
        activity: String,

        /// Players sharing the cost, comma separated (defaults to everyone)
        #[arg(short, long, value_delimiter = ',')]
        split: Vec<String>,
    },

    /// List recorded expenses
    Expenses,

    /// Calculate who owes whom
    Calculate {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Export session results
    Export {
        /// What to export
        #[arg(value_enum)]
        kind: ExportKind,

        /// Output file (session output if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Balances,
    Expenses,
    Report,
}

/// Whether the session should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// In-memory session: the ledger plus the form for the next expense.
pub struct Session {
    ledger: LedgerService,
    form: ExpenseForm,
    currency: String,
}

impl Session {
    pub fn new(currency: impl Into<String>) -> Self {
        let ledger = LedgerService::new();
        let form = ExpenseForm::new(&ledger);
        Self {
            ledger,
            form,
            currency: currency.into(),
        }
    }

    pub fn ledger(&self) -> &LedgerService {
        &self.ledger
    }

    /// Execute one line of input, writing any output to `out`.
    /// Blank lines and `#` comments are ignored.
    pub fn execute(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let words = tokenize(line)?;
        let parsed = match SessionLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(err) if err.kind() == ErrorKind::DisplayHelp => {
                write!(out, "{}", err.render())?;
                return Ok(Flow::Continue);
            }
            Err(err) => bail!("{}", err.render().to_string().trim_end()),
        };

        debug!(command = ?parsed.command, "session command");
        self.dispatch(parsed.command, out)
    }

    fn dispatch(&mut self, command: SessionCommand, out: &mut dyn Write) -> Result<Flow> {
        match command {
            SessionCommand::AddPlayer { name } => {
                let participant = self.ledger.add_participant(&name)?;
                self.form.include_participant(participant.name.clone());
                writeln!(out, "Added player: {}", participant.name)?;
            }

            SessionCommand::Players => {
                if self.ledger.participants().is_empty() {
                    writeln!(out, "No players yet.")?;
                }
                for participant in self.ledger.participants() {
                    writeln!(out, "- {}", participant.name)?;
                }
            }

            SessionCommand::Payer { name } => {
                self.form.select_payer(&self.ledger, &name)?;
                writeln!(out, "Payer: {}", name)?;
            }

            SessionCommand::Amount { value } => {
                self.form.set_amount(value);
            }

            SessionCommand::Activity { words } => {
                self.form.set_activity(words.join(" "));
            }

            SessionCommand::Toggle { name } => {
                let included = self.form.toggle(&self.ledger, &name)?;
                let mark = if included { "[x]" } else { "[ ]" };
                writeln!(out, "{} {}", mark, name)?;
            }

            SessionCommand::Form => self.write_form(out)?,

            SessionCommand::AddExpense => {
                let expense = self.form.submit(&mut self.ledger)?;
                writeln!(out, "{}", format_expense_line(&expense, &self.currency))?;
            }

            SessionCommand::Expense {
                payer,
                amount,
                activity,
                split,
            } => {
                let split_between = if split.is_empty() {
                    self.ledger.participant_names()
                } else {
                    split
                        .iter()
                        .map(|name| name.trim().to_string())
                        .filter(|name| !name.is_empty())
                        .collect()
                };

                let expense = self.ledger.record_expense(
                    Some(payer.as_str()),
                    read_amount(&amount),
                    activity,
                    split_between,
                )?;
                writeln!(out, "{}", format_expense_line(&expense, &self.currency))?;
            }

            SessionCommand::Expenses => {
                if self.ledger.expenses().is_empty() {
                    writeln!(out, "No expenses yet.")?;
                }
                for expense in self.ledger.expenses() {
                    writeln!(out, "{}", format_expense_line(expense, &self.currency))?;
                }
            }

            SessionCommand::Calculate { format } => self.write_balances(format, out)?,

            SessionCommand::Export { kind, output } => {
                self.run_export(kind, output.as_deref(), out)?;
            }

            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn write_form(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Payer:    {}", self.form.payer().unwrap_or("(select player)"))?;
        writeln!(out, "Amount:   {}", self.form.amount())?;
        writeln!(out, "Activity: {}", self.form.activity())?;
        write!(out, "Split:   ")?;
        for participant in self.ledger.participants() {
            let mark = if self.form.is_selected(&participant.name) {
                "[x]"
            } else {
                "[ ]"
            };
            write!(out, " {} {}", mark, participant.name)?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn write_balances(&self, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
        let exporter = Exporter::new(&self.ledger, &self.currency);

        match format {
            OutputFormat::Json => {
                exporter.export_report_json(out)?;
            }
            OutputFormat::Csv => {
                exporter.export_balances_csv(out)?;
            }
            OutputFormat::Table => {
                let sheet = self.ledger.compute_balances();
                writeln!(out, "Final Summary")?;
                for entry in &sheet {
                    writeln!(
                        out,
                        "{}",
                        format_balance_line(&entry.name, entry.balance, &self.currency)
                    )?;
                }
            }
        }
        Ok(())
    }

    fn run_export(
        &self,
        kind: ExportKind,
        output: Option<&str>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let exporter = Exporter::new(&self.ledger, &self.currency);

        let mut file;
        let writer: &mut dyn Write = match output {
            Some(path) => {
                file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path))?;
                &mut file
            }
            None => &mut *out,
        };

        let summary = match kind {
            ExportKind::Balances => {
                format!("Exported {} balances", exporter.export_balances_csv(writer)?)
            }
            ExportKind::Expenses => {
                format!("Exported {} expenses", exporter.export_expenses_csv(writer)?)
            }
            ExportKind::Report => {
                let report = exporter.export_report_json(writer)?;
                format!("Exported report for {} players", report.entries.len())
            }
        };

        if let Some(path) = output {
            writeln!(out, "{} to {}", summary, path)?;
        }
        Ok(())
    }
}

/// Split a command line into words. Single or double quotes group words;
/// the quotes themselves are dropped.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        bail!("Unterminated {} quote", q);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
