use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    format_amount, settle_residue, total_spent, Amount, BalanceEntry, BalanceSheet, Expense,
};

use super::LedgerService;

/// Which way money flows for a participant once everything is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    Owes,
    Gets,
}

impl Standing {
    /// Only a negative balance owes; zero and float residue render as "gets".
    pub fn of(balance: Amount) -> Self {
        if settle_residue(balance) < 0.0 {
            Standing::Owes
        } else {
            Standing::Gets
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Standing::Owes => "owes",
            Standing::Gets => "gets",
        }
    }
}

impl std::fmt::Display for Standing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReport {
    pub currency: String,
    pub generated_at: DateTime<Utc>,
    pub expense_count: usize,
    pub total_spent: Amount,
    pub entries: Vec<SettlementLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementLine {
    pub name: String,
    pub balance: Amount,
    pub standing: Standing,
    pub display: String,
}

impl SettlementLine {
    pub fn from_entry(entry: &BalanceEntry, currency: &str) -> Self {
        Self {
            name: entry.name.clone(),
            balance: settle_residue(entry.balance),
            standing: Standing::of(entry.balance),
            display: format_balance_line(&entry.name, entry.balance, currency),
        }
    }
}

impl SettlementReport {
    /// Build a report from the ledger's current state.
    pub fn build(ledger: &LedgerService, currency: &str) -> Self {
        let sheet = ledger.compute_balances();
        Self::from_sheet(&sheet, ledger.expenses(), currency)
    }

    pub fn from_sheet(sheet: &BalanceSheet, expenses: &[Expense], currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            generated_at: Utc::now(),
            expense_count: expenses.len(),
            total_spent: total_spent(expenses),
            entries: sheet
                .iter()
                .map(|entry| SettlementLine::from_entry(entry, currency))
                .collect(),
        }
    }
}

/// "<name> owes 15.00 SEK" / "<name> gets 60.00 SEK"
pub fn format_balance_line(name: &str, balance: Amount, currency: &str) -> String {
    let line = format!("{} {} {}", name, Standing::of(balance), format_amount(balance));
    with_currency(line, currency)
}

/// `<payer> paid <amount> <currency> for "<activity>" split among <n> players`
pub fn format_expense_line(expense: &Expense, currency: &str) -> String {
    format!(
        "{} paid {} for \"{}\" split among {} players",
        expense.payer,
        with_currency(format_plain(expense.amount), currency),
        expense.activity,
        expense.split_between.len()
    )
}

/// Amounts as typed: "90" rather than "90.00", "12.5" rather than "12.50".
fn format_plain(amount: Amount) -> String {
    amount.to_string()
}

fn with_currency(text: String, currency: &str) -> String {
    if currency.is_empty() {
        text
    } else {
        format!("{} {}", text, currency)
    }
}
