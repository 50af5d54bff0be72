use serde::{Deserialize, Serialize};

use super::{Amount, Expense, Participant, ParticipantName};

/// Net position of one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub name: ParticipantName,
    /// Negative: owes money. Positive: is owed money. Zero: settled.
    pub balance: Amount,
}

/// Net balances for every participant, in roster order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    entries: Vec<BalanceEntry>,
}

impl BalanceSheet {
    pub fn entries(&self) -> &[BalanceEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<Amount> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.balance)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances. Zero (within float tolerance) for any valid ledger.
    pub fn total(&self) -> Amount {
        self.entries.iter().map(|e| e.balance).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BalanceEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a BalanceSheet {
    type Item = &'a BalanceEntry;
    type IntoIter = std::slice::Iter<'a, BalanceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Compute balances for every participant from a list of expenses.
/// Participants that appear in no expense get a zero entry; names in expenses
/// that are not on the roster are ignored.
pub fn compute_all_balances(participants: &[Participant], expenses: &[Expense]) -> BalanceSheet {
    let mut entries: Vec<BalanceEntry> = participants
        .iter()
        .map(|p| BalanceEntry {
            name: p.name.clone(),
            balance: 0.0,
        })
        .collect();

    for expense in expenses {
        for entry in entries.iter_mut() {
            entry.balance += expense.effect_on(&entry.name);
        }
    }

    BalanceSheet { entries }
}

/// Sum of every recorded expense amount.
pub fn total_spent(expenses: &[Expense]) -> Amount {
    expenses.iter().map(|e| e.amount).sum()
}
