use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Amount, ParticipantName};

pub type ExpenseId = Uuid;

/// An expense paid by one participant and shared equally by a set of participants.
/// Expenses are immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    /// Who paid (credited the full amount)
    pub payer: ParticipantName,
    /// Amount paid (always positive)
    pub amount: Amount,
    /// Free-text label, may be empty
    pub activity: String,
    /// Who shares the cost. The payer does not have to be a member.
    pub split_between: BTreeSet<ParticipantName>,
    /// When the expense was entered
    pub recorded_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense. Names are not checked here; the ledger validates
    /// them against its roster before recording.
    pub fn new(
        payer: impl Into<ParticipantName>,
        amount: Amount,
        split_between: BTreeSet<ParticipantName>,
    ) -> Self {
        assert!(
            amount.is_finite() && amount > 0.0,
            "Expense amount must be positive"
        );
        assert!(
            !split_between.is_empty(),
            "Expense must be split between at least one participant"
        );
        Self {
            id: Uuid::new_v4(),
            payer: payer.into(),
            amount,
            activity: String::new(),
            split_between,
            recorded_at: Utc::now(),
        }
    }

    pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
        self.activity = activity.into();
        self
    }

    /// The amount each member of the split is debited.
    pub fn share(&self) -> Amount {
        self.amount / self.split_between.len() as Amount
    }

    /// Returns true if the payer is also one of the people sharing the cost.
    pub fn payer_in_split(&self) -> bool {
        self.split_between.contains(&self.payer)
    }

    /// Net effect of this expense on a single participant.
    pub fn effect_on(&self, name: &str) -> Amount {
        let mut effect = 0.0;
        if self.split_between.contains(name) {
            effect -= self.share();
        }
        if self.payer == name {
            effect += self.amount;
        }
        effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(names: &[&str]) -> BTreeSet<ParticipantName> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_create_expense() {
        let expense = Expense::new("Alice", 90.0, split(&["Alice", "Bob", "Cara"]))
            .with_activity("Dinner");

        assert_eq!(expense.payer, "Alice");
        assert_eq!(expense.amount, 90.0);
        assert_eq!(expense.activity, "Dinner");
        assert_eq!(expense.split_between.len(), 3);
        assert!(expense.payer_in_split());
    }

    #[test]
    fn test_share_is_not_rounded() {
        let expense = Expense::new("Alice", 100.0, split(&["Alice", "Bob", "Cara"]));
        assert_eq!(expense.share(), 100.0 / 3.0);
    }

    #[test]
    fn test_effect_on_payer_inside_split() {
        let expense = Expense::new("Alice", 100.0, split(&["Alice", "Bob"]));
        assert_eq!(expense.effect_on("Alice"), 50.0);
        assert_eq!(expense.effect_on("Bob"), -50.0);
        assert_eq!(expense.effect_on("Cara"), 0.0);
    }

    #[test]
    fn test_effect_on_payer_outside_split() {
        let expense = Expense::new("Bob", 30.0, split(&["Cara"]));
        assert!(!expense.payer_in_split());
        assert_eq!(expense.effect_on("Bob"), 30.0);
        assert_eq!(expense.effect_on("Cara"), -30.0);
    }

    #[test]
    #[should_panic(expected = "Expense amount must be positive")]
    fn test_expense_requires_positive_amount() {
        Expense::new("Alice", 0.0, split(&["Alice"]));
    }

    #[test]
    #[should_panic(expected = "at least one participant")]
    fn test_expense_requires_split() {
        Expense::new("Alice", 10.0, BTreeSet::new());
    }
}
