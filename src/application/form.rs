use std::collections::BTreeSet;

use crate::domain::{read_amount, Expense, ParticipantName};

use super::{AppError, LedgerService};

/// Transient state of the "add expense" form.
///
/// Owned by the presentation layer, separate from the ledger itself. The split
/// selection is the set of included names; anyone not in the set is excluded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseForm {
    payer: Option<ParticipantName>,
    amount: String,
    activity: String,
    selection: BTreeSet<ParticipantName>,
}

impl ExpenseForm {
    /// A blank form with every current participant selected.
    pub fn new(ledger: &LedgerService) -> Self {
        Self {
            selection: ledger.participant_names(),
            ..Self::default()
        }
    }

    pub fn payer(&self) -> Option<&str> {
        self.payer.as_deref()
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn activity(&self) -> &str {
        &self.activity
    }

    pub fn selection(&self) -> &BTreeSet<ParticipantName> {
        &self.selection
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selection.contains(name)
    }

    pub fn select_payer(&mut self, ledger: &LedgerService, name: &str) -> Result<(), AppError> {
        let participant = ledger.get_participant(name)?;
        self.payer = Some(participant.name.clone());
        Ok(())
    }

    pub fn set_amount(&mut self, text: impl Into<String>) {
        self.amount = text.into();
    }

    pub fn set_activity(&mut self, text: impl Into<String>) {
        self.activity = text.into();
    }

    /// Flip whether a participant shares the next expense.
    /// Returns the new inclusion state.
    pub fn toggle(&mut self, ledger: &LedgerService, name: &str) -> Result<bool, AppError> {
        let participant = ledger.get_participant(name)?;
        if self.selection.remove(&participant.name) {
            Ok(false)
        } else {
            self.selection.insert(participant.name.clone());
            Ok(true)
        }
    }

    /// Newly added participants start out included.
    pub fn include_participant(&mut self, name: impl Into<ParticipantName>) {
        self.selection.insert(name.into());
    }

    /// Record the form as an expense. On success the form resets and everyone is
    /// selected again; on failure nothing changes.
    pub fn submit(&mut self, ledger: &mut LedgerService) -> Result<Expense, AppError> {
        // Blank or non-numeric text is a missing amount. The ledger reports
        // missing fields before it range-checks the amount.
        let expense = ledger.record_expense(
            self.payer.as_deref(),
            read_amount(&self.amount),
            self.activity.clone(),
            self.selection.clone(),
        )?;

        self.reset(ledger);
        Ok(expense)
    }

    /// Clear the entry fields and select every participant.
    pub fn reset(&mut self, ledger: &LedgerService) {
        *self = Self::new(ledger);
    }
}
