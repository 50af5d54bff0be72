use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::domain::{
    compute_all_balances, normalize_name, total_spent, validate_amount, Amount, BalanceSheet,
    Expense, Participant, ParticipantName,
};

use super::{AppError, MissingField};

/// Application service holding one session's roster and expenses.
/// This is the primary interface for any client (CLI, script runner, tests).
#[derive(Debug, Default)]
pub struct LedgerService {
    participants: Vec<Participant>,
    expenses: Vec<Expense>,
}

impl LedgerService {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Participant operations
    // ========================

    /// Add a participant. The name is trimmed; exact duplicates are rejected.
    pub fn add_participant(&mut self, name: &str) -> Result<Participant, AppError> {
        let Some(name) = normalize_name(name) else {
            debug!("rejected blank participant name");
            return Err(AppError::EmptyParticipantName);
        };

        if self.has_participant(&name) {
            debug!(participant = %name, "rejected duplicate participant");
            return Err(AppError::DuplicateParticipant(name));
        }

        let participant = Participant::new(name);
        self.participants.push(participant.clone());
        info!(
            participant = %participant.name,
            roster = self.participants.len(),
            "participant added"
        );
        Ok(participant)
    }

    /// Get a participant by exact name.
    pub fn get_participant(&self, name: &str) -> Result<&Participant, AppError> {
        self.participants
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| AppError::UnknownParticipant(name.to_string()))
    }

    pub fn has_participant(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p.name == name)
    }

    /// Participants in the order they were added.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Every participant name, used as the default split selection.
    pub fn participant_names(&self) -> BTreeSet<ParticipantName> {
        self.participants.iter().map(|p| p.name.clone()).collect()
    }

    // ========================
    // Expense operations
    // ========================

    /// Record a new expense.
    ///
    /// Missing payer, amount or split selection is reported as incomplete input.
    /// Every check runs before the expense list is touched.
    pub fn record_expense(
        &mut self,
        payer: Option<&str>,
        amount: Option<Amount>,
        activity: impl Into<String>,
        split_between: BTreeSet<ParticipantName>,
    ) -> Result<Expense, AppError> {
        let payer = match payer.map(str::trim) {
            Some(p) if !p.is_empty() => p,
            _ => return Err(self.incomplete(MissingField::Payer)),
        };
        let Some(amount) = amount else {
            return Err(self.incomplete(MissingField::Amount));
        };
        if split_between.is_empty() {
            return Err(self.incomplete(MissingField::Split));
        }

        let amount = validate_amount(amount)?;

        self.get_participant(payer)?;
        if let Some(unknown) = split_between.iter().find(|n| !self.has_participant(n)) {
            debug!(participant = %unknown, "split references unknown participant");
            return Err(AppError::UnknownParticipant(unknown.clone()));
        }

        let expense = Expense::new(payer, amount, split_between).with_activity(activity);
        self.expenses.push(expense.clone());

        info!(
            payer = %expense.payer,
            amount = expense.amount,
            split = expense.split_between.len(),
            payer_shares = expense.payer_in_split(),
            activity = %expense.activity,
            "expense recorded"
        );
        Ok(expense)
    }

    /// Expenses in the order they were recorded.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Sum of every recorded amount.
    pub fn total_spent(&self) -> Amount {
        total_spent(&self.expenses)
    }

    // ========================
    // Balance operations
    // ========================

    /// Compute net balances for every participant. Pure: calling it twice with
    /// no intervening change returns the same sheet.
    pub fn compute_balances(&self) -> BalanceSheet {
        let sheet = compute_all_balances(&self.participants, &self.expenses);
        debug!(
            participants = sheet.len(),
            expenses = self.expenses.len(),
            residual = sheet.total(),
            "balances computed"
        );
        sheet
    }

    fn incomplete(&self, field: MissingField) -> AppError {
        debug!(missing = %field, "rejected incomplete expense");
        AppError::IncompleteExpenseInput(field)
    }
}
