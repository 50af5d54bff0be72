use thiserror::Error;

use crate::domain::AmountError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Participant already exists: {0}")]
    DuplicateParticipant(String),

    #[error("Participant name cannot be empty")]
    EmptyParticipantName,

    #[error("Participant not found: {0}")]
    UnknownParticipant(String),

    #[error("Please fill all fields and select players (missing {0})")]
    IncompleteExpenseInput(MissingField),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// The expense field that was left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Payer,
    Amount,
    Split,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingField::Payer => write!(f, "payer"),
            MissingField::Amount => write!(f, "amount"),
            MissingField::Split => write!(f, "split selection"),
        }
    }
}

impl From<AmountError> for AppError {
    fn from(err: AmountError) -> Self {
        AppError::InvalidAmount(err.to_string())
    }
}
