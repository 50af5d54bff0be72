// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::collections::BTreeSet;

use anyhow::Result;
use splitledger::application::LedgerService;
use splitledger::domain::ParticipantName;

/// Helper to create a ledger with the given roster
pub fn ledger_with(names: &[&str]) -> Result<LedgerService> {
    let mut ledger = LedgerService::new();
    for name in names {
        ledger.add_participant(name)?;
    }
    Ok(ledger)
}

/// Helper to build a split selection
pub fn split(names: &[&str]) -> BTreeSet<ParticipantName> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Helper to record an expense with no activity label
pub fn pay(ledger: &mut LedgerService, payer: &str, amount: f64, between: &[&str]) -> Result<()> {
    ledger.record_expense(Some(payer), Some(amount), "", split(between))?;
    Ok(())
}

/// Floating-point comparison for balances
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
