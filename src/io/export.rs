use anyhow::Result;
use std::io::Write;

use crate::application::{LedgerService, SettlementReport, Standing};
use crate::domain::settle_residue;

/// Exporter for writing session results to various formats
pub struct Exporter<'a> {
    ledger: &'a LedgerService,
    currency: &'a str,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a LedgerService, currency: &'a str) -> Self {
        Self { ledger, currency }
    }

    /// Export current balances to CSV format
    pub fn export_balances_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let sheet = self.ledger.compute_balances();
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["name", "balance", "standing"])?;

        let mut count = 0;
        for entry in &sheet {
            let balance = format!("{:.2}", settle_residue(entry.balance));
            csv_writer.write_record([
                entry.name.as_str(),
                balance.as_str(),
                Standing::of(entry.balance).as_str(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export recorded expenses to CSV format
    pub fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "id",
            "recorded_at",
            "payer",
            "amount",
            "activity",
            "split_between",
        ])?;

        let mut count = 0;
        for expense in self.ledger.expenses() {
            let split: Vec<&str> = expense.split_between.iter().map(String::as_str).collect();
            csv_writer.write_record([
                expense.id.to_string(),
                expense.recorded_at.to_rfc3339(),
                expense.payer.clone(),
                expense.amount.to_string(),
                expense.activity.clone(),
                split.join(";"),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the settlement report as pretty JSON
    pub fn export_report_json<W: Write>(&self, mut writer: W) -> Result<SettlementReport> {
        let report = SettlementReport::build(self.ledger, self.currency);

        let json = serde_json::to_string_pretty(&report)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(report)
    }
}
