mod common;

use std::fs;

use anyhow::Result;
use common::assert_close;
use splitledger::cli::{run_interactive, run_script, Flow, Session};
use tempfile::TempDir;

/// Helper to run one line and capture its output
fn exec(session: &mut Session, line: &str) -> Result<String> {
    let mut out = Vec::new();
    session.execute(line, &mut out)?;
    Ok(String::from_utf8(out)?)
}

/// Helper to write a script into a temporary directory
fn write_script(dir: &TempDir, body: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join("session.txt");
    fs::write(&path, body)?;
    Ok(path)
}

#[test]
fn test_form_driven_session() -> Result<()> {
    let mut session = Session::new("SEK");

    exec(&mut session, "add-player Alice")?;
    exec(&mut session, "add-player Bob")?;
    exec(&mut session, "add-player Cara")?;

    exec(&mut session, "payer Alice")?;
    exec(&mut session, "amount 90")?;
    exec(&mut session, "activity Dinner at the lake")?;
    let line = exec(&mut session, "add-expense")?;
    assert_eq!(
        line,
        "Alice paid 90 SEK for \"Dinner at the lake\" split among 3 players\n"
    );

    exec(&mut session, "payer Bob")?;
    exec(&mut session, "amount 30")?;
    let toggled = exec(&mut session, "toggle Alice")?;
    assert_eq!(toggled, "[ ] Alice\n");
    exec(&mut session, "add-expense")?;

    let summary = exec(&mut session, "calculate")?;
    assert_eq!(
        summary,
        "Final Summary\nAlice gets 60.00 SEK\nBob owes 15.00 SEK\nCara owes 45.00 SEK\n"
    );
    Ok(())
}

#[test]
fn test_form_display_after_submit() -> Result<()> {
    let mut session = Session::new("SEK");
    exec(&mut session, "add-player Alice")?;
    exec(&mut session, "add-player Bob")?;
    exec(&mut session, "toggle Bob")?;
    exec(&mut session, "payer Alice")?;
    exec(&mut session, "amount 12")?;
    exec(&mut session, "add-expense")?;

    let form = exec(&mut session, "form")?;

    assert!(form.contains("Payer:    (select player)"));
    assert!(form.contains("[x] Alice [x] Bob"));
    Ok(())
}

#[test]
fn test_incomplete_expense_is_a_notice() -> Result<()> {
    let input = "add-player Alice\npayer Alice\nadd-expense\nplayers\n";
    let mut out = Vec::new();

    let session = run_interactive(input.as_bytes(), &mut out, "SEK", false)?;
    let text = String::from_utf8(out)?;

    assert!(text.contains("Notice: Please fill all fields and select players"));
    assert!(text.contains("- Alice"));
    assert!(session.ledger().expenses().is_empty());
    Ok(())
}

#[test]
fn test_duplicate_player_is_a_notice() -> Result<()> {
    let input = "add-player Alice\nadd-player Alice\n";
    let mut out = Vec::new();

    let session = run_interactive(input.as_bytes(), &mut out, "SEK", false)?;
    let text = String::from_utf8(out)?;

    assert!(text.contains("Notice: Participant already exists: Alice"));
    assert_eq!(session.ledger().participants().len(), 1);
    Ok(())
}

#[test]
fn test_quit_stops_reading() -> Result<()> {
    let input = "add-player Alice\nquit\nadd-player Bob\n";
    let mut out = Vec::new();

    let session = run_interactive(input.as_bytes(), &mut out, "SEK", false)?;

    assert_eq!(session.ledger().participants().len(), 1);
    Ok(())
}

#[test]
fn test_help_does_not_fail() -> Result<()> {
    let mut session = Session::new("SEK");
    let mut out = Vec::new();

    let flow = session.execute("help", &mut out)?;

    assert_eq!(flow, Flow::Continue);
    assert!(String::from_utf8(out)?.contains("add-player"));
    Ok(())
}

#[test]
fn test_run_script() -> Result<()> {
    let dir = TempDir::new()?;
    let script = write_script(
        &dir,
        "# weekend trip\n\
         add-player Alice\n\
         add-player Bob\n\
         add-player \"Cara Lind\"\n\
         \n\
         expense Alice 90 --activity Groceries\n\
         expense Bob 30 --split \"Bob,Cara Lind\"\n",
    )?;
    let mut out = Vec::new();

    let session = run_script(&script, &mut out, "SEK", false)?;
    let balances = session.ledger().compute_balances();

    assert_close(balances.get("Alice").unwrap_or_default(), 60.0);
    assert_close(balances.get("Bob").unwrap_or_default(), -15.0);
    assert_close(balances.get("Cara Lind").unwrap_or_default(), -45.0);
    Ok(())
}

#[test]
fn test_run_script_stops_at_failing_line() -> Result<()> {
    let dir = TempDir::new()?;
    let script = write_script(&dir, "add-player Alice\nexpense Alice 0\nadd-player Bob\n")?;
    let mut out = Vec::new();

    let err = match run_script(&script, &mut out, "SEK", false) {
        Ok(_) => panic!("script with a zero amount should fail"),
        Err(err) => err,
    };

    assert!(format!("{err:#}").contains(":2"));
    assert!(format!("{err:#}").contains("amount must be greater than zero"));
    Ok(())
}

#[test]
fn test_run_script_keep_going() -> Result<()> {
    let dir = TempDir::new()?;
    let script = write_script(&dir, "add-player Alice\nexpense Alice 0\nadd-player Bob\n")?;
    let mut out = Vec::new();

    let session = run_script(&script, &mut out, "SEK", true)?;
    let text = String::from_utf8(out)?;

    assert!(text.contains("Line 2: Invalid amount"));
    assert_eq!(session.ledger().participants().len(), 2);
    Ok(())
}

#[test]
fn test_export_to_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("balances.csv");
    let mut session = Session::new("SEK");

    exec(&mut session, "add-player Alice")?;
    exec(&mut session, "add-player Bob")?;
    exec(&mut session, "expense Alice 100")?;
    let line = exec(
        &mut session,
        &format!("export balances -o \"{}\"", path.display()),
    )?;

    assert!(line.starts_with("Exported 2 balances to "));
    let csv = fs::read_to_string(&path)?;
    assert_eq!(csv, "name,balance,standing\nAlice,50.00,gets\nBob,-50.00,owes\n");
    Ok(())
}

#[test]
fn test_calculate_as_json() -> Result<()> {
    let mut session = Session::new("EUR");
    exec(&mut session, "add-player Alice")?;
    exec(&mut session, "add-player Bob")?;
    exec(&mut session, "expense Bob 20 -s Alice")?;

    let json = exec(&mut session, "calculate --format json")?;
    let value: serde_json::Value = serde_json::from_str(&json)?;

    assert_eq!(value["currency"], "EUR");
    assert_eq!(value["entries"][0]["display"], "Alice owes 20.00 EUR");
    assert_eq!(value["entries"][1]["display"], "Bob gets 20.00 EUR");
    Ok(())
}
