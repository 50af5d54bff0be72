use std::fmt;

/// Amounts are plain floating-point values. Shares are divided exactly and
/// only rounded when rendered, so balances keep summing to zero.
pub type Amount = f64;

/// Tolerance used when comparing computed balances.
pub const EPSILON: Amount = 1e-9;

/// Format an amount as an absolute value with two decimals.
/// Example: -12.345 -> "12.35", 50.0 -> "50.00"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount.abs())
}

/// Read the numeric value of amount text as typed.
/// Returns `None` when the text is blank or not a number; range checks are
/// left to [`validate_amount`].
/// Example: "50" -> Some(50.0), " 7.25 " -> Some(7.25), "abc" -> None
pub fn read_amount(input: &str) -> Option<Amount> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    input.parse().ok()
}

/// Check that an amount can be recorded: finite and greater than zero.
pub fn validate_amount(amount: Amount) -> Result<Amount, AmountError> {
    if !amount.is_finite() {
        return Err(AmountError::NotFinite);
    }
    if amount <= 0.0 {
        return Err(AmountError::NotPositive);
    }
    Ok(amount)
}

/// Clamp float residue left over from share division to zero for display.
pub fn settle_residue(amount: Amount) -> Amount {
    if amount.abs() < EPSILON { 0.0 } else { amount }
}

/// Returns true if two amounts are equal within [`EPSILON`].
pub fn approx_eq(a: Amount, b: Amount) -> bool {
    (a - b).abs() < EPSILON
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    NotFinite,
    NotPositive,
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::NotFinite => write!(f, "amount must be a finite number"),
            AmountError::NotPositive => write!(f, "amount must be greater than zero"),
        }
    }
}

impl std::error::Error for AmountError {}
