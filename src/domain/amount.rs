use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of fractional digits the amount field accepts.
const MAX_FRACTION_DIGITS: usize = 8;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("an amount is required")]
    Empty,
    #[error("the amount must be greater than zero")]
    NotPositive,
    #[error("the amount is below the minimum of {minimum}")]
    BelowMinimum { minimum: Decimal },
}

/// Advisory keystroke check: accepts the proposed field text iff it is
/// empty or a syntactically valid in-progress decimal (integer digits with
/// an optional `.` and up to 8 fractional digits, or a leading-dot form
/// with 1-8 fractional digits).
///
/// Acceptance depends only on the proposed text; on reject the caller
/// keeps the current value, so the field never holds an invalid
/// intermediate state.
pub fn validate_keystroke(proposed: &str) -> bool {
    if proposed.is_empty() {
        return true;
    }
    let (int_part, frac_part) = match proposed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (proposed, None),
    };
    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match frac_part {
        Some(frac) => {
            if frac.len() > MAX_FRACTION_DIGITS || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return false;
            }
            // a bare "." carries no digits at all
            !(int_part.is_empty() && frac.is_empty())
        }
        None => !int_part.is_empty(),
    }
}

/// The amount text a buyer is typing for a variable-price product.
///
/// Created empty when the product is selected and mutated per keystroke;
/// edits that would make the text malformed are rejected and leave the
/// previous value in place.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AmountField {
    text: String,
}

impl AmountField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Applies an edit if it keeps the field well-formed. Returns whether
    /// the edit was applied.
    pub fn apply(&mut self, proposed: &str) -> bool {
        if validate_keystroke(proposed) {
            self.text.clear();
            self.text.push_str(proposed);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// Validates the field text at submission time and parses it.
///
/// Fails with [`ValidationError::Empty`] on empty text,
/// [`ValidationError::NotPositive`] when the parsed value is not strictly
/// positive, and [`ValidationError::BelowMinimum`] when a non-zero minimum
/// applies and the value falls short of it. Text that does not parse as a
/// decimal (unreachable behind the keystroke guard) is rejected as not
/// positive. Whitespace is not trimmed here.
pub fn validate_submission(text: &str, min: Decimal) -> Result<Decimal, ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }
    let value = parse_decimal(text).ok_or(ValidationError::NotPositive)?;
    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive);
    }
    if min > Decimal::ZERO && value < min {
        return Err(ValidationError::BelowMinimum { minimum: min });
    }
    Ok(value)
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    // "123." and ".5" are valid field states but not decimal literals
    let trimmed = text.strip_suffix('.').unwrap_or(text);
    if let Some(fraction) = trimmed.strip_prefix('.') {
        format!("0.{fraction}").parse().ok()
    } else {
        trimmed.parse().ok()
    }
}

/// The positive amount a settlement attempt actually charges.
///
/// Resolved fresh at the start of each attempt, either from the catalog
/// price or from the validated entered amount; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Serialize, Deserialize)]
pub struct ChargeAmount(Decimal);

impl ChargeAmount {
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(ValidationError::NotPositive)
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for ChargeAmount {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChargeAmount> for Decimal {
    fn from(amount: ChargeAmount) -> Self {
        amount.0
    }
}

impl core::fmt::Display for ChargeAmount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
