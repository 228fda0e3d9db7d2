use std::{fmt, ops::Neg, str::FromStr};

use crate::EngineError;

/// An amount of money in cents.
///
/// Expense totals, split shares and balances are all `Money`. The value is
/// signed because balances are: positive when the other user owes, negative
/// when they are owed.
///
/// ```rust
/// use engine::Money;
///
/// let share: Money = "33.34".parse().unwrap();
/// assert_eq!(share.cents(), 3334);
/// assert_eq!(share.to_string(), "33.34");
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest expense total the ledger accepts, `99999999.99`.
    pub const MAX_TOTAL: Money = Money(9_999_999_999);

    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        if self.0 < 0 {
            f.write_str("-")?;
        }
        write!(f, "{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for Money {
    fn from(cents: i64) -> Self {
        Self(cents)
    }
}

impl From<Money> for i64 {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

fn digits(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses `"12"`, `"12.5"` or `"-12.50"`: an optional sign, whole units
    /// and at most two decimals after a `.`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidInput(format!("invalid amount: {s}"));

        let text = s.trim();
        let (sign, text) = match text.as_bytes().first() {
            Some(b'-') => (-1, &text[1..]),
            Some(b'+') => (1, &text[1..]),
            _ => (1, text),
        };
        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));

        let units = digits(whole).ok_or_else(invalid)?;
        let cents = match fraction.len() {
            0 => 0,
            1 => digits(fraction).ok_or_else(invalid)? * 10,
            2 => digits(fraction).ok_or_else(invalid)?,
            _ => {
                return Err(EngineError::InvalidInput(
                    "amount has more than 2 decimals".to_string(),
                ));
            }
        };

        units
            .checked_mul(100)
            .and_then(|value| value.checked_add(cents))
            .map(|value| Money(sign * value))
            .ok_or_else(|| EngineError::InvalidInput("amount too large".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_two_decimals() {
        assert_eq!(Money::new(0).to_string(), "0.00");
        assert_eq!(Money::new(1).to_string(), "0.01");
        assert_eq!(Money::new(10).to_string(), "0.10");
        assert_eq!(Money::new(3334).to_string(), "33.34");
        assert_eq!(Money::new(-3333).to_string(), "-33.33");
        assert_eq!(Money::MAX_TOTAL.to_string(), "99999999.99");
    }

    #[test]
    fn parses_decimal_strings() {
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!("10.".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("-0.01".parse::<Money>().unwrap().cents(), -1);
        assert_eq!("+1.00".parse::<Money>().unwrap().cents(), 100);
        assert_eq!("  2.30 ".parse::<Money>().unwrap().cents(), 230);
    }

    #[test]
    fn rejects_garbage() {
        for input in ["12.345", "", "-", "1.2.3", "1e3", ".50", "10,50", "1.-5", "abc"] {
            assert!(input.parse::<Money>().is_err(), "{input:?} parsed");
        }
    }

    #[test]
    fn rejects_values_past_i64() {
        assert_eq!(
            "92233720368547758.08".parse::<Money>(),
            Err(EngineError::InvalidInput("amount too large".to_string()))
        );
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        assert_eq!(
            Money::new(5).checked_add(Money::new(7)),
            Some(Money::new(12))
        );
        assert_eq!(Money::new(5).checked_sub(Money::new(7)), Some(Money::new(-2)));
        assert_eq!(Money::new(i64::MAX).checked_add(Money::new(1)), None);
        assert_eq!(Money::new(i64::MIN).checked_sub(Money::new(1)), None);
    }
}
