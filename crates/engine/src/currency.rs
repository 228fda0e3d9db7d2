use std::fmt;

use crate::EngineError;

/// A user's preferred currency, as a three-letter ISO-like code.
///
/// The ledger never converts between currencies: the code is a label echoed
/// back with balances. Input is trimmed and upper-cased (`"eur"` → `EUR`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub const DEFAULT: &'static str = "USD";

    /// Canonical currency code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for CurrencyCode {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let code = value.trim().to_ascii_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(EngineError::InvalidInput(format!(
                "unsupported currency: {}",
                value.trim()
            )));
        }
        Ok(Self(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let code = CurrencyCode::try_from(" eur ").unwrap();
        assert_eq!(code.code(), "EUR");
    }

    #[test]
    fn rejects_non_codes() {
        assert!(CurrencyCode::try_from("EURO").is_err());
        assert!(CurrencyCode::try_from("E1R").is_err());
        assert!(CurrencyCode::try_from("").is_err());
    }

    #[test]
    fn default_is_usd() {
        assert_eq!(CurrencyCode::default().to_string(), "USD");
    }
}
