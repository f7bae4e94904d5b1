use std::fmt::{Display, Formatter};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 32;

/// Stooq ticker, e.g. `^spx`, `aapl.us`, `eurusd`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a symbol to lowercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let normalized = trimmed.to_ascii_lowercase();
        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || matches!(ch, '^' | '.' | '-' | '_' | '=');
            if !valid {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_symbol() {
        let parsed = Symbol::parse(" ^SPX ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "^spx");
    }

    #[test]
    fn accepts_exchange_suffix_and_underscore() {
        assert!(Symbol::parse("aapl.us").is_ok());
        assert!(Symbol::parse("INVALID_SYMBOL").is_ok());
    }

    #[test]
    fn rejects_blank_symbol() {
        let err = Symbol::parse("   ").expect_err("must fail");
        assert_eq!(err, ValidationError::EmptySymbol);
    }

    #[test]
    fn rejects_invalid_chars() {
        let err = Symbol::parse("aapl&d1=1").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidChar { ch: '&', index: 4 }));
    }

    #[test]
    fn rejects_overlong_symbol() {
        let err = Symbol::parse(&"a".repeat(40)).expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolTooLong { len: 40, .. }));
    }
}
