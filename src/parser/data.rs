//! Literal data source
//!
//! Programs read their input through a [`DataSource`]: a cursor over integer
//! literals with "at end?", "current literal" and "advance" operations. The
//! execution state pulls from it one literal at a time and treats exhaustion
//! as fatal.
//!
//! [`DataScanner`] is the file-backed implementation. A data file is a list
//! of signed integers separated by whitespace or line breaks, with optional
//! `#` comments.

use super::lexer::{LexError, Lexer, Token};
use crate::memory::cell::Word;

pub trait DataSource {
    /// True once every literal has been consumed
    fn is_at_end(&self) -> bool;

    /// The current literal; only meaningful when not at the end
    fn current(&self) -> Word;

    /// Move to the next literal
    fn advance(&mut self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataScanner {
    values: Vec<Word>,
    position: usize,
}

impl DataScanner {
    /// Scan a data text up front; anything but integer literals is rejected
    pub fn new(text: &str) -> Result<Self, LexError> {
        let tokens = Lexer::new(text).tokenize()?;
        let mut values = Vec::new();

        for token in tokens {
            match token {
                Token::IntLiteral(value, _) => values.push(value),
                Token::Newline(_) | Token::Eof(_) => {}
                other => {
                    return Err(LexError {
                        message: format!("Expected integer literal in data, found {}", other),
                        location: other.location(),
                    })
                }
            }
        }

        Ok(Self::from_values(values))
    }

    /// A source with no literals at all
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_values(values: Vec<Word>) -> Self {
        DataScanner {
            values,
            position: 0,
        }
    }

    /// Literals not yet consumed
    pub fn remaining(&self) -> usize {
        self.values.len().saturating_sub(self.position)
    }
}

impl DataSource for DataScanner {
    fn is_at_end(&self) -> bool {
        self.position >= self.values.len()
    }

    fn current(&self) -> Word {
        self.values.get(self.position).copied().unwrap_or_default()
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::SourceLocation;

    #[test]
    fn test_scan_values() {
        let mut scanner = DataScanner::new("1 2\n# skipped\n-3\n\n").unwrap();
        assert_eq!(scanner.remaining(), 3);

        let mut seen = Vec::new();
        while !scanner.is_at_end() {
            seen.push(scanner.current());
            scanner.advance();
        }
        assert_eq!(seen, vec![1, 2, -3]);

        scanner.advance();
        assert!(scanner.is_at_end());
        assert_eq!(scanner.remaining(), 0);
    }

    #[test]
    fn test_rejects_non_literals() {
        let err = DataScanner::new("4\nfive\n").unwrap_err();
        assert_eq!(err.location, SourceLocation::new(2, 1));
        assert!(err.message.contains("'five'"), "{}", err.message);
    }

    #[test]
    fn test_empty() {
        let scanner = DataScanner::empty();
        assert!(scanner.is_at_end());
        assert_eq!(DataScanner::new("").unwrap(), scanner);
    }
}
