//! Script parser
//!
//! This module provides the [`Parser`] struct, which turns the token stream of
//! an operation script into a [`Script`]. The grammar is one command per line:
//!
//! ```text
//! script   := command* EOF
//! command  := ("int" | "ref") ID
//!           | "new" ID | "input" ID | "print" ID
//!           | "set" ID INT
//!           | "copy" ID ID
//!           | "call" ID ID*
//!           | "{" NL command* "}"
//!           | "begin" NL command* "end"
//!           | "func" ID ID* "{" NL command* "}"
//! ```

use crate::memory::cell::{CellKind, Word};
use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Where a command sequence stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Closer {
    Eof,
    RBrace,
    End,
}

impl Closer {
    fn matches(self, token: &Token) -> bool {
        match self {
            Closer::Eof => matches!(token, Token::Eof(_)),
            Closer::RBrace => matches!(token, Token::RBrace(_)),
            Closer::End => matches!(token, Token::End(_)),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Closer::Eof => "end of file",
            Closer::RBrace => "'}'",
            Closer::End => "'end'",
        }
    }
}

/// Recursive descent parser for operation scripts
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Parser {
            tokens,
            position: 0,
        })
    }

    /// Parse the whole script
    pub fn parse_script(&mut self) -> Result<Script, ParseError> {
        let commands = self.parse_commands(Closer::Eof)?;
        Ok(Script { commands })
    }

    fn parse_commands(&mut self, closer: Closer) -> Result<Vec<Command>, ParseError> {
        let mut commands = Vec::new();
        loop {
            self.skip_newlines();
            let token = self.peek();
            if closer.matches(token) {
                return Ok(commands);
            }
            if matches!(token, Token::Eof(_)) {
                return Err(self.error(format!(
                    "Unexpected end of file, expected {}",
                    closer.describe()
                )));
            }
            commands.push(self.parse_command()?);
        }
    }

    fn parse_command(&mut self) -> Result<Command, ParseError> {
        let token = self.advance();
        let location = token.location();

        let command = match token {
            Token::Int(_) | Token::Ref(_) => {
                let kind = if matches!(token, Token::Int(_)) {
                    CellKind::Int
                } else {
                    CellKind::Ref
                };
                let name = self.expect_ident()?;
                Command::Declare {
                    name,
                    kind,
                    location,
                }
            }
            Token::New(_) => Command::New {
                name: self.expect_ident()?,
                location,
            },
            Token::Input(_) => Command::Input {
                name: self.expect_ident()?,
                location,
            },
            Token::Print(_) => Command::Print {
                name: self.expect_ident()?,
                location,
            },
            Token::Set(_) => {
                let name = self.expect_ident()?;
                let value = self.expect_int()?;
                Command::Set {
                    name,
                    value,
                    location,
                }
            }
            Token::Copy(_) => {
                let dst = self.expect_ident()?;
                let src = self.expect_ident()?;
                Command::Copy { dst, src, location }
            }
            Token::Call(_) => {
                let name = self.expect_ident()?;
                let actuals = self.ident_list();
                Command::Call {
                    name,
                    actuals,
                    location,
                }
            }
            Token::LBrace(_) => {
                let body = self.parse_body(Closer::RBrace)?;
                Command::Block { body, location }
            }
            Token::Begin(_) => {
                let body = self.parse_body(Closer::End)?;
                Command::Frame { body, location }
            }
            Token::Func(_) => {
                let name = self.expect_ident()?;
                let formals = self.ident_list();
                if !matches!(self.peek(), Token::LBrace(_)) {
                    return Err(self.error(format!(
                        "Expected '{{' to open body of '{}', found {}",
                        name,
                        self.peek()
                    )));
                }
                self.advance();
                let body = self.parse_body(Closer::RBrace)?;
                Command::FuncDecl {
                    name,
                    formals,
                    body,
                    location,
                }
            }
            other => {
                return Err(ParseError {
                    message: format!("Unexpected {}", other),
                    location,
                })
            }
        };

        self.expect_end_of_line()?;
        Ok(command)
    }

    /// Body of a block-like command, after its opening token
    fn parse_body(&mut self, closer: Closer) -> Result<Vec<Command>, ParseError> {
        self.expect_end_of_line()?;
        let body = self.parse_commands(closer)?;
        self.advance(); // closing token
        Ok(body)
    }

    fn ident_list(&mut self) -> Vec<String> {
        let mut names = Vec::new();
        while let Token::Ident(name, _) = self.peek() {
            names.push(name.clone());
            self.advance();
        }
        names
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Token::Ident(name, _) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            other => Err(self.error(format!("Expected identifier, found {}", other))),
        }
    }

    fn expect_int(&mut self) -> Result<Word, ParseError> {
        match self.peek() {
            Token::IntLiteral(value, _) => {
                let value = *value;
                self.advance();
                Ok(value)
            }
            other => Err(self.error(format!("Expected integer, found {}", other))),
        }
    }

    fn expect_end_of_line(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            Token::Newline(_) => {
                self.advance();
                Ok(())
            }
            Token::Eof(_) => Ok(()),
            other => Err(self.error(format!("Expected end of line, found {}", other))),
        }
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek(), Token::Newline(_)) {
            self.advance();
        }
    }

    fn peek(&self) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.position.min(last)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            location: self.peek().location(),
        }
    }
}

/// Parse a script in one call
pub fn parse_script(source: &str) -> Result<Script, ParseError> {
    Parser::new(source)?.parse_script()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_commands() {
        let script = parse_script("ref x\nnew x\nset x 5\nprint x\n").unwrap();
        assert_eq!(script.commands.len(), 4);
        match &script.commands[2] {
            Command::Set { name, value, .. } => {
                assert_eq!(name, "x");
                assert_eq!(*value, 5);
            }
            other => panic!("Expected set, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_function_and_call() {
        let source = "func swap a b {\n  int t\n}\nbegin\n  call swap x y\nend\n";
        let script = parse_script(source).unwrap();

        assert_eq!(script.commands.len(), 2);
        match &script.commands[0] {
            Command::FuncDecl {
                name,
                formals,
                body,
                ..
            } => {
                assert_eq!(name, "swap");
                assert_eq!(formals, &["a".to_string(), "b".to_string()]);
                assert_eq!(body.len(), 1);
            }
            other => panic!("Expected function declaration, got {:?}", other),
        }
        match &script.commands[1] {
            Command::Frame { body, .. } => match &body[0] {
                Command::Call { name, actuals, .. } => {
                    assert_eq!(name, "swap");
                    assert_eq!(actuals.len(), 2);
                }
                other => panic!("Expected call, got {:?}", other),
            },
            other => panic!("Expected frame, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_nested_blocks() {
        let script = parse_script("begin\n{\n{\nint z\n}\n}\nend").unwrap();
        let Command::Frame { body, .. } = &script.commands[0] else {
            panic!("Expected frame");
        };
        let Command::Block { body: inner, .. } = &body[0] else {
            panic!("Expected block");
        };
        assert!(matches!(inner[0], Command::Block { .. }));
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_script("begin\n{\nint z\nend").unwrap_err();
        assert!(err.message.contains("Unexpected 'end'"), "{}", err);

        let err = parse_script("begin\nint z\n").unwrap_err();
        assert!(err.message.contains("expected 'end'"), "{}", err);
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse_script("new x y").unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 7));
    }
}
