//! Lexer (tokenizer) for operation scripts and data files
//!
//! Converts raw text into a flat [`Token`] stream. Scripts are line oriented,
//! so line breaks are kept as [`Token::Newline`]; `#` starts a comment that
//! runs to the end of the line. Data files go through the same lexer and are
//! expected to contain only integer literals.

use super::ast::SourceLocation;
use crate::memory::cell::Word;
use std::fmt;

/// All token variants produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    IntLiteral(Word, SourceLocation),

    // Identifiers
    Ident(String, SourceLocation),

    // Keywords
    Int(SourceLocation),
    Ref(SourceLocation),
    New(SourceLocation),
    Set(SourceLocation),
    Copy(SourceLocation),
    Input(SourceLocation),
    Print(SourceLocation),
    Begin(SourceLocation),
    End(SourceLocation),
    Func(SourceLocation),
    Call(SourceLocation),

    // Delimiters
    LBrace(SourceLocation), // {
    RBrace(SourceLocation), // }

    Newline(SourceLocation),
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::IntLiteral(_, loc)
            | Token::Ident(_, loc)
            | Token::Int(loc)
            | Token::Ref(loc)
            | Token::New(loc)
            | Token::Set(loc)
            | Token::Copy(loc)
            | Token::Input(loc)
            | Token::Print(loc)
            | Token::Begin(loc)
            | Token::End(loc)
            | Token::Func(loc)
            | Token::Call(loc)
            | Token::LBrace(loc)
            | Token::RBrace(loc)
            | Token::Newline(loc)
            | Token::Eof(loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntLiteral(n, _) => write!(f, "int literal {}", n),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::Int(_) => write!(f, "'int'"),
            Token::Ref(_) => write!(f, "'ref'"),
            Token::New(_) => write!(f, "'new'"),
            Token::Set(_) => write!(f, "'set'"),
            Token::Copy(_) => write!(f, "'copy'"),
            Token::Input(_) => write!(f, "'input'"),
            Token::Print(_) => write!(f, "'print'"),
            Token::Begin(_) => write!(f, "'begin'"),
            Token::End(_) => write!(f, "'end'"),
            Token::Func(_) => write!(f, "'func'"),
            Token::Call(_) => write!(f, "'call'"),
            Token::LBrace(_) => write!(f, "'{{'"),
            Token::RBrace(_) => write!(f, "'}}'"),
            Token::Newline(_) => write!(f, "end of line"),
            Token::Eof(_) => write!(f, "end of file"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    ///
    /// Consecutive line breaks collapse into one `Newline` token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_blanks_and_comments();

            if self.is_at_end() {
                tokens.push(Token::Eof(self.current_location()));
                break;
            }

            if self.peek() == Some('\n') {
                let loc = self.current_location();
                self.advance();
                if !matches!(tokens.last(), None | Some(Token::Newline(_))) {
                    tokens.push(Token::Newline(loc));
                }
                continue;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file".to_string(),
            location: loc,
        })?;

        match ch {
            '{' => Ok(Token::LBrace(loc)),
            '}' => Ok(Token::RBrace(loc)),
            '-' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.number_literal(ch, loc),
            c if c.is_ascii_digit() => self.number_literal(c, loc),
            c if c.is_ascii_alphabetic() || c == '_' => Ok(self.identifier_or_keyword(c, loc)),
            _ => Err(LexError {
                message: format!("Unexpected character '{}'", ch),
                location: loc,
            }),
        }
    }

    /// Parse a (possibly negative) integer literal
    fn number_literal(&mut self, first: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if self
            .peek()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        {
            return Err(LexError {
                message: format!("Invalid integer literal: {}{}", num_str, self.rest_of_word()),
                location: loc,
            });
        }

        let value = num_str.parse::<Word>().map_err(|_| LexError {
            message: format!("Integer literal out of range: {}", num_str),
            location: loc,
        })?;

        Ok(Token::IntLiteral(value, loc))
    }

    fn identifier_or_keyword(&mut self, first: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "int" => Token::Int(loc),
            "ref" => Token::Ref(loc),
            "new" => Token::New(loc),
            "set" => Token::Set(loc),
            "copy" => Token::Copy(loc),
            "input" => Token::Input(loc),
            "print" => Token::Print(loc),
            "begin" => Token::Begin(loc),
            "end" => Token::End(loc),
            "func" => Token::Func(loc),
            "call" => Token::Call(loc),
            _ => Token::Ident(ident, loc),
        }
    }

    /// Consume the remainder of a malformed word for the error message
    fn rest_of_word(&mut self) -> String {
        let mut rest = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                rest.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        rest
    }

    /// Skip spaces, tabs and `#` comments, stopping at a line break
    fn skip_blanks_and_comments(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '#' => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
