use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::token::{Token, TokenKind};

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Scan error: {} line(s) with lexical errors", .errors.len())]
    Scan { errors: ScanErrors },

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorClass {
    UnexpectedCharacter,
    InvalidNumberLiteral,
    UnterminatedString,
    /// Reserved: no production raises it yet.
    UnterminatedNumberLiteral,
    UnterminatedComment,
}

impl ScanErrorClass {
    pub fn name(&self) -> &'static str {
        match self {
            Self::UnexpectedCharacter => "UnexpectedCharacter",
            Self::InvalidNumberLiteral => "InvalidNumberLiteral",
            Self::UnterminatedString => "UnterminatedString",
            Self::UnterminatedNumberLiteral => "UnterminatedNumberLiteral",
            Self::UnterminatedComment => "UnterminatedComment",
        }
    }
}

impl fmt::Display for ScanErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("error at line {line}, column {column}: {message}")]
pub struct ScanError {
    pub message: String,
    pub class: ScanErrorClass,
    pub snippet: String,
    pub line: usize,
    pub column: usize,
}

impl ScanError {
    pub fn unexpected_character(ch: char, line: usize, column: usize) -> Self {
        Self {
            message: format!("unexpected character '{}'", ch),
            class: ScanErrorClass::UnexpectedCharacter,
            snippet: ch.to_string(),
            line,
            column,
        }
    }

    pub fn invalid_number_literal(text: &str, line: usize, column: usize) -> Self {
        Self {
            message: format!("invalid number literal '{}'", text),
            class: ScanErrorClass::InvalidNumberLiteral,
            snippet: text.to_string(),
            line,
            column,
        }
    }

    pub fn unterminated_string(snippet: &str, line: usize, column: usize) -> Self {
        Self {
            message: "unterminated string".to_string(),
            class: ScanErrorClass::UnterminatedString,
            snippet: snippet.to_string(),
            line,
            column,
        }
    }

    pub fn unterminated_comment(snippet: &str, line: usize, column: usize) -> Self {
        Self {
            message: "unterminated comment".to_string(),
            class: ScanErrorClass::UnterminatedComment,
            snippet: snippet.to_string(),
            line,
            column,
        }
    }
}

/// Lexical errors keyed by source line. Only the first error of a line is
/// kept; later ones on the same line are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanErrors {
    by_line: BTreeMap<usize, ScanError>,
}

impl ScanErrors {
    /// Returns `false` when the line already holds an error.
    pub fn record(&mut self, error: ScanError) -> bool {
        if self.by_line.contains_key(&error.line) {
            return false;
        }
        self.by_line.insert(error.line, error);
        true
    }

    pub fn get(&self, line: usize) -> Option<&ScanError> {
        self.by_line.get(&line)
    }

    /// Errors in line order.
    pub fn iter(&self) -> impl Iterator<Item = &ScanError> {
        self.by_line.values()
    }

    pub fn len(&self) -> usize {
        self.by_line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Syntax error at line {} column {} {location}: {message}", .token.line(), .token.column())]
pub struct SyntaxError {
    pub token: Token,
    pub location: String,
    pub message: String,
}

impl SyntaxError {
    pub fn new(token: &Token, message: impl Into<String>) -> Self {
        let location = if token.kind == TokenKind::Eof {
            "at end".to_string()
        } else {
            format!("at '{}'", token.lexeme)
        };
        Self {
            token: token.clone(),
            location,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    #[test]
    fn first_error_per_line_wins() {
        let mut errors = ScanErrors::default();
        assert!(errors.record(ScanError::unexpected_character('@', 1, 3)));
        assert!(!errors.record(ScanError::unterminated_string("\"x", 1, 5)));
        assert!(errors.record(ScanError::unexpected_character('#', 2, 1)));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(1).map(|e| e.class), Some(ScanErrorClass::UnexpectedCharacter));
        let lines: Vec<usize> = errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![1, 2]);
    }

    #[test]
    fn syntax_error_location() {
        let eof = Token::eof(Span::new(3, 7, 10, 10));
        assert_eq!(SyntaxError::new(&eof, "Expect expression.").location, "at end");

        let plus = Token::new(TokenKind::Plus, "+", None, Span::new(1, 3, 2, 3));
        let err = SyntaxError::new(&plus, "Expect expression.");
        assert_eq!(err.location, "at '+'");
        assert_eq!(err.to_string(), "Syntax error at line 1 column 3 at '+': Expect expression.");
    }
}
