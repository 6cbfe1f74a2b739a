use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Скобки и знаки
    LeftParen,     // (
    RightParen,    // )
    LeftBrace,     // {
    RightBrace,    // }
    LeftBracket,   // [
    RightBracket,  // ]
    Comma,         // ,
    Dot,           // .
    Minus,         // -
    Plus,          // +
    Semicolon,     // ;
    Slash,         // /
    Star,          // *
    // Операторы сравнения
    Bang,          // !
    BangEqual,     // !=
    Equal,         // =
    EqualEqual,    // ==
    Greater,       // >
    GreaterEqual,  // >=
    Less,          // <
    LessEqual,     // <=
    // Литералы
    Identifier,
    String,
    Number,
    // Ключевые слова
    And, Or, If, Else, Func, For, While, Return, True, False, Nil, Var, Const,
    // Комментарии
    Comment,       // // ...
    CStyleComment, // /* ... */
    Eof,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LeftParen => "LEFT_PAREN",
            Self::RightParen => "RIGHT_PAREN",
            Self::LeftBrace => "LEFT_BRACE",
            Self::RightBrace => "RIGHT_BRACE",
            Self::LeftBracket => "LEFT_BRACKET",
            Self::RightBracket => "RIGHT_BRACKET",
            Self::Comma => "COMMA",
            Self::Dot => "DOT",
            Self::Minus => "MINUS",
            Self::Plus => "PLUS",
            Self::Semicolon => "SEMICOLON",
            Self::Slash => "SLASH",
            Self::Star => "STAR",
            Self::Bang => "BANG",
            Self::BangEqual => "BANG_EQUAL",
            Self::Equal => "EQUAL",
            Self::EqualEqual => "EQUAL_EQUAL",
            Self::Greater => "GREATER",
            Self::GreaterEqual => "GREATER_EQUAL",
            Self::Less => "LESS",
            Self::LessEqual => "LESS_EQUAL",
            Self::Identifier => "IDENTIFIER",
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::And => "AND",
            Self::Or => "OR",
            Self::If => "IF",
            Self::Else => "ELSE",
            Self::Func => "FUNC",
            Self::For => "FOR",
            Self::While => "WHILE",
            Self::Return => "RETURN",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Nil => "NIL",
            Self::Var => "VAR",
            Self::Const => "CONST",
            Self::Comment => "COMMENT",
            Self::CStyleComment => "C_STYLE_COMMENT",
            Self::Eof => "EOF",
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment | Self::CStyleComment)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reserved words. Built once, never mutated.
static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        ("and", TokenKind::And),
        ("or", TokenKind::Or),
        ("if", TokenKind::If),
        ("else", TokenKind::Else),
        ("func", TokenKind::Func),
        ("for", TokenKind::For),
        ("while", TokenKind::While),
        ("return", TokenKind::Return),
        ("true", TokenKind::True),
        ("false", TokenKind::False),
        ("nil", TokenKind::Nil),
        ("var", TokenKind::Var),
        ("const", TokenKind::Const),
    ])
});

pub fn keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS.get(text).copied()
}

/// Decoded value of a literal token or literal expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Str(String),
    Bool(bool),
    Nil,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Str(s) => write!(f, "\"{}\"", s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Nil => f.write_str("nil"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, literal: Option<Literal>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            span,
        }
    }

    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", None, span)
    }

    pub fn line(&self) -> usize {
        self.span.line
    }

    pub fn column(&self) -> usize {
        self.span.column
    }
}
