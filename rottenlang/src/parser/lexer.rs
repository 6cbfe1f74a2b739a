use crate::error::{CompileError, ScanError, ScanErrors};
use crate::report::ErrorReporter;
use crate::span::Span;
use crate::token::{self, Literal, Token, TokenKind};

/// Tokens plus every lexical error met on the way. Tokens are usable even
/// when `errors` is not empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutput {
    pub tokens: Vec<Token>,
    pub errors: ScanErrors,
}

impl ScanOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Sends each recorded error to the reporter, in line order.
    pub fn report(&self, reporter: &mut dyn ErrorReporter) {
        for error in self.errors.iter() {
            reporter.report_scan_error(error.line, error.column, &error.snippet, &error.message);
        }
    }

    pub fn into_result(self) -> Result<Vec<Token>, CompileError> {
        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(CompileError::Scan { errors: self.errors })
        }
    }
}

/// Best-effort scan: never fails, errors are collected per line.
pub fn scan(source: &str) -> ScanOutput {
    Lexer::new(source).scan()
}

/// Strict scan: any lexical error turns into `CompileError::Scan`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
    scan(source).into_result()
}

pub struct Lexer<'a> {
    source: &'a str,
    // начало текущей лексемы
    start: usize,
    current: usize,
    line: usize,
    // колонка следующего непрочитанного символа
    column: usize,
    // позиция начала лексемы
    start_line: usize,
    start_column: usize,
    tokens: Vec<Token>,
    errors: ScanErrors,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
            tokens: Vec::new(),
            errors: ScanErrors::default(),
        }
    }

    pub fn scan(mut self) -> ScanOutput {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.start_column = self.column;
            self.scan_token();
        }

        let end = Span::new(self.line, self.column, self.current, self.current);
        self.tokens.push(Token::eof(end));

        ScanOutput {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn scan_token(&mut self) {
        let Some(ch) = self.advance() else {
            return;
        };

        match ch {
            '(' => self.add_token(TokenKind::LeftParen, None),
            ')' => self.add_token(TokenKind::RightParen, None),
            '{' => self.add_token(TokenKind::LeftBrace, None),
            '}' => self.add_token(TokenKind::RightBrace, None),
            '[' => self.add_token(TokenKind::LeftBracket, None),
            ']' => self.add_token(TokenKind::RightBracket, None),
            ',' => self.add_token(TokenKind::Comma, None),
            '.' => self.add_token(TokenKind::Dot, None),
            '-' => self.add_token(TokenKind::Minus, None),
            '+' => self.add_token(TokenKind::Plus, None),
            ';' => self.add_token(TokenKind::Semicolon, None),
            '*' => self.add_token(TokenKind::Star, None),
            '!' => {
                let kind = if self.match_char('=') { TokenKind::BangEqual } else { TokenKind::Bang };
                self.add_token(kind, None);
            }
            '=' => {
                let kind = if self.match_char('=') { TokenKind::EqualEqual } else { TokenKind::Equal };
                self.add_token(kind, None);
            }
            '<' => {
                let kind = if self.match_char('=') { TokenKind::LessEqual } else { TokenKind::Less };
                self.add_token(kind, None);
            }
            '>' => {
                let kind = if self.match_char('=') { TokenKind::GreaterEqual } else { TokenKind::Greater };
                self.add_token(kind, None);
            }
            '/' => {
                if self.match_char('/') {
                    self.line_comment();
                } else if self.match_char('*') {
                    self.block_comment();
                } else {
                    self.add_token(TokenKind::Slash, None);
                }
            }
            '"' => self.string(),
            '\n' => self.newline(),
            ' ' | '\t' | '\r' => {}
            '0'..='9' => self.number(),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier(),
            _ => self.error(ScanError::unexpected_character(ch, self.start_line, self.start_column)),
        }
    }

    fn line_comment(&mut self) {
        while !matches!(self.peek(), Some('\n') | None) {
            self.advance();
        }
        let text = self.lexeme().to_string();
        self.add_token(TokenKind::Comment, Some(Literal::Str(text)));
    }

    /// `/* ... */`, nestable. Closes only when the depth returns to zero.
    fn block_comment(&mut self) {
        let mut depth = 1;
        while depth > 0 {
            match (self.peek(), self.peek_next()) {
                (None, _) => {
                    let snippet = self.lexeme().to_string();
                    self.error(ScanError::unterminated_comment(&snippet, self.start_line, self.start_column));
                    break;
                }
                (Some('/'), Some('*')) => {
                    self.advance();
                    self.advance();
                    depth += 1;
                }
                (Some('*'), Some('/')) => {
                    self.advance();
                    self.advance();
                    depth -= 1;
                }
                (Some('\n'), _) => {
                    self.advance();
                    self.newline();
                }
                _ => {
                    self.advance();
                }
            }
        }
        let text = self.lexeme().to_string();
        self.add_token(TokenKind::CStyleComment, Some(Literal::Str(text)));
    }

    /// Escapes are kept verbatim: `\` and the escaped char both go into the value.
    fn string(&mut self) {
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('"') => break,
                Some('\\') => {
                    self.advance();
                    value.push('\\');
                    if let Some(escaped) = self.advance() {
                        if escaped == '\n' {
                            self.newline();
                        }
                        value.push(escaped);
                    }
                }
                Some(ch) => {
                    self.advance();
                    if ch == '\n' {
                        self.newline();
                    }
                    value.push(ch);
                }
            }
        }

        if self.is_at_end() {
            let snippet = self.lexeme().to_string();
            self.error(ScanError::unterminated_string(&snippet, self.start_line, self.start_column));
        } else {
            // закрывающая кавычка
            self.advance();
        }

        self.add_token(TokenKind::String, Some(Literal::Str(value)));
    }

    fn number(&mut self) {
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }

        // `1.` оставляет точку следующему токену
        if self.peek() == Some('.') && matches!(self.peek_next(), Some('0'..='9')) {
            self.advance();
            while matches!(self.peek(), Some('0'..='9')) {
                self.advance();
            }
        }

        let text = self.lexeme();
        let value = match text.parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                let error = ScanError::invalid_number_literal(text, self.start_line, self.start_column);
                self.error(error);
                0.0
            }
        };
        self.add_token(TokenKind::Number, Some(Literal::Number(value)));
    }

    fn identifier(&mut self) {
        while matches!(self.peek(), Some('a'..='z' | 'A'..='Z' | '0'..='9' | '_')) {
            self.advance();
        }
        let kind = token::keyword(self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.add_token(kind, None);
    }

    fn add_token(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let span = Span::new(self.start_line, self.start_column, self.start, self.current)
            .ends_at(self.line, self.column);
        let token = Token::new(kind, self.lexeme(), literal, span);
        self.tokens.push(token);
    }

    fn error(&mut self, error: ScanError) {
        self.errors.record(error);
    }

    fn newline(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.current += ch.len_utf8();
        self.column += 1;
        Some(ch)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += expected.len_utf8();
            self.column += 1;
            true
        } else {
            false
        }
    }
}
