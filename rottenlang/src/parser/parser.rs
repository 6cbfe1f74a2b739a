use crate::error::{CompileError, SyntaxError};
use crate::ir::ast::Expression;
use crate::report::ErrorReporter;
use crate::token::{Literal, Token, TokenKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// A token that starts no expression becomes an implicit literal (its own
    /// literal value, or nil) instead of a syntax error.
    pub lenient: bool,
}

/// Parses one token slice with a throwaway parser.
pub fn parse_tokens(
    tokens: &[Token],
    reporter: &mut dyn ErrorReporter,
    options: ParserOptions,
) -> Result<Expression, CompileError> {
    let mut parser = Parser::new(reporter, options);
    parser.set_tokens(tokens);
    parser.parse()
}

/// Recursive-descent expression parser. Holds a borrowed slice and a cursor;
/// reusable across slices through `set_tokens`.
pub struct Parser<'t, 'r> {
    tokens: &'t [Token],
    position: usize,
    // стоит после последнего токена, если срез не кончается на Eof
    end: Token,
    reporter: &'r mut dyn ErrorReporter,
    options: ParserOptions,
}

impl<'t, 'r> Parser<'t, 'r> {
    pub fn new(reporter: &'r mut dyn ErrorReporter, options: ParserOptions) -> Self {
        Self {
            tokens: &[],
            position: 0,
            end: Token::eof(Default::default()),
            reporter,
            options,
        }
    }

    pub fn set_tokens(&mut self, tokens: &'t [Token]) {
        self.tokens = tokens;
        self.end = match tokens.last() {
            Some(last) if last.kind == TokenKind::Eof => last.clone(),
            Some(last) => Token::eof(last.span.after()),
            None => Token::eof(Default::default()),
        };
        self.reset();
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Parses a single expression. Stops at the first syntax error; no
    /// partial tree is returned.
    pub fn parse(&mut self) -> Result<Expression, CompileError> {
        Ok(self.expression()?)
    }

    fn expression(&mut self) -> Result<Expression, SyntaxError> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expression, SyntaxError> {
        let mut left = self.comparison()?;
        while self.match_any(&[TokenKind::BangEqual, TokenKind::EqualEqual]) {
            let operator = self.previous().clone();
            let right = self.comparison()?;
            left = Expression::binary(left, operator, right);
        }
        Ok(left)
    }

    fn comparison(&mut self) -> Result<Expression, SyntaxError> {
        let mut left = self.term()?;
        while self.match_any(&[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]) {
            let operator = self.previous().clone();
            let right = self.term()?;
            left = Expression::binary(left, operator, right);
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Expression, SyntaxError> {
        let mut left = self.factor()?;
        while self.match_any(&[TokenKind::Minus, TokenKind::Plus]) {
            let operator = self.previous().clone();
            let right = self.factor()?;
            left = Expression::binary(left, operator, right);
        }
        Ok(left)
    }

    fn factor(&mut self) -> Result<Expression, SyntaxError> {
        let mut left = self.unary()?;
        while self.match_any(&[TokenKind::Slash, TokenKind::Star]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            left = Expression::binary(left, operator, right);
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expression, SyntaxError> {
        if self.match_any(&[TokenKind::Bang, TokenKind::Minus, TokenKind::Plus]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            return Ok(Expression::unary(operator, right));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expression, SyntaxError> {
        let kind = self.peek().kind;
        match kind {
            TokenKind::False => {
                self.advance();
                Ok(Expression::literal(Literal::Bool(false)))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expression::literal(Literal::Bool(true)))
            }
            TokenKind::Nil => {
                self.advance();
                Ok(Expression::literal(Literal::Nil))
            }
            TokenKind::Number | TokenKind::String => {
                let value = self.advance().literal.clone().unwrap_or(Literal::Nil);
                Ok(Expression::literal(value))
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect(TokenKind::RightParen, "Expect ')' after expression.")?;
                Ok(Expression::grouping(inner))
            }
            _ if self.options.lenient => {
                // токен не потребляется
                let value = self.peek().literal.clone().unwrap_or(Literal::Nil);
                Ok(Expression::literal(value))
            }
            _ => Err(self.error("Expect expression.")),
        }
    }

    // Вспомогательные методы
    fn peek(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&self.end)
    }

    fn previous(&self) -> &Token {
        match self.position.checked_sub(1) {
            Some(index) => self.tokens.get(index).unwrap_or(&self.end),
            None => &self.end,
        }
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|kind| self.check(*kind)) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: TokenKind, message: &str) -> Result<&Token, SyntaxError> {
        if self.check(expected) {
            Ok(self.advance())
        } else {
            Err(self.error(message))
        }
    }

    fn error(&mut self, message: &str) -> SyntaxError {
        let error = SyntaxError::new(self.peek(), message);
        self.reporter.report_syntax_error(
            error.token.line(),
            error.token.column(),
            &error.location,
            &error.message,
        );
        error
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::printer::render;
    use crate::parser::lexer::tokenize;
    use crate::report::{CollectingReporter, DiagnosticKind};

    fn parse_str(source: &str, options: ParserOptions) -> (Result<Expression, CompileError>, CollectingReporter) {
        let tokens = tokenize(source).unwrap();
        let mut reporter = CollectingReporter::new();
        let result = parse_tokens(&tokens, &mut reporter, options);
        (result, reporter)
    }

    fn round_trip(source: &str) -> String {
        let (result, reporter) = parse_str(source, ParserOptions::default());
        assert!(reporter.diagnostics.is_empty(), "{:?}", reporter.diagnostics);
        render(&result.unwrap())
    }

    #[test]
    fn binary_without_eof() {
        let tokens = tokenize("1 + 2").unwrap();
        let mut reporter = CollectingReporter::new();
        let expr = parse_tokens(&tokens[..3], &mut reporter, ParserOptions::default()).unwrap();
        assert!(matches!(expr, Expression::Binary { .. }));
        assert_eq!(render(&expr), "1 + 2");
    }

    #[test]
    fn equal_precedence_is_left_associative() {
        let (result, _) = parse_str("1 - 2 - 3", ParserOptions::default());
        let Expression::Binary { left, operator, right } = result.unwrap() else {
            panic!("expected binary");
        };
        assert_eq!(operator.lexeme, "-");
        assert!(matches!(*left, Expression::Binary { .. }));
        assert_eq!(*right, Expression::literal(Literal::Number(3.0)));
    }

    #[test]
    fn precedence_and_grouping() {
        assert_eq!(round_trip("9 * 3 / (2 - 3)"), "9 * 3 / (2 - 3)");
        assert_eq!(round_trip("1+2*3"), "1 + 2 * 3");
        assert_eq!(round_trip("1 < 2 == 2 >= 1"), "1 < 2 == 2 >= 1");
    }

    #[test]
    fn unary_nests_to_the_right() {
        let (result, _) = parse_str("- -1", ParserOptions::default());
        let Expression::Unary { right, .. } = result.unwrap() else {
            panic!("expected unary");
        };
        assert!(matches!(*right, Expression::Unary { .. }));
        assert_eq!(round_trip("!-+1"), "!-+1");
    }

    #[test]
    fn literals() {
        assert_eq!(round_trip("true != false"), "true != false");
        assert_eq!(round_trip("nil"), "nil");
        assert_eq!(round_trip("\"a\" == \"b\""), "\"a\" == \"b\"");
    }

    #[test]
    fn unclosed_grouping_is_reported() {
        let (result, reporter) = parse_str("(1 + 2", ParserOptions::default());
        let Err(CompileError::Syntax(error)) = result else {
            panic!("expected syntax error");
        };
        assert_eq!(error.location, "at end");
        assert_eq!(error.message, "Expect ')' after expression.");
        assert_eq!(reporter.count(DiagnosticKind::Syntax), 1);
        assert_eq!(reporter.diagnostics[0].context, "at end");
    }

    #[test]
    fn unexpected_token_names_its_lexeme() {
        let (result, reporter) = parse_str("1 + )", ParserOptions::default());
        let Err(CompileError::Syntax(error)) = result else {
            panic!("expected syntax error");
        };
        assert_eq!(error.location, "at ')'");
        assert_eq!(error.token.column(), 5);
        assert_eq!(reporter.diagnostics.len(), 1);
    }

    #[test]
    fn empty_slice_is_an_error_by_default() {
        let mut reporter = CollectingReporter::new();
        let result = parse_tokens(&[], &mut reporter, ParserOptions::default());
        assert!(matches!(result, Err(CompileError::Syntax(_))));

        let eof_only = tokenize("").unwrap();
        let result = parse_tokens(&eof_only, &mut reporter, ParserOptions::default());
        assert!(matches!(result, Err(CompileError::Syntax(_))));
        assert_eq!(reporter.diagnostics.len(), 2);
    }

    #[test]
    fn lenient_mode_falls_back_to_literal() {
        let options = ParserOptions { lenient: true };
        let (result, reporter) = parse_str("", options);
        assert_eq!(result.unwrap(), Expression::literal(Literal::Nil));
        assert!(reporter.diagnostics.is_empty());

        let (result, _) = parse_str("1 + foo", options);
        assert_eq!(render(&result.unwrap()), "1 + nil");
    }

    #[test]
    fn parser_is_reused_across_slices() {
        let first = tokenize("1 + 2").unwrap();
        let second = tokenize("(3)").unwrap();
        let mut reporter = CollectingReporter::new();
        let mut parser = Parser::new(&mut reporter, ParserOptions::default());

        parser.set_tokens(&first);
        assert_eq!(render(&parser.parse().unwrap()), "1 + 2");
        parser.set_tokens(&second);
        assert_eq!(render(&parser.parse().unwrap()), "(3)");
        parser.reset();
        assert_eq!(render(&parser.parse().unwrap()), "(3)");
    }
}
