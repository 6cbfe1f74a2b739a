pub mod lexer;
pub mod parser;

use crate::error::CompileError;
use crate::ir::ast::Expression;
use crate::report::ErrorReporter;
use crate::token::Token;

pub use parser::{Parser, ParserOptions};

/// Главная функция парсера - из текста в AST.
///
/// The whole source is read as one expression; comments are skipped.
pub fn parse(source: &str, reporter: &mut dyn ErrorReporter) -> Result<Expression, CompileError> {
    let scanned = lexer::scan(source);
    scanned.report(reporter);
    let tokens: Vec<Token> = scanned
        .into_result()?
        .into_iter()
        .filter(|token| !token.kind.is_comment())
        .collect();
    parser::parse_tokens(&tokens, reporter, ParserOptions::default())
}
