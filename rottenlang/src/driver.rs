use std::fs;
use std::path::Path;

use crate::error::CompileError;
use crate::ir::ast::Expression;
use crate::parser::lexer::{self, ScanOutput};
use crate::parser::{Parser, ParserOptions};
use crate::report::ErrorReporter;
use crate::token::{Token, TokenKind};

/// Result of parsing one line group; `line` is where the group starts.
#[derive(Debug)]
pub struct LineOutcome {
    pub line: usize,
    pub result: Result<Expression, CompileError>,
}

pub fn read_source(path: impl AsRef<Path>) -> Result<String, CompileError> {
    Ok(fs::read_to_string(path)?)
}

/// Splits tokens into runs that belong to one source line. A token that
/// ends on the line where the next one starts keeps them in the same run, so
/// multi-line strings and comments do not cut an expression. `Eof` is left out.
pub fn group_by_line(tokens: &[Token]) -> Vec<&[Token]> {
    let end = tokens
        .iter()
        .position(|token| token.kind == TokenKind::Eof)
        .unwrap_or(tokens.len());

    tokens[..end]
        .chunk_by(|a, b| a.span.end_line == b.span.line)
        .collect()
}

/// Scans `source`, then parses every line as its own expression.
///
/// Lexical errors go to the reporter and stop the run before parsing. A
/// syntax error only fails its own line.
pub fn run(
    source: &str,
    reporter: &mut dyn ErrorReporter,
    options: ParserOptions,
) -> Result<Vec<LineOutcome>, CompileError> {
    run_scanned(lexer::scan(source), reporter, options)
}

/// Same as `run`, for a source that was already scanned.
pub fn run_scanned(
    scanned: ScanOutput,
    reporter: &mut dyn ErrorReporter,
    options: ParserOptions,
) -> Result<Vec<LineOutcome>, CompileError> {
    scanned.report(reporter);
    let tokens = scanned.into_result()?;

    // комментарии не доходят до парсера
    let groups: Vec<Vec<Token>> = group_by_line(&tokens)
        .into_iter()
        .map(|group| group.iter().filter(|token| !token.kind.is_comment()).cloned().collect())
        .filter(|group: &Vec<Token>| !group.is_empty())
        .collect();

    let mut parser = Parser::new(reporter, options);
    let mut outcomes = Vec::new();
    for group in &groups {
        parser.set_tokens(group);
        outcomes.push(LineOutcome {
            line: group[0].span.line,
            result: parser.parse(),
        });
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    #[test]
    fn groups_follow_start_lines() {
        let tokens = tokenize("1 + 2\n\n3 *\n4").unwrap();
        let groups = group_by_line(&tokens);
        let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(sizes, vec![3, 2, 1]);
        assert_eq!(groups[1][0].span.line, 3);
    }

    #[test]
    fn multi_line_string_stays_with_its_expression() {
        let tokens = tokenize("\"a\nb\" + 1\n2").unwrap();
        let groups = group_by_line(&tokens);
        let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(sizes, vec![3, 1]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = read_source("definitely/not/here.rl");
        assert!(matches!(result, Err(CompileError::IoError { .. })));
    }

    #[test]
    fn empty_source_has_no_groups() {
        let tokens = tokenize("").unwrap();
        assert!(group_by_line(&tokens).is_empty());
    }
}
