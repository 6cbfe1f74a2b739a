use super::ast::{Expression, Visitor};
use crate::token::{Literal, Token};

/// Renders a tree back to infix text. Debug aid only, the output is not
/// guaranteed to lex back into the same tree.
#[derive(Debug, Default)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn new() -> Self {
        Self
    }

    pub fn print(&mut self, expression: &Expression) -> String {
        expression.accept(self)
    }
}

pub fn render(expression: &Expression) -> String {
    AstPrinter::new().print(expression)
}

impl Visitor for AstPrinter {
    type Output = String;

    fn visit_literal(&mut self, value: &Literal) -> String {
        value.to_string()
    }

    fn visit_grouping(&mut self, inner: &Expression) -> String {
        format!("({})", inner.accept(self))
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expression) -> String {
        format!("{}{}", operator.lexeme, right.accept(self))
    }

    fn visit_binary(&mut self, left: &Expression, operator: &Token, right: &Expression) -> String {
        let left = left.accept(self);
        let right = right.accept(self);
        format!("{} {} {}", left, operator.lexeme, right)
    }
}
