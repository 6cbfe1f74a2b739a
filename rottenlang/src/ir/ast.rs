use crate::token::{Literal, Token};

/// Expression tree. Every child is owned by exactly one parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// 1, 2.5, "text", true, nil
    Literal(Literal),
    /// (1 + 2)
    Grouping(Box<Expression>),
    /// -x, !ok
    Unary {
        operator: Token,
        right: Box<Expression>,
    },
    /// a + b
    Binary {
        left: Box<Expression>,
        operator: Token,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn literal(value: Literal) -> Self {
        Self::Literal(value)
    }

    pub fn grouping(inner: Expression) -> Self {
        Self::Grouping(Box::new(inner))
    }

    pub fn unary(operator: Token, right: Expression) -> Self {
        Self::Unary {
            operator,
            right: Box::new(right),
        }
    }

    pub fn binary(left: Expression, operator: Token, right: Expression) -> Self {
        Self::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    /// Hands the node to the visitor method for its variant.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Literal(value) => visitor.visit_literal(value),
            Self::Grouping(inner) => visitor.visit_grouping(inner),
            Self::Unary { operator, right } => visitor.visit_unary(operator, right),
            Self::Binary { left, operator, right } => visitor.visit_binary(left, operator, right),
        }
    }
}

/// One method per node variant. New passes over the tree implement this
/// instead of touching `Expression`.
pub trait Visitor {
    type Output;

    fn visit_literal(&mut self, value: &Literal) -> Self::Output;
    fn visit_grouping(&mut self, inner: &Expression) -> Self::Output;
    fn visit_unary(&mut self, operator: &Token, right: &Expression) -> Self::Output;
    fn visit_binary(&mut self, left: &Expression, operator: &Token, right: &Expression) -> Self::Output;
}
