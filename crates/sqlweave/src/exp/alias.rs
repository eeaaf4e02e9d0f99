//! Aliased expressions.

use super::{Expression, Identifier, IntoExpression};

/// `expr AS alias`
#[derive(Debug, Clone, PartialEq)]
pub struct AliasedExpression {
    expr: Expression,
    alias: Identifier,
}

impl AliasedExpression {
    pub fn new(expr: impl IntoExpression, alias: impl Into<Identifier>) -> Self {
        Self {
            expr: expr.into_expression(),
            alias: alias.into(),
        }
    }

    pub fn expression(&self) -> &Expression {
        &self.expr
    }

    pub fn alias(&self) -> &Identifier {
        &self.alias
    }
}
