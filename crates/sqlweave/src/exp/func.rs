//! SQL function calls and casts.

use super::{Expression, IntoExpression};

/// `NAME(args...)`
///
/// The name is looked up in the dialect's function-name overrides (case-insensitive)
/// before rendering, so `NOW` can become `CURRENT_TIMESTAMP` on one dialect and stay
/// `NOW` on another.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFunction {
    name: String,
    args: Vec<Expression>,
    distinct: bool,
}

impl SqlFunction {
    pub fn new<I, E>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(IntoExpression::into_expression).collect(),
            distinct: false,
        }
    }

    /// `NAME(DISTINCT args...)`
    pub fn distinct(&self) -> Self {
        Self {
            distinct: true,
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Expression] {
        &self.args
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }
}

/// `CAST(expr AS type)`
#[derive(Debug, Clone, PartialEq)]
pub struct CastExpression {
    expr: Expression,
    target: String,
}

impl CastExpression {
    pub fn new(expr: impl IntoExpression, target: impl Into<String>) -> Self {
        Self {
            expr: expr.into_expression(),
            target: target.into(),
        }
    }

    pub fn expression(&self) -> &Expression {
        &self.expr
    }

    /// Target SQL type, emitted verbatim.
    pub fn target(&self) -> &str {
        &self.target
    }
}
