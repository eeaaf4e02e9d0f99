//! Ordered expressions for ORDER BY.

use super::{Expression, IntoExpression};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Null ordering hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NullsOrder {
    /// No hint, database default.
    #[default]
    Default,
    First,
    Last,
}

/// `expr ASC|DESC [NULLS FIRST|NULLS LAST]`
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedExpression {
    expr: Expression,
    direction: SortDirection,
    nulls: NullsOrder,
}

impl OrderedExpression {
    pub fn new(expr: impl IntoExpression, direction: SortDirection, nulls: NullsOrder) -> Self {
        Self {
            expr: expr.into_expression(),
            direction,
            nulls,
        }
    }

    /// The base expression being ordered.
    pub fn expression(&self) -> &Expression {
        &self.expr
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn nulls(&self) -> NullsOrder {
        self.nulls
    }

    /// Returns a copy ordered `NULLS FIRST`.
    pub fn nulls_first(&self) -> Self {
        Self {
            nulls: NullsOrder::First,
            ..self.clone()
        }
    }

    /// Returns a copy ordered `NULLS LAST`.
    pub fn nulls_last(&self) -> Self {
        Self {
            nulls: NullsOrder::Last,
            ..self.clone()
        }
    }
}
