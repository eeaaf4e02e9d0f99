//! Raw SQL fragments.

use super::{Expression, IntoExpression};

/// Raw SQL emitted verbatim.
///
/// Each `?` in `sql` is replaced, left to right, by the rendered form of the
/// matching argument (a placeholder for values in prepared mode). Surplus `?`
/// markers are emitted as-is. The fragment itself is trusted: it is never
/// quoted or escaped.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    sql: String,
    args: Vec<Expression>,
}

impl Literal {
    /// A fragment without arguments.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
        }
    }

    /// A fragment with `?` argument markers.
    pub fn new<I, A>(sql: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: IntoExpression,
    {
        Self {
            sql: sql.into(),
            args: args.into_iter().map(IntoExpression::into_expression).collect(),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[Expression] {
        &self.args
    }
}
