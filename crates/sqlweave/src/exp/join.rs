//! JOIN clauses.

use super::{ColumnList, Expression, ExpressionList, IntoExpression};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    FullOuter,
    RightOuter,
    LeftOuter,
    Full,
    Right,
    Left,
    Natural,
    NaturalLeft,
    NaturalRight,
    NaturalFull,
    Cross,
}

impl JoinKind {
    pub fn as_sql(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::FullOuter => "FULL OUTER JOIN",
            JoinKind::RightOuter => "RIGHT OUTER JOIN",
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Natural => "NATURAL JOIN",
            JoinKind::NaturalLeft => "NATURAL LEFT JOIN",
            JoinKind::NaturalRight => "NATURAL RIGHT JOIN",
            JoinKind::NaturalFull => "NATURAL FULL JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }

    /// Natural and cross joins take no condition.
    pub fn is_conditioned(&self) -> bool {
        !matches!(
            self,
            JoinKind::Natural
                | JoinKind::NaturalLeft
                | JoinKind::NaturalRight
                | JoinKind::NaturalFull
                | JoinKind::Cross
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinCondition {
    None,
    /// `ON (...)`
    On(ExpressionList),
    /// `USING ("a", "b")`
    Using(ColumnList),
}

/// `<kind> [LATERAL] <table> [ON ... | USING (...)]`
#[derive(Debug, Clone, PartialEq)]
pub struct JoinExpression {
    kind: JoinKind,
    table: Expression,
    condition: JoinCondition,
    lateral: bool,
}

impl JoinExpression {
    pub fn new(kind: JoinKind, table: impl IntoExpression, condition: JoinCondition) -> Self {
        Self {
            kind,
            table: table.into_expression(),
            condition,
            lateral: false,
        }
    }

    /// `<kind> <table> ON (exprs...)`
    pub fn on<I, E>(kind: JoinKind, table: impl IntoExpression, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        Self::new(kind, table, JoinCondition::On(super::and(exprs)))
    }

    /// `<kind> <table> USING (cols...)`
    pub fn using<I, S>(kind: JoinKind, table: impl IntoExpression, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(kind, table, JoinCondition::Using(ColumnList::from_names(cols)))
    }

    /// Returns a copy rendered as `<kind> LATERAL <table>`.
    pub fn lateral(&self) -> Self {
        Self {
            lateral: true,
            ..self.clone()
        }
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    pub fn table(&self) -> &Expression {
        &self.table
    }

    pub fn condition(&self) -> &JoinCondition {
        &self.condition
    }

    pub fn is_lateral(&self) -> bool {
        self.lateral
    }
}
