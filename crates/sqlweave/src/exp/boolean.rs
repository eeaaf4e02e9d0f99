//! Boolean expressions: comparisons, ranges and AND/OR groups.

use super::{Expression, IntoExpression};

/// Comparison operator of a [`BooleanExpression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOperation {
    Eq,
    Neq,
    Is,
    IsNot,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Like,
    NotLike,
    ILike,
    NotILike,
    RegexpLike,
    RegexpNotLike,
    RegexpILike,
    RegexpNotILike,
}

impl BooleanOperation {
    /// Canonical SQL spelling. Dialects may override it through their operator map.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Neq => "!=",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::ILike => "ILIKE",
            Self::NotILike => "NOT ILIKE",
            Self::RegexpLike => "~",
            Self::RegexpNotLike => "!~",
            Self::RegexpILike => "~*",
            Self::RegexpNotILike => "!~*",
        }
    }

    /// The operator that negates this one.
    pub fn negate(&self) -> Self {
        match self {
            Self::Eq => Self::Neq,
            Self::Neq => Self::Eq,
            Self::Is => Self::IsNot,
            Self::IsNot => Self::Is,
            Self::Gt => Self::Lte,
            Self::Gte => Self::Lt,
            Self::Lt => Self::Gte,
            Self::Lte => Self::Gt,
            Self::In => Self::NotIn,
            Self::NotIn => Self::In,
            Self::Like => Self::NotLike,
            Self::NotLike => Self::Like,
            Self::ILike => Self::NotILike,
            Self::NotILike => Self::ILike,
            Self::RegexpLike => Self::RegexpNotLike,
            Self::RegexpNotLike => Self::RegexpLike,
            Self::RegexpILike => Self::RegexpNotILike,
            Self::RegexpNotILike => Self::RegexpILike,
        }
    }
}

/// `(lhs op rhs)`
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpression {
    op: BooleanOperation,
    lhs: Expression,
    rhs: Expression,
}

impl BooleanExpression {
    pub fn new(op: BooleanOperation, lhs: impl IntoExpression, rhs: impl IntoExpression) -> Self {
        Self {
            op,
            lhs: lhs.into_expression(),
            rhs: rhs.into_expression(),
        }
    }

    pub fn op(&self) -> BooleanOperation {
        self.op
    }

    pub fn lhs(&self) -> &Expression {
        &self.lhs
    }

    pub fn rhs(&self) -> &Expression {
        &self.rhs
    }

    /// The same comparison with the negated operator.
    pub fn negate(&self) -> Self {
        Self {
            op: self.op.negate(),
            ..self.clone()
        }
    }
}

/// `(lhs [NOT] BETWEEN start AND end)`
#[derive(Debug, Clone, PartialEq)]
pub struct RangeExpression {
    lhs: Expression,
    start: Expression,
    end: Expression,
    negated: bool,
}

impl RangeExpression {
    pub fn new(
        lhs: impl IntoExpression,
        start: impl IntoExpression,
        end: impl IntoExpression,
        negated: bool,
    ) -> Self {
        Self {
            lhs: lhs.into_expression(),
            start: start.into_expression(),
            end: end.into_expression(),
            negated,
        }
    }

    pub fn lhs(&self) -> &Expression {
        &self.lhs
    }

    pub fn start(&self) -> &Expression {
        &self.start
    }

    pub fn end(&self) -> &Expression {
        &self.end
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }
}

/// Join operator of an [`ExpressionList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    And,
    Or,
}

impl ListKind {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ListKind::And => " AND ",
            ListKind::Or => " OR ",
        }
    }
}

/// AND / OR group.
///
/// A group with one member renders as that member; two or more render as
/// `(a AND b)`. Empty members are dropped on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionList {
    kind: ListKind,
    exprs: Vec<Expression>,
}

impl Default for ExpressionList {
    /// An empty AND group.
    fn default() -> Self {
        Self {
            kind: ListKind::And,
            exprs: Vec::new(),
        }
    }
}

impl ExpressionList {
    pub fn new<I, E>(kind: ListKind, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        Self {
            kind,
            exprs: exprs
                .into_iter()
                .map(IntoExpression::into_expression)
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn expressions(&self) -> &[Expression] {
        &self.exprs
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// Returns a new group with `exprs` appended.
    ///
    /// When the receiver is an OR group, the result is `(receiver) AND (exprs...)`
    /// so appended predicates are always conjunctive.
    pub fn append<I, E>(&self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        let extra = Self::new(ListKind::And, exprs);
        if extra.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return extra;
        }
        match self.kind {
            ListKind::And => {
                let mut exprs = self.exprs.clone();
                exprs.extend(extra.exprs);
                Self {
                    kind: ListKind::And,
                    exprs,
                }
            }
            ListKind::Or => {
                let mut exprs = vec![Expression::List(self.clone())];
                exprs.extend(extra.exprs);
                Self {
                    kind: ListKind::And,
                    exprs,
                }
            }
        }
    }
}
