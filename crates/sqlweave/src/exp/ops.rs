//! Comparison, ordering and aliasing methods shared by expression nodes.

use super::{
    AliasedExpression, BooleanExpression, BooleanOperation, CastExpression, Expression,
    Identifier, IntoExpression, Literal, NullsOrder, OrderedExpression, RangeExpression,
    SortDirection, SqlFunction, Subquery,
};
use crate::value::Value;

fn compare(op: BooleanOperation, lhs: Expression, rhs: Expression) -> Expression {
    Expression::Boolean(Box::new(BooleanExpression::new(op, lhs, rhs)))
}

/// `=` / `!=` against `NULL` or a bool become `IS` / `IS NOT`.
fn equality(negated: bool, lhs: Expression, rhs: Expression) -> Expression {
    let is = matches!(rhs, Expression::Value(Value::Null | Value::Bool(_)));
    let op = match (is, negated) {
        (true, false) => BooleanOperation::Is,
        (true, true) => BooleanOperation::IsNot,
        (false, false) => BooleanOperation::Eq,
        (false, true) => BooleanOperation::Neq,
    };
    compare(op, lhs, rhs)
}

/// Builder methods available on every expression-capable node.
pub trait ExprExt: IntoExpression + Sized {
    /// `(self = value)`, or `(self IS value)` for `NULL` / bools.
    fn eq(self, value: impl IntoExpression) -> Expression {
        equality(false, self.into_expression(), value.into_expression())
    }

    /// `(self != value)`, or `(self IS NOT value)` for `NULL` / bools.
    fn neq(self, value: impl IntoExpression) -> Expression {
        equality(true, self.into_expression(), value.into_expression())
    }

    fn gt(self, value: impl IntoExpression) -> Expression {
        compare(BooleanOperation::Gt, self.into_expression(), value.into_expression())
    }

    fn gte(self, value: impl IntoExpression) -> Expression {
        compare(BooleanOperation::Gte, self.into_expression(), value.into_expression())
    }

    fn lt(self, value: impl IntoExpression) -> Expression {
        compare(BooleanOperation::Lt, self.into_expression(), value.into_expression())
    }

    fn lte(self, value: impl IntoExpression) -> Expression {
        compare(BooleanOperation::Lte, self.into_expression(), value.into_expression())
    }

    /// `(self IN (...))`. Accepts a `Vec` of values or a subquery.
    fn is_in(self, values: impl IntoExpression) -> Expression {
        compare(BooleanOperation::In, self.into_expression(), values.into_expression())
    }

    /// `(self NOT IN (...))`
    fn not_in(self, values: impl IntoExpression) -> Expression {
        compare(BooleanOperation::NotIn, self.into_expression(), values.into_expression())
    }

    fn like(self, pattern: impl IntoExpression) -> Expression {
        compare(BooleanOperation::Like, self.into_expression(), pattern.into_expression())
    }

    fn not_like(self, pattern: impl IntoExpression) -> Expression {
        compare(BooleanOperation::NotLike, self.into_expression(), pattern.into_expression())
    }

    fn ilike(self, pattern: impl IntoExpression) -> Expression {
        compare(BooleanOperation::ILike, self.into_expression(), pattern.into_expression())
    }

    fn not_ilike(self, pattern: impl IntoExpression) -> Expression {
        compare(BooleanOperation::NotILike, self.into_expression(), pattern.into_expression())
    }

    fn regexp_like(self, pattern: impl IntoExpression) -> Expression {
        compare(BooleanOperation::RegexpLike, self.into_expression(), pattern.into_expression())
    }

    fn regexp_not_like(self, pattern: impl IntoExpression) -> Expression {
        compare(BooleanOperation::RegexpNotLike, self.into_expression(), pattern.into_expression())
    }

    fn regexp_ilike(self, pattern: impl IntoExpression) -> Expression {
        compare(BooleanOperation::RegexpILike, self.into_expression(), pattern.into_expression())
    }

    fn regexp_not_ilike(self, pattern: impl IntoExpression) -> Expression {
        compare(BooleanOperation::RegexpNotILike, self.into_expression(), pattern.into_expression())
    }

    fn is_null(self) -> Expression {
        compare(BooleanOperation::Is, self.into_expression(), Expression::Value(Value::Null))
    }

    fn is_not_null(self) -> Expression {
        compare(BooleanOperation::IsNot, self.into_expression(), Expression::Value(Value::Null))
    }

    fn is_true(self) -> Expression {
        compare(BooleanOperation::Is, self.into_expression(), Expression::Value(Value::Bool(true)))
    }

    fn is_false(self) -> Expression {
        compare(BooleanOperation::Is, self.into_expression(), Expression::Value(Value::Bool(false)))
    }

    fn between(self, start: impl IntoExpression, end: impl IntoExpression) -> Expression {
        Expression::Range(Box::new(RangeExpression::new(self.into_expression(), start, end, false)))
    }

    fn not_between(self, start: impl IntoExpression, end: impl IntoExpression) -> Expression {
        Expression::Range(Box::new(RangeExpression::new(self.into_expression(), start, end, true)))
    }

    fn asc(self) -> OrderedExpression {
        OrderedExpression::new(self.into_expression(), SortDirection::Asc, NullsOrder::Default)
    }

    fn desc(self) -> OrderedExpression {
        OrderedExpression::new(self.into_expression(), SortDirection::Desc, NullsOrder::Default)
    }

    /// `self AS alias`. The alias is parsed like any dotted identifier.
    fn as_(self, alias: impl Into<Identifier>) -> AliasedExpression {
        AliasedExpression::new(self.into_expression(), alias)
    }

    /// `CAST(self AS target)`
    fn cast(self, target: impl Into<String>) -> CastExpression {
        CastExpression::new(self.into_expression(), target)
    }
}

impl ExprExt for Expression {}
impl ExprExt for Identifier {}
impl ExprExt for Literal {}
impl ExprExt for SqlFunction {}
impl ExprExt for CastExpression {}
impl ExprExt for Subquery {}
