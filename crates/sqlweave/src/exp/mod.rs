//! Expression model.
//!
//! Every SQL fragment the generators can render is an [`Expression`]: a closed,
//! immutable tree of typed nodes. Nodes are built through the free constructors in
//! this module (`ident`, `col`, `table`, `literal`, `raw`, `val`, `and`, `or`, ...)
//! and the comparison/ordering methods of [`ExprExt`].
//!
//! ```ignore
//! use sqlweave::exp::{self, ExprExt};
//!
//! let cond = exp::and([
//!     exp::col("status").eq("active"),
//!     exp::col("age").gte(18),
//! ]);
//! ```
//!
//! Clause containers for each statement kind live in [`clauses`].

mod alias;
mod boolean;
pub mod clauses;
mod col;
mod cte;
mod func;
mod ident;
mod insert;
mod join;
mod literal;
mod ops;
mod ordered;
mod update;

pub use alias::AliasedExpression;
pub use boolean::{BooleanExpression, BooleanOperation, ExpressionList, ListKind, RangeExpression};
pub use clauses::{
    DeleteClauses, InsertClauses, Limit, SelectClauses, Subquery, TruncateClauses,
    TruncateIdentity, TruncateOptions, UpdateClauses,
};
pub use col::{ColumnInput, ColumnList, SubqueryMap};
pub use cte::{CommonTableExpression, CompoundExpression, CompoundKind, Lock, LockStrength, LockWait};
pub use func::{CastExpression, SqlFunction};
pub use ident::Identifier;
pub use insert::{ConflictAction, ConflictExpression, InsertSource};
pub(crate) use insert::record_rows;
pub use join::{JoinCondition, JoinExpression, JoinKind};
pub use literal::Literal;
pub use ops::ExprExt;
pub use ordered::{NullsOrder, OrderedExpression, SortDirection};
pub use update::{UpdateExpression, UpdateSource};

use crate::value::Value;

/// A node of the expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `"schema"."table"."column"`
    Identifier(Identifier),
    /// Raw SQL, optionally with `?` argument markers.
    Literal(Literal),
    /// A parameterized value.
    Value(Value),
    /// The `DEFAULT` keyword (INSERT/UPDATE values).
    Default,
    /// Parenthesized, comma separated list: `(a, b, c)`.
    Tuple(Vec<Expression>),
    /// Binary comparison: `(lhs op rhs)`.
    Boolean(Box<BooleanExpression>),
    /// `(lhs BETWEEN start AND end)`.
    Range(Box<RangeExpression>),
    /// AND / OR group.
    List(ExpressionList),
    /// Comma separated column list.
    Columns(ColumnList),
    /// Expression with sort direction.
    Ordered(Box<OrderedExpression>),
    /// `expr AS alias`.
    Aliased(Box<AliasedExpression>),
    /// `NAME(args...)`.
    Function(SqlFunction),
    /// `CAST(expr AS type)`.
    Cast(Box<CastExpression>),
    /// `(SELECT ...)`.
    Subquery(Box<Subquery>),
}

impl Expression {
    /// Returns `true` for empty AND/OR groups and empty column lists.
    ///
    /// Empty expressions contribute nothing when rendered; clause writers use this
    /// to decide whether a keyword is emitted at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Expression::List(list) => list.is_empty(),
            Expression::Columns(cols) => cols.is_empty(),
            _ => false,
        }
    }

    /// Returns the identifier when this node is one.
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expression::Identifier(i) => Some(i),
            _ => None,
        }
    }
}

/// Conversion into an [`Expression`].
///
/// Plain Rust values (`i64`, `&str`, `Option<T>`, chrono types, ...) become
/// parameterized [`Value`]s; `Vec<T>` becomes a [`Expression::Tuple`]; expression
/// nodes convert to themselves.
pub trait IntoExpression {
    fn into_expression(self) -> Expression;
}

impl IntoExpression for Expression {
    fn into_expression(self) -> Expression {
        self
    }
}

impl IntoExpression for &Expression {
    fn into_expression(self) -> Expression {
        self.clone()
    }
}

impl IntoExpression for Value {
    fn into_expression(self) -> Expression {
        Expression::Value(self)
    }
}

macro_rules! value_into_expression {
    ($($t:ty),* $(,)?) => {
        $(impl IntoExpression for $t {
            fn into_expression(self) -> Expression {
                Expression::Value(Value::from(self))
            }
        })*
    };
}

value_into_expression!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    &str,
    String,
    &String,
    chrono::DateTime<chrono::Utc>,
    chrono::NaiveDateTime,
    chrono::NaiveDate,
    uuid::Uuid,
    serde_json::Value,
);

impl<T: IntoExpression> IntoExpression for Option<T> {
    fn into_expression(self) -> Expression {
        match self {
            Some(v) => v.into_expression(),
            None => Expression::Value(Value::Null),
        }
    }
}

impl<T: IntoExpression> IntoExpression for Vec<T> {
    fn into_expression(self) -> Expression {
        Expression::Tuple(self.into_iter().map(IntoExpression::into_expression).collect())
    }
}

macro_rules! node_into_expression {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(impl IntoExpression for $t {
            fn into_expression(self) -> Expression {
                Expression::$variant(self.into())
            }
        })*
    };
}

node_into_expression!(
    Identifier => Identifier,
    Literal => Literal,
    BooleanExpression => Boolean,
    RangeExpression => Range,
    ExpressionList => List,
    ColumnList => Columns,
    OrderedExpression => Ordered,
    AliasedExpression => Aliased,
    SqlFunction => Function,
    CastExpression => Cast,
    Subquery => Subquery,
);

impl IntoExpression for SelectClauses {
    fn into_expression(self) -> Expression {
        Expression::Subquery(Box::new(Subquery::new(self)))
    }
}

// ==================== Constructors ====================

/// Parse a possibly dotted identifier: `col`, `table.col` or `schema.table.col`.
pub fn ident(s: &str) -> Identifier {
    Identifier::parse(s)
}

/// A column identifier. The name is not split on `.`.
pub fn col(name: impl Into<String>) -> Identifier {
    Identifier::new("", "", &name.into())
}

/// A table identifier. The name is not split on `.`.
pub fn table(name: impl Into<String>) -> Identifier {
    Identifier::new("", &name.into(), "")
}

/// A schema identifier, extend with [`Identifier::table`].
pub fn schema(name: impl Into<String>) -> Identifier {
    Identifier::new(&name.into(), "", "")
}

/// `*`
pub fn star() -> Expression {
    Expression::Literal(Literal::raw("*"))
}

/// A parameterized value.
pub fn val(value: impl Into<Value>) -> Expression {
    Expression::Value(value.into())
}

/// Raw SQL emitted verbatim.
pub fn raw(sql: impl Into<String>) -> Literal {
    Literal::raw(sql)
}

/// Raw SQL whose `?` markers are replaced by the rendered `args`.
pub fn literal<I, A>(sql: impl Into<String>, args: I) -> Literal
where
    I: IntoIterator<Item = A>,
    A: IntoExpression,
{
    Literal::new(sql, args)
}

/// The `DEFAULT` keyword.
pub fn default() -> Expression {
    Expression::Default
}

/// AND group of expressions.
pub fn and<I, E>(exprs: I) -> ExpressionList
where
    I: IntoIterator<Item = E>,
    E: IntoExpression,
{
    ExpressionList::new(ListKind::And, exprs)
}

/// OR group of expressions.
pub fn or<I, E>(exprs: I) -> ExpressionList
where
    I: IntoIterator<Item = E>,
    E: IntoExpression,
{
    ExpressionList::new(ListKind::Or, exprs)
}

/// `NAME(args...)`
pub fn func<I, E>(name: impl Into<String>, args: I) -> SqlFunction
where
    I: IntoIterator<Item = E>,
    E: IntoExpression,
{
    SqlFunction::new(name, args)
}

/// `COUNT(expr)`
pub fn count(expr: impl IntoExpression) -> SqlFunction {
    SqlFunction::new("COUNT", [expr.into_expression()])
}

/// `COUNT(*)`
pub fn count_star() -> SqlFunction {
    SqlFunction::new("COUNT", [star()])
}

/// `SUM(expr)`
pub fn sum(expr: impl IntoExpression) -> SqlFunction {
    SqlFunction::new("SUM", [expr.into_expression()])
}

/// `MIN(expr)`
pub fn min(expr: impl IntoExpression) -> SqlFunction {
    SqlFunction::new("MIN", [expr.into_expression()])
}

/// `MAX(expr)`
pub fn max(expr: impl IntoExpression) -> SqlFunction {
    SqlFunction::new("MAX", [expr.into_expression()])
}

/// `AVG(expr)`
pub fn avg(expr: impl IntoExpression) -> SqlFunction {
    SqlFunction::new("AVG", [expr.into_expression()])
}

/// `COALESCE(args...)`
pub fn coalesce<I, E>(args: I) -> SqlFunction
where
    I: IntoIterator<Item = E>,
    E: IntoExpression,
{
    SqlFunction::new("COALESCE", args)
}

#[cfg(test)]
mod tests;
