//! Column lists and column-list construction.
//!
//! A [`ColumnList`] is built from a heterogeneous sequence of [`ColumnInput`]s.
//! Inputs are dispatched in a fixed precedence:
//!
//! 1. [`ColumnInput::Skip`] contributes nothing (`Option::None` converts to it).
//! 2. Text is parsed as a dotted [`Identifier`].
//! 3. An existing [`ColumnList`] is spliced in, one level deep.
//! 4. Any other expression is appended as-is.
//! 5. A record type is expanded through its [`ColumnMap`](crate::mapper::ColumnMap).
//!
//! Values that fit none of these have no `From` conversion and are rejected at
//! compile time.

use std::collections::HashMap;

use super::{
    AliasedExpression, CastExpression, Expression, Identifier, IntoExpression, Literal,
    OrderedExpression, SqlFunction, Subquery,
};
use crate::error::SqlResult;
use crate::mapper::{Record, RecordType};

/// Subquery alias → expression, consulted when a record field carries a
/// `subquery=<alias>` option.
pub type SubqueryMap = HashMap<String, Expression>;

/// One input to column-list construction.
#[derive(Debug, Clone)]
pub enum ColumnInput {
    /// Contributes nothing.
    Skip,
    /// Parsed as a dotted identifier.
    Text(String),
    /// Spliced into the result.
    List(ColumnList),
    /// Appended as-is.
    Expr(Expression),
    /// Expanded through the record mapper.
    Record(RecordType),
}

impl From<&str> for ColumnInput {
    fn from(s: &str) -> Self {
        ColumnInput::Text(s.to_string())
    }
}

impl From<String> for ColumnInput {
    fn from(s: String) -> Self {
        ColumnInput::Text(s)
    }
}

impl From<&String> for ColumnInput {
    fn from(s: &String) -> Self {
        ColumnInput::Text(s.clone())
    }
}

impl From<ColumnList> for ColumnInput {
    fn from(list: ColumnList) -> Self {
        ColumnInput::List(list)
    }
}

impl From<Expression> for ColumnInput {
    fn from(expr: Expression) -> Self {
        match expr {
            Expression::Columns(list) => ColumnInput::List(list),
            other => ColumnInput::Expr(other),
        }
    }
}

impl From<RecordType> for ColumnInput {
    fn from(rt: RecordType) -> Self {
        ColumnInput::Record(rt)
    }
}

impl<T: Record> From<&T> for ColumnInput {
    fn from(_: &T) -> Self {
        ColumnInput::Record(RecordType::of::<T>())
    }
}

impl<T: Into<ColumnInput>> From<Option<T>> for ColumnInput {
    fn from(v: Option<T>) -> Self {
        v.map_or(ColumnInput::Skip, Into::into)
    }
}

macro_rules! expr_column_input {
    ($($t:ty),* $(,)?) => {
        $(impl From<$t> for ColumnInput {
            fn from(v: $t) -> Self {
                ColumnInput::Expr(v.into_expression())
            }
        })*
    };
}

expr_column_input!(
    Identifier,
    AliasedExpression,
    Literal,
    SqlFunction,
    CastExpression,
    Subquery,
);

/// An ordered list of column expressions.
///
/// The empty list means "no explicit column list". Mutators return new lists and
/// never touch the receiver.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnList {
    columns: Vec<Expression>,
}

impl ColumnList {
    /// The empty list.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a column list from heterogeneous inputs.
    ///
    /// `tag` selects the annotation namespace used when expanding records;
    /// `subqueries` supplies expressions for fields marked `subquery=<alias>`.
    ///
    /// Fails only when a record's annotations are malformed or produce duplicate
    /// column names.
    pub fn new<I, C>(subqueries: &SubqueryMap, tag: &str, inputs: I) -> SqlResult<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnInput>,
    {
        let mut columns = Vec::new();
        for input in inputs {
            match input.into() {
                ColumnInput::Skip => {}
                ColumnInput::Text(s) => columns.push(Expression::Identifier(Identifier::parse(&s))),
                ColumnInput::List(list) => columns.extend(list.columns),
                ColumnInput::Expr(expr) => columns.push(expr),
                ColumnInput::Record(rt) => record_columns(&rt, tag, subqueries, &mut columns)?,
            }
        }
        Ok(Self { columns })
    }

    /// Build from names only; each is parsed as a dotted identifier.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            columns: names
                .into_iter()
                .map(|s| Expression::Identifier(Identifier::parse(s.as_ref())))
                .collect(),
        }
    }

    /// Build from expressions, splicing nested column lists.
    pub fn from_exprs<I, E>(exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        Self::empty().append(exprs)
    }

    /// Build from ordered expressions, keeping only their base expressions.
    pub fn from_ordered<'a, I>(ordered: I) -> Self
    where
        I: IntoIterator<Item = &'a OrderedExpression>,
    {
        Self::from_exprs(ordered.into_iter().map(|o| o.expression().clone()))
    }

    pub fn columns(&self) -> &[Expression] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns a new list with `exprs` appended. Nested column lists are spliced.
    pub fn append<I, E>(&self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        let mut columns = self.columns.clone();
        for expr in exprs {
            match expr.into_expression() {
                Expression::Columns(list) => columns.extend(list.columns),
                other => columns.push(other),
            }
        }
        Self { columns }
    }
}

impl FromIterator<Expression> for ColumnList {
    fn from_iter<T: IntoIterator<Item = Expression>>(iter: T) -> Self {
        Self::from_exprs(iter)
    }
}

fn record_columns(
    rt: &RecordType,
    tag: &str,
    subqueries: &SubqueryMap,
    out: &mut Vec<Expression>,
) -> SqlResult<()> {
    let map = rt.column_map(tag)?;
    let (names, subquery_keys) = map.cols();
    for name in names {
        let column = match subquery_keys.get(&name) {
            Some(alias) => {
                let as_column = Identifier::new("", "", &name);
                match subqueries.get(alias) {
                    Some(expr) => alias_as_column(expr, as_column),
                    None => AliasedExpression::new(Literal::raw(alias.clone()), as_column)
                        .into_expression(),
                }
            }
            None => {
                let ident = Identifier::parse(&name);
                if ident.is_qualified() {
                    AliasedExpression::new(ident, Identifier::new("", "", &name)).into_expression()
                } else {
                    Expression::Identifier(ident)
                }
            }
        };
        out.push(column);
    }
    Ok(())
}

/// `expr AS column`, replacing any alias the expression already carries.
fn alias_as_column(expr: &Expression, as_column: Identifier) -> Expression {
    match expr {
        Expression::Subquery(subquery) => Expression::Subquery(Box::new(Subquery::with_error(
            subquery.clauses().set_alias(Some(as_column)),
            subquery.error().cloned(),
        ))),
        Expression::Aliased(aliased) => {
            AliasedExpression::new(aliased.expression().clone(), as_column).into_expression()
        }
        other => AliasedExpression::new(other.clone(), as_column).into_expression(),
    }
}
