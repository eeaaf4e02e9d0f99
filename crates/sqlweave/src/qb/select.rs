//! SELECT query builder.

use std::sync::Arc;

use super::keep_first;
use super::traits::SqlQb;
use crate::dialect::SqlDialect;
use crate::error::{SqlError, SqlResult};
use crate::exp::{
    self, ColumnInput, ColumnList, CommonTableExpression, CompoundExpression, CompoundKind,
    Expression, Identifier, IntoExpression, JoinCondition, JoinExpression, JoinKind, Limit, Lock,
    OrderedExpression, SelectClauses, Subquery, SubqueryMap,
};
use crate::sqlgen::SqlBuilder;

/// SELECT query builder.
#[derive(Clone, Debug)]
pub struct SelectQb {
    dialect: Arc<SqlDialect>,
    prepared: bool,
    clauses: SelectClauses,
    /// Expressions for record fields marked `subquery=<alias>`
    subqueries: SubqueryMap,
    build_error: Option<SqlError>,
}

impl SelectQb {
    pub fn new(dialect: Arc<SqlDialect>, prepared: bool) -> Self {
        Self {
            dialect,
            prepared,
            clauses: SelectClauses::new(),
            subqueries: SubqueryMap::new(),
            build_error: None,
        }
    }

    pub fn clauses(&self) -> &SelectClauses {
        &self.clauses
    }

    pub fn prepared(mut self, prepared: bool) -> Self {
        self.prepared = prepared;
        self
    }

    /// Register the expression used for record fields tagged `subquery=<alias>`.
    pub fn with_subquery(mut self, alias: impl Into<String>, expr: impl IntoExpression) -> Self {
        self.subqueries.insert(alias.into(), expr.into_expression());
        self
    }

    fn column_list<I, C>(&mut self, inputs: I) -> Option<ColumnList>
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnInput>,
    {
        let result = ColumnList::new(&self.subqueries, self.dialect.tag(), inputs);
        self.record(result)
    }

    fn record<T>(&mut self, result: SqlResult<T>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(err) => {
                keep_first(&mut self.build_error, err);
                None
            }
        }
    }

    /// Adopt the error of a nested builder.
    fn absorb(&mut self, other: &SelectQb) {
        if let Some(err) = &other.build_error {
            keep_first(&mut self.build_error, err.clone());
        }
    }

    // ==================== Columns ====================

    /// Replace the SELECT columns. Records expand to their mapped columns.
    pub fn select<I, C>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnInput>,
    {
        if let Some(cols) = self.column_list(cols) {
            self.clauses = self.clauses.set_columns(cols);
        }
        self
    }

    /// Append SELECT columns.
    pub fn select_append<I, C>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnInput>,
    {
        if let Some(cols) = self.column_list(cols) {
            self.clauses = self.clauses.columns_append(cols);
        }
        self
    }

    /// `SELECT DISTINCT`
    pub fn distinct(mut self) -> Self {
        self.clauses = self.clauses.set_distinct(Some(ColumnList::empty()));
        self
    }

    /// `SELECT DISTINCT ON (cols)`
    pub fn distinct_on<I, C>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnInput>,
    {
        if let Some(cols) = self.column_list(cols) {
            self.clauses = self.clauses.set_distinct(Some(cols));
        }
        self
    }

    // ==================== FROM / JOIN ====================

    pub fn from<I, C>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnInput>,
    {
        if let Some(tables) = self.column_list(tables) {
            self.clauses = self.clauses.set_from(tables);
        }
        self
    }

    /// Add a prepared join expression.
    pub fn join(mut self, join: JoinExpression) -> Self {
        self.clauses = self.clauses.joins_append(join);
        self
    }

    fn join_on<I, E>(mut self, kind: JoinKind, table: impl Into<ColumnInput>, on: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        match super::table_expression(table) {
            Ok(table) => self.join(JoinExpression::on(kind, table, on)),
            Err(err) => {
                keep_first(&mut self.build_error, err);
                self
            }
        }
    }

    /// `INNER JOIN table ON ...`
    pub fn inner_join<I, E>(self, table: impl Into<ColumnInput>, on: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        self.join_on(JoinKind::Inner, table, on)
    }

    /// `LEFT JOIN table ON ...`
    pub fn left_join<I, E>(self, table: impl Into<ColumnInput>, on: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        self.join_on(JoinKind::Left, table, on)
    }

    /// `RIGHT JOIN table ON ...`
    pub fn right_join<I, E>(self, table: impl Into<ColumnInput>, on: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        self.join_on(JoinKind::Right, table, on)
    }

    /// `FULL OUTER JOIN table ON ...`
    pub fn full_join<I, E>(self, table: impl Into<ColumnInput>, on: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        self.join_on(JoinKind::FullOuter, table, on)
    }

    /// `<kind> table USING (cols)`
    pub fn join_using<I, S>(mut self, kind: JoinKind, table: impl Into<ColumnInput>, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match super::table_expression(table) {
            Ok(table) => self.join(JoinExpression::using(kind, table, cols)),
            Err(err) => {
                keep_first(&mut self.build_error, err);
                self
            }
        }
    }

    /// `CROSS JOIN table`
    pub fn cross_join(mut self, table: impl Into<ColumnInput>) -> Self {
        match super::table_expression(table) {
            Ok(table) => self.join(JoinExpression::new(JoinKind::Cross, table, JoinCondition::None)),
            Err(err) => {
                keep_first(&mut self.build_error, err);
                self
            }
        }
    }

    /// `NATURAL JOIN table`
    pub fn natural_join(mut self, table: impl Into<ColumnInput>) -> Self {
        match super::table_expression(table) {
            Ok(table) => {
                self.join(JoinExpression::new(JoinKind::Natural, table, JoinCondition::None))
            }
            Err(err) => {
                keep_first(&mut self.build_error, err);
                self
            }
        }
    }

    // ==================== WHERE / GROUP BY / HAVING ====================

    /// Add WHERE predicates, combined with AND.
    pub fn where_<I, E>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        self.clauses = self.clauses.where_append(exprs);
        self
    }

    pub fn clear_where(mut self) -> Self {
        self.clauses = self.clauses.clear_where();
        self
    }

    pub fn group_by<I, C>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnInput>,
    {
        if let Some(cols) = self.column_list(cols) {
            self.clauses = self.clauses.set_group_by(cols);
        }
        self
    }

    /// Add HAVING predicates, combined with AND.
    pub fn having<I, E>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        self.clauses = self.clauses.having_append(exprs);
        self
    }

    // ==================== ORDER / LIMIT / OFFSET ====================

    /// Replace ORDER BY.
    pub fn order(mut self, order: impl IntoIterator<Item = OrderedExpression>) -> Self {
        self.clauses = self.clauses.set_order(order.into_iter().collect());
        self
    }

    pub fn order_append(mut self, order: impl IntoIterator<Item = OrderedExpression>) -> Self {
        self.clauses = self.clauses.order_append(order);
        self
    }

    pub fn order_prepend(mut self, order: impl IntoIterator<Item = OrderedExpression>) -> Self {
        self.clauses = self.clauses.order_prepend(order);
        self
    }

    pub fn clear_order(mut self) -> Self {
        self.clauses = self.clauses.set_order(Vec::new());
        self
    }

    /// `LIMIT n`; `0` clears the limit.
    pub fn limit(mut self, limit: u64) -> Self {
        let limit = (limit > 0).then_some(Limit::Count(limit));
        self.clauses = self.clauses.set_limit(limit);
        self
    }

    /// `LIMIT ALL`
    pub fn limit_all(mut self) -> Self {
        self.clauses = self.clauses.set_limit(Some(Limit::All));
        self
    }

    pub fn clear_limit(mut self) -> Self {
        self.clauses = self.clauses.set_limit(None);
        self
    }

    /// `OFFSET n`; `0` clears the offset.
    pub fn offset(mut self, offset: u64) -> Self {
        self.clauses = self.clauses.set_offset((offset > 0).then_some(offset));
        self
    }

    /// 1-based page of `per_page` rows. An offset past `u64::MAX` is recorded
    /// as a validation error.
    pub fn paginate(mut self, page: u64, per_page: u64) -> Self {
        let per_page = per_page.max(1);
        let page = page.max(1);
        match (page - 1).checked_mul(per_page) {
            Some(offset) => self.limit(per_page).offset(offset),
            None => {
                keep_first(
                    &mut self.build_error,
                    SqlError::validation(format!("page {page} of {per_page} rows overflows the offset")),
                );
                self
            }
        }
    }

    // ==================== Compounds / CTEs ====================

    fn compound(mut self, kind: CompoundKind, other: SelectQb) -> Self {
        self.absorb(&other);
        self.clauses = self
            .clauses
            .compounds_append(CompoundExpression::new(kind, other.clauses));
        self
    }

    pub fn union(self, other: SelectQb) -> Self {
        self.compound(CompoundKind::Union, other)
    }

    pub fn union_all(self, other: SelectQb) -> Self {
        self.compound(CompoundKind::UnionAll, other)
    }

    pub fn intersect(self, other: SelectQb) -> Self {
        self.compound(CompoundKind::Intersect, other)
    }

    pub fn intersect_all(self, other: SelectQb) -> Self {
        self.compound(CompoundKind::IntersectAll, other)
    }

    /// `WITH name AS (query)`
    pub fn with(mut self, name: impl Into<String>, query: SelectQb) -> Self {
        self.absorb(&query);
        self.clauses = self
            .clauses
            .cte_append(CommonTableExpression::new(name, query.clauses));
        self
    }

    /// `WITH RECURSIVE name AS (query)`
    pub fn with_recursive(mut self, name: impl Into<String>, query: SelectQb) -> Self {
        self.absorb(&query);
        self.clauses = self
            .clauses
            .cte_append(CommonTableExpression::recursive(name, query.clauses));
        self
    }

    // ==================== Locking / RETURNING / alias ====================

    pub fn lock(mut self, lock: Lock) -> Self {
        self.clauses = self.clauses.set_lock(Some(lock));
        self
    }

    /// `FOR UPDATE`
    pub fn for_update(self) -> Self {
        self.lock(Lock::for_update())
    }

    /// `FOR SHARE`
    pub fn for_share(self) -> Self {
        self.lock(Lock::for_share())
    }

    pub fn returning<I, C>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnInput>,
    {
        if let Some(cols) = self.column_list(cols) {
            self.clauses = self.clauses.set_returning(cols);
        }
        self
    }

    /// Alias used when this query is rendered as a subquery.
    pub fn as_(mut self, alias: &str) -> Self {
        self.clauses = self.clauses.set_alias(Some(Identifier::new("", "", alias)));
        self
    }

    /// `SELECT COUNT(*)` over the same FROM, JOIN and WHERE.
    ///
    /// Queries with GROUP BY, HAVING, DISTINCT or compounds are wrapped in a
    /// subquery so the count covers result rows.
    pub fn count(&self) -> SelectQb {
        let c = &self.clauses;
        let wrap = !c.group_by().is_empty()
            || !c.having().is_empty()
            || c.distinct().is_some()
            || !c.compounds().is_empty();

        let counted = if wrap {
            let inner = c
                .set_order(Vec::new())
                .set_limit(None)
                .set_offset(None)
                .set_alias(Some(Identifier::new("", "", "t")));
            SelectClauses::new().set_from(ColumnList::from_exprs([inner]))
        } else {
            c.set_order(Vec::new())
                .set_limit(None)
                .set_offset(None)
                .set_lock(None)
        };

        Self {
            clauses: counted.set_columns(ColumnList::from_exprs([exp::count_star()])),
            ..self.clone()
        }
    }

    /// This query as a subquery expression, carrying any build error.
    pub fn into_subquery(self) -> Subquery {
        Subquery::with_error(self.clauses, self.build_error)
    }
}

impl SqlQb for SelectQb {
    fn dialect(&self) -> &SqlDialect {
        &self.dialect
    }

    fn is_prepared(&self) -> bool {
        self.prepared
    }

    fn build_error(&self) -> Option<&SqlError> {
        self.build_error.as_ref()
    }

    fn render(&self, b: &mut SqlBuilder) {
        self.dialect.to_select_sql(b, &self.clauses);
    }
}

impl IntoExpression for SelectQb {
    fn into_expression(self) -> Expression {
        Expression::Subquery(Box::new(self.into_subquery()))
    }
}

impl From<SelectQb> for Subquery {
    fn from(qb: SelectQb) -> Self {
        qb.into_subquery()
    }
}

impl From<SelectQb> for ColumnInput {
    fn from(qb: SelectQb) -> Self {
        ColumnInput::Expr(qb.into_expression())
    }
}
