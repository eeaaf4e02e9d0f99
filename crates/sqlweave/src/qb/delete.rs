//! DELETE query builder.

use std::sync::Arc;

use super::keep_first;
use super::select::SelectQb;
use super::traits::SqlQb;
use crate::dialect::SqlDialect;
use crate::error::SqlError;
use crate::exp::{
    ColumnInput, ColumnList, CommonTableExpression, DeleteClauses, IntoExpression, Limit,
    OrderedExpression, SubqueryMap,
};
use crate::sqlgen::SqlBuilder;

/// DELETE query builder.
#[derive(Clone, Debug)]
pub struct DeleteQb {
    dialect: Arc<SqlDialect>,
    prepared: bool,
    clauses: DeleteClauses,
    build_error: Option<SqlError>,
}

impl DeleteQb {
    pub fn new(dialect: Arc<SqlDialect>, prepared: bool, table: impl Into<ColumnInput>) -> Self {
        let mut qb = Self {
            dialect,
            prepared,
            clauses: DeleteClauses::default(),
            build_error: None,
        };
        match super::table_expression(table) {
            Ok(table) => qb.clauses = qb.clauses.set_from(table),
            Err(err) => keep_first(&mut qb.build_error, err),
        }
        qb
    }

    pub fn clauses(&self) -> &DeleteClauses {
        &self.clauses
    }

    pub fn prepared(mut self, prepared: bool) -> Self {
        self.prepared = prepared;
        self
    }

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

    pub fn order(mut self, order: impl IntoIterator<Item = OrderedExpression>) -> Self {
        self.clauses = self.clauses.set_order(order.into_iter().collect());
        self
    }

    /// `LIMIT n`; `0` clears the limit.
    pub fn limit(mut self, limit: u64) -> Self {
        self.clauses = self.clauses.set_limit((limit > 0).then_some(Limit::Count(limit)));
        self
    }

    pub fn returning<I, C>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnInput>,
    {
        match ColumnList::new(&SubqueryMap::new(), self.dialect.tag(), cols) {
            Ok(cols) => self.clauses = self.clauses.set_returning(cols),
            Err(err) => keep_first(&mut self.build_error, err),
        }
        self
    }

    /// `WITH name AS (query)`
    pub fn with(mut self, name: impl Into<String>, query: SelectQb) -> Self {
        if let Some(err) = query.build_error() {
            keep_first(&mut self.build_error, err.clone());
        }
        let cte = CommonTableExpression::new(name, query.clauses().clone());
        self.clauses = self.clauses.cte_append(cte);
        self
    }
}

impl SqlQb for DeleteQb {
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
        self.dialect.to_delete_sql(b, &self.clauses);
    }
}
