//! UPDATE query builder.

use std::sync::Arc;

use super::keep_first;
use super::select::SelectQb;
use super::traits::SqlQb;
use crate::dialect::SqlDialect;
use crate::error::SqlError;
use crate::exp::{
    ColumnInput, ColumnList, CommonTableExpression, Identifier, IntoExpression, Limit,
    OrderedExpression, SubqueryMap, UpdateClauses, UpdateExpression, UpdateSource,
};
use crate::mapper::Record;
use crate::sqlgen::SqlBuilder;

/// UPDATE query builder.
#[derive(Clone, Debug)]
pub struct UpdateQb {
    dialect: Arc<SqlDialect>,
    prepared: bool,
    clauses: UpdateClauses,
    build_error: Option<SqlError>,
}

impl UpdateQb {
    pub fn new(dialect: Arc<SqlDialect>, prepared: bool, table: impl Into<ColumnInput>) -> Self {
        let mut qb = Self {
            dialect,
            prepared,
            clauses: UpdateClauses::default(),
            build_error: None,
        };
        match super::table_expression(table) {
            Ok(table) => qb.clauses = qb.clauses.set_table(table),
            Err(err) => keep_first(&mut qb.build_error, err),
        }
        qb
    }

    pub fn clauses(&self) -> &UpdateClauses {
        &self.clauses
    }

    pub fn prepared(mut self, prepared: bool) -> Self {
        self.prepared = prepared;
        self
    }

    fn column_list<I, C>(&mut self, inputs: I) -> Option<ColumnList>
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnInput>,
    {
        match ColumnList::new(&SubqueryMap::new(), self.dialect.tag(), inputs) {
            Ok(cols) => Some(cols),
            Err(err) => {
                keep_first(&mut self.build_error, err);
                None
            }
        }
    }

    /// Add one `column = value` assignment.
    ///
    /// Replaces a record source set with [`set_record`](Self::set_record).
    pub fn set(mut self, column: &str, value: impl IntoExpression) -> Self {
        let update = UpdateExpression::new(Identifier::new("", "", column), value);
        let mut assignments = match self.clauses.values() {
            Some(UpdateSource::Assignments(existing)) => existing.clone(),
            _ => Vec::new(),
        };
        assignments.push(update);
        self.clauses = self.clauses.set_values(UpdateSource::Assignments(assignments));
        self
    }

    /// Replace the SET values.
    pub fn set_values(mut self, source: impl Into<UpdateSource>) -> Self {
        self.clauses = self.clauses.set_values(source.into());
        self
    }

    /// SET values mapped from a record's updatable columns.
    pub fn set_record<T: Record>(self, record: T) -> Self {
        self.set_values(UpdateSource::record(record))
    }

    /// `UPDATE ... FROM tables`
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
        if let Some(cols) = self.column_list(cols) {
            self.clauses = self.clauses.set_returning(cols);
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

impl SqlQb for UpdateQb {
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
        self.dialect.to_update_sql(b, &self.clauses);
    }
}
