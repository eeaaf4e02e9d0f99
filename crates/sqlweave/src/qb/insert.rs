//! INSERT query builder.

use std::sync::Arc;

use super::keep_first;
use super::select::SelectQb;
use super::traits::SqlQb;
use crate::dialect::SqlDialect;
use crate::error::SqlError;
use crate::exp::{
    ColumnInput, ColumnList, CommonTableExpression, ConflictExpression, InsertClauses,
    InsertSource, IntoExpression, SubqueryMap,
};
use crate::mapper::Record;
use crate::sqlgen::SqlBuilder;

/// INSERT query builder.
///
/// Rows come from explicit values, records, a SELECT, or `DEFAULT VALUES`
/// when no source is given.
#[derive(Clone, Debug)]
pub struct InsertQb {
    dialect: Arc<SqlDialect>,
    prepared: bool,
    clauses: InsertClauses,
    build_error: Option<SqlError>,
}

impl InsertQb {
    pub fn new(dialect: Arc<SqlDialect>, prepared: bool, table: impl Into<ColumnInput>) -> Self {
        let mut qb = Self {
            dialect,
            prepared,
            clauses: InsertClauses::default(),
            build_error: None,
        };
        match super::table_expression(table) {
            Ok(table) => qb.clauses = qb.clauses.set_table(table),
            Err(err) => keep_first(&mut qb.build_error, err),
        }
        qb
    }

    pub fn clauses(&self) -> &InsertClauses {
        &self.clauses
    }

    pub fn prepared(mut self, prepared: bool) -> Self {
        self.prepared = prepared;
        self
    }

    /// Explicit column list for value rows or an INSERT ... SELECT.
    pub fn cols<I, C>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnInput>,
    {
        match ColumnList::new(&SubqueryMap::new(), self.dialect.tag(), cols) {
            Ok(cols) => self.clauses = self.clauses.set_columns(cols),
            Err(err) => keep_first(&mut self.build_error, err),
        }
        self
    }

    /// Append one row of values.
    pub fn vals<I, E>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        let row = row.into_iter().map(IntoExpression::into_expression).collect();
        self.clauses = self.clauses.rows_append(vec![row]);
        self
    }

    /// Rows mapped from records; all records must be of one type.
    pub fn records<T: Record>(mut self, records: impl IntoIterator<Item = T>) -> Self {
        self.clauses = self.clauses.set_source(InsertSource::records(records));
        self
    }

    /// `INSERT INTO ... SELECT ...`
    pub fn from_query(mut self, query: SelectQb) -> Self {
        if let Some(err) = query.build_error() {
            keep_first(&mut self.build_error, err.clone());
        }
        let clauses = query.clauses().clone();
        self.clauses = self.clauses.set_source(InsertSource::Select(Box::new(clauses)));
        self
    }

    /// `INSERT INTO ... DEFAULT VALUES`
    pub fn default_values(mut self) -> Self {
        self.clauses = self.clauses.set_source(InsertSource::DefaultValues);
        self
    }

    pub fn on_conflict(mut self, conflict: ConflictExpression) -> Self {
        self.clauses = self.clauses.set_conflict(Some(conflict));
        self
    }

    /// `ON CONFLICT DO NOTHING`, or the dialect's ignore keyword.
    pub fn on_conflict_do_nothing(self) -> Self {
        self.on_conflict(ConflictExpression::do_nothing())
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

impl SqlQb for InsertQb {
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
        self.dialect.to_insert_sql(b, &self.clauses);
    }
}
