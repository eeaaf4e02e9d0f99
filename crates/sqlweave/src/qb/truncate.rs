//! TRUNCATE query builder.

use std::sync::Arc;

use super::keep_first;
use super::traits::SqlQb;
use crate::dialect::SqlDialect;
use crate::error::SqlError;
use crate::exp::{ColumnInput, ColumnList, SubqueryMap, TruncateClauses, TruncateIdentity};
use crate::sqlgen::SqlBuilder;

/// TRUNCATE query builder.
#[derive(Clone, Debug)]
pub struct TruncateQb {
    dialect: Arc<SqlDialect>,
    prepared: bool,
    clauses: TruncateClauses,
    build_error: Option<SqlError>,
}

impl TruncateQb {
    pub fn new<I, C>(dialect: Arc<SqlDialect>, prepared: bool, tables: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnInput>,
    {
        let mut build_error = None;
        let tables = ColumnList::new(&SubqueryMap::new(), dialect.tag(), tables)
            .unwrap_or_else(|err| {
                keep_first(&mut build_error, err);
                ColumnList::empty()
            });
        Self {
            dialect,
            prepared,
            clauses: TruncateClauses::new(tables),
            build_error,
        }
    }

    pub fn clauses(&self) -> &TruncateClauses {
        &self.clauses
    }

    /// `CASCADE`
    pub fn cascade(mut self) -> Self {
        let mut opts = self.clauses.options();
        opts.cascade = true;
        opts.restrict = false;
        self.clauses = self.clauses.set_options(opts);
        self
    }

    /// `RESTRICT`
    pub fn restrict(mut self) -> Self {
        let mut opts = self.clauses.options();
        opts.restrict = true;
        opts.cascade = false;
        self.clauses = self.clauses.set_options(opts);
        self
    }

    /// `RESTART IDENTITY`
    pub fn restart_identity(self) -> Self {
        self.identity(TruncateIdentity::Restart)
    }

    /// `CONTINUE IDENTITY`
    pub fn continue_identity(self) -> Self {
        self.identity(TruncateIdentity::Continue)
    }

    fn identity(mut self, identity: TruncateIdentity) -> Self {
        let mut opts = self.clauses.options();
        opts.identity = Some(identity);
        self.clauses = self.clauses.set_options(opts);
        self
    }
}

impl SqlQb for TruncateQb {
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
        self.dialect.to_truncate_sql(b, &self.clauses);
    }
}
