//! Handing rendered statements to a database driver.
//!
//! sqlweave does not talk to databases. A [`DbExecutor`] adapts whatever driver
//! the application uses; [`QueryFactory`] pairs rendered SQL with that executor.
//! A rendering failure does not abort construction: it travels inside the
//! [`QueryExecutor`] and is returned by the first call that needs the SQL.
//!
//! ```ignore
//! let factory = QueryFactory::new("db", client);
//! let rows = factory
//!     .from_qb(&qb::dialect("postgres").from(["users"]).limit(10))
//!     .query()
//!     .await?;
//! ```

use std::future::Future;

use crate::error::SqlResult;
use crate::qb::SqlQb;
use crate::sqlgen::SqlBuilder;
use crate::value::Value;

/// A database connection (or pool) able to run rendered statements.
pub trait DbExecutor: Send + Sync {
    /// Row type produced by [`query`](Self::query).
    type Row: Send;

    /// Execute a statement and return the number of affected rows.
    fn execute(&self, sql: &str, args: &[Value]) -> impl Future<Output = SqlResult<u64>> + Send;

    /// Execute a statement and return all rows.
    fn query(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl Future<Output = SqlResult<Vec<Self::Row>>> + Send;
}

impl<E: DbExecutor> DbExecutor for &E {
    type Row = E::Row;

    fn execute(&self, sql: &str, args: &[Value]) -> impl Future<Output = SqlResult<u64>> + Send {
        (**self).execute(sql, args)
    }

    fn query(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl Future<Output = SqlResult<Vec<Self::Row>>> + Send {
        (**self).query(sql, args)
    }
}

/// Creates [`QueryExecutor`]s bound to one executor.
///
/// `tag` names the record annotation namespace the caller scans rows with and
/// is attached to every executor log event.
#[derive(Debug, Clone)]
pub struct QueryFactory<E> {
    tag: String,
    executor: E,
}

impl<E: DbExecutor> QueryFactory<E> {
    pub fn new(tag: impl Into<String>, executor: E) -> Self {
        Self {
            tag: tag.into(),
            executor,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Hand-written SQL with its arguments.
    pub fn from_sql(&self, sql: impl Into<String>, args: Vec<Value>) -> QueryExecutor<'_, E> {
        QueryExecutor {
            factory: self,
            statement: Ok((sql.into(), args)),
        }
    }

    /// The statement rendered into `b`, or its recorded error.
    pub fn from_builder(&self, b: SqlBuilder) -> QueryExecutor<'_, E> {
        QueryExecutor {
            factory: self,
            statement: b.finish(),
        }
    }

    /// Render a query builder.
    pub fn from_qb(&self, qb: &impl SqlQb) -> QueryExecutor<'_, E> {
        self.from_builder(qb.to_builder())
    }
}

/// One statement ready to run, or the error that prevented rendering it.
#[derive(Debug)]
pub struct QueryExecutor<'a, E> {
    factory: &'a QueryFactory<E>,
    statement: SqlResult<(String, Vec<Value>)>,
}

impl<E: DbExecutor> QueryExecutor<'_, E> {
    /// The statement and arguments that would be sent.
    pub fn to_sql(&self) -> SqlResult<(String, Vec<Value>)> {
        self.statement.clone()
    }

    /// Run the statement, returning the affected row count.
    pub async fn exec(&self) -> SqlResult<u64> {
        let (sql, args) = self.statement()?;
        tracing::debug!(
            target: "sqlweave.sql",
            sql = %sql,
            param_count = args.len(),
            tag = %self.factory.tag,
            "exec"
        );
        self.factory.executor.execute(sql, args).await
    }

    /// Run the statement, returning all rows.
    pub async fn query(&self) -> SqlResult<Vec<E::Row>> {
        let (sql, args) = self.statement()?;
        tracing::debug!(
            target: "sqlweave.sql",
            sql = %sql,
            param_count = args.len(),
            tag = %self.factory.tag,
            "query"
        );
        self.factory.executor.query(sql, args).await
    }

    /// Run the statement and return the first row, if any.
    pub async fn query_opt(&self) -> SqlResult<Option<E::Row>> {
        Ok(self.query().await?.into_iter().next())
    }

    fn statement(&self) -> SqlResult<(&str, &[Value])> {
        match &self.statement {
            Ok((sql, args)) => Ok((sql.as_str(), args.as_slice())),
            Err(err) => Err(err.clone()),
        }
    }
}

#[cfg(test)]
mod tests;
