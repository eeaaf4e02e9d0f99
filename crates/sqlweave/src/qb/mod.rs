//! Fluent query builders over a resolved dialect.
//!
//! Builders wrap a clause container and a shared [`SqlDialect`]. Every method
//! consumes and returns the builder; a method that fails (for example a record
//! with a malformed annotation) stores the error and later calls keep going.
//! The first error is returned by [`SqlQb::to_sql`].
//!
//! # Usage
//!
//! ```ignore
//! use sqlweave::qb;
//! use sqlweave::exp::{self, ExprExt};
//!
//! let (sql, args) = qb::dialect("postgres")
//!     .from(["users"])
//!     .select(["id", "name"])
//!     .where_([exp::col("status").eq("active")])
//!     .order([exp::col("created_at").desc()])
//!     .limit(20)
//!     .to_sql()?;
//!
//! qb::dialect("mysql")
//!     .update("users")
//!     .set("status", "inactive")
//!     .where_([exp::col("id").eq(user_id)])
//!     .to_sql()?;
//! ```

mod delete;
mod insert;
mod select;
mod traits;
mod truncate;
mod update;

pub use delete::DeleteQb;
pub use insert::InsertQb;
pub use select::SelectQb;
pub use traits::SqlQb;
pub use truncate::TruncateQb;
pub use update::UpdateQb;

use std::sync::Arc;

use crate::dialect::{self as dialects, DEFAULT_DIALECT, SqlDialect};
use crate::error::{SqlError, SqlResult};
use crate::exp::{ColumnInput, Expression, Identifier};

/// Entry point bound to one dialect.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    dialect: Arc<SqlDialect>,
    prepared: bool,
}

impl QueryBuilder {
    /// Builders created from here render placeholders plus arguments.
    pub fn new(dialect: Arc<SqlDialect>) -> Self {
        Self {
            dialect,
            prepared: true,
        }
    }

    /// `false` renders values inline instead of as placeholders.
    pub fn prepared(mut self, prepared: bool) -> Self {
        self.prepared = prepared;
        self
    }

    pub fn dialect(&self) -> &Arc<SqlDialect> {
        &self.dialect
    }

    /// `SELECT ... FROM <tables>`
    pub fn from<I, C>(&self, tables: I) -> SelectQb
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnInput>,
    {
        SelectQb::new(Arc::clone(&self.dialect), self.prepared).from(tables)
    }

    /// `SELECT <cols>` without a FROM clause.
    pub fn select<I, C>(&self, cols: I) -> SelectQb
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnInput>,
    {
        SelectQb::new(Arc::clone(&self.dialect), self.prepared).select(cols)
    }

    pub fn insert(&self, table: impl Into<ColumnInput>) -> InsertQb {
        InsertQb::new(Arc::clone(&self.dialect), self.prepared, table)
    }

    pub fn update(&self, table: impl Into<ColumnInput>) -> UpdateQb {
        UpdateQb::new(Arc::clone(&self.dialect), self.prepared, table)
    }

    pub fn delete(&self, table: impl Into<ColumnInput>) -> DeleteQb {
        DeleteQb::new(Arc::clone(&self.dialect), self.prepared, table)
    }

    pub fn truncate<I, C>(&self, tables: I) -> TruncateQb
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnInput>,
    {
        TruncateQb::new(Arc::clone(&self.dialect), self.prepared, tables)
    }
}

/// A builder for the named dialect of the process-wide registry.
///
/// Unknown names resolve to the default dialect.
///
/// # Example
/// ```ignore
/// let qb = sqlweave::qb::dialect("postgres").from(["users"]);
/// ```
pub fn dialect(name: &str) -> QueryBuilder {
    QueryBuilder::new(dialects::get_dialect(name))
}

/// `SELECT * FROM <table>` with the default dialect.
pub fn from(table: &str) -> SelectQb {
    dialect(DEFAULT_DIALECT).from([table])
}

/// INSERT builder with the default dialect.
pub fn insert(table: impl Into<ColumnInput>) -> InsertQb {
    dialect(DEFAULT_DIALECT).insert(table)
}

/// UPDATE builder with the default dialect.
pub fn update(table: impl Into<ColumnInput>) -> UpdateQb {
    dialect(DEFAULT_DIALECT).update(table)
}

/// DELETE builder with the default dialect.
pub fn delete(table: impl Into<ColumnInput>) -> DeleteQb {
    dialect(DEFAULT_DIALECT).delete(table)
}

/// TRUNCATE builder with the default dialect.
pub fn truncate(table: &str) -> TruncateQb {
    dialect(DEFAULT_DIALECT).truncate([table])
}

/// A single table reference; text is parsed as a dotted identifier.
fn table_expression(input: impl Into<ColumnInput>) -> SqlResult<Expression> {
    match input.into() {
        ColumnInput::Text(s) => Ok(Expression::Identifier(Identifier::parse(&s))),
        ColumnInput::Expr(expr) => Ok(expr),
        ColumnInput::List(list) => match list.columns() {
            [single] => Ok(single.clone()),
            _ => Err(SqlError::validation("expected exactly one table")),
        },
        ColumnInput::Skip => Err(SqlError::validation("missing table")),
        ColumnInput::Record(rt) => Err(SqlError::validation(format!(
            "record type '{}' is not a table reference",
            rt.name()
        ))),
    }
}

/// Stores `err` unless an earlier error is already stored.
fn keep_first(slot: &mut Option<SqlError>, err: SqlError) {
    if slot.is_none() {
        slot.replace(err);
    }
}

#[cfg(test)]
mod tests;
