//! Dialect-aware SQL generators.
//!
//! Each statement kind has a generator bound to one dialect's name, record tag
//! and [`DialectOptions`](crate::dialect::DialectOptions). Generators write into
//! a [`SqlBuilder`], which accumulates the SQL text, the argument list and the
//! first rendering error.
//!
//! Clause order is taken from the options' fragment lists; clauses that are
//! absent from the container are skipped without emitting anything.

mod builder;
mod common;
mod delete;
mod expr;
mod insert;
mod select;
mod truncate;
mod update;

pub use builder::SqlBuilder;
pub use delete::DeleteSqlGenerator;
pub use expr::ExpressionSqlGenerator;
pub use insert::InsertSqlGenerator;
pub use select::SelectSqlGenerator;
pub use truncate::TruncateSqlGenerator;
pub use update::UpdateSqlGenerator;

pub(crate) const SELECT: &str = "SELECT";
pub(crate) const UPDATE: &str = "UPDATE";
pub(crate) const INSERT: &str = "INSERT";
pub(crate) const DELETE: &str = "DELETE";
pub(crate) const TRUNCATE: &str = "TRUNCATE";
