//! Clause containers, one per statement kind.
//!
//! Containers are plain values. Every mutator takes `&self` and returns a new
//! container; slots are replaced wholesale except for the documented `*_append`
//! operations (WHERE / HAVING conjunction, columns, joins, CTEs, compounds,
//! ORDER BY).

mod delete;
mod insert;
mod select;
mod truncate;
mod update;

pub use delete::DeleteClauses;
pub use insert::InsertClauses;
pub use select::SelectClauses;
pub use truncate::{TruncateClauses, TruncateIdentity, TruncateOptions};
pub use update::UpdateClauses;

use crate::error::SqlError;

/// LIMIT value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit {
    Count(u64),
    /// `LIMIT ALL`
    All,
}

impl From<u64> for Limit {
    fn from(n: u64) -> Self {
        Limit::Count(n)
    }
}

/// A SELECT used as an expression: `(SELECT ...)`.
///
/// Carries the build error of the builder it came from, if any, so a failed
/// inner query fails the outer statement at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct Subquery {
    clauses: SelectClauses,
    error: Option<SqlError>,
}

impl Subquery {
    pub fn new(clauses: SelectClauses) -> Self {
        Self {
            clauses,
            error: None,
        }
    }

    pub(crate) fn with_error(clauses: SelectClauses, error: Option<SqlError>) -> Self {
        Self { clauses, error }
    }

    pub fn clauses(&self) -> &SelectClauses {
        &self.clauses
    }

    pub fn error(&self) -> Option<&SqlError> {
        self.error.as_ref()
    }
}

impl From<SelectClauses> for Subquery {
    fn from(clauses: SelectClauses) -> Self {
        Subquery::new(clauses)
    }
}

#[cfg(test)]
mod tests;
