//! Trait shared by the query builders.

use crate::dialect::SqlDialect;
use crate::error::{SqlError, SqlResult};
use crate::sqlgen::SqlBuilder;
use crate::value::Value;

/// Base trait for all query builders.
///
/// Implementors only describe how to render themselves; [`to_sql`](Self::to_sql)
/// surfaces a stored build error before any rendering happens.
pub trait SqlQb: Sync {
    /// The dialect the builder renders with.
    fn dialect(&self) -> &SqlDialect;

    /// Placeholders plus arguments (`true`) or inline values (`false`).
    fn is_prepared(&self) -> bool;

    /// The first error recorded while building, if any.
    fn build_error(&self) -> Option<&SqlError>;

    /// Write the statement into `b`.
    fn render(&self, b: &mut SqlBuilder);

    /// Render into a fresh [`SqlBuilder`]; build errors are stored on it.
    fn to_builder(&self) -> SqlBuilder {
        let mut b = SqlBuilder::new(self.is_prepared());
        match self.build_error() {
            Some(err) => b.set_error(err.clone()),
            None => self.render(&mut b),
        }
        b
    }

    /// The rendered statement and its arguments, or the first error.
    fn to_sql(&self) -> SqlResult<(String, Vec<Value>)> {
        self.to_builder().finish()
    }
}
