//! Dialects: rendering options, presets and the registry.
//!
//! A [`SqlDialect`] bundles a name, the record tag used for mapping and one
//! generator per statement kind, all sharing the same [`DialectOptions`].
//! Dialects are resolved by name through a [`DialectRegistry`]; unknown names
//! fall back to a freshly built default dialect.
//!
//! ```ignore
//! use sqlweave::dialect::{self, DialectOptions, PlaceholderStyle};
//!
//! dialect::register_dialect("custom", "db", DialectOptions {
//!     quote_char: '`',
//!     placeholder: PlaceholderStyle::Numbered("$".into()),
//!     ..DialectOptions::default()
//! });
//! let d = dialect::get_dialect("custom");
//! ```

mod builtin;
mod config;
mod options;
mod registry;

pub use builtin::{mysql, postgres, preset, register_builtin_dialects, sqlite3};
pub use config::parse_dialects;
pub use options::{BytesLiteral, DialectFeatures, DialectOptions, FeatureSupport, PlaceholderStyle, SqlFragment};
pub use registry::{
    DEFAULT_DIALECT, DEFAULT_TAG, DialectRegistry, deregister_dialect, get_dialect,
    get_dialect_with_tag, global, register_dialect,
};

use std::sync::Arc;

use crate::exp::{DeleteClauses, InsertClauses, SelectClauses, TruncateClauses, UpdateClauses};
use crate::sqlgen::{
    DeleteSqlGenerator, ExpressionSqlGenerator, InsertSqlGenerator, SelectSqlGenerator,
    SqlBuilder, TruncateSqlGenerator, UpdateSqlGenerator,
};

/// A named dialect with its generators.
#[derive(Debug, Clone)]
pub struct SqlDialect {
    name: String,
    tag: String,
    options: Arc<DialectOptions>,
    select: SelectSqlGenerator,
    update: UpdateSqlGenerator,
    insert: InsertSqlGenerator,
    delete: DeleteSqlGenerator,
    truncate: TruncateSqlGenerator,
}

impl SqlDialect {
    pub fn new(name: &str, tag: &str, options: DialectOptions) -> Self {
        let options = Arc::new(options);
        let esg = ExpressionSqlGenerator::new(name, tag, Arc::clone(&options));
        Self {
            name: name.to_string(),
            tag: tag.to_string(),
            select: SelectSqlGenerator::new(esg.clone()),
            update: UpdateSqlGenerator::new(esg.clone()),
            insert: InsertSqlGenerator::new(esg.clone()),
            delete: DeleteSqlGenerator::new(esg.clone()),
            truncate: TruncateSqlGenerator::new(esg),
            options,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record tag namespace consulted when mapping records.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn options(&self) -> &DialectOptions {
        &self.options
    }

    pub fn to_select_sql(&self, b: &mut SqlBuilder, clauses: &SelectClauses) {
        self.select.generate(b, clauses);
        self.trace(b);
    }

    pub fn to_update_sql(&self, b: &mut SqlBuilder, clauses: &UpdateClauses) {
        self.update.generate(b, clauses);
        self.trace(b);
    }

    pub fn to_insert_sql(&self, b: &mut SqlBuilder, clauses: &InsertClauses) {
        self.insert.generate(b, clauses);
        self.trace(b);
    }

    pub fn to_delete_sql(&self, b: &mut SqlBuilder, clauses: &DeleteClauses) {
        self.delete.generate(b, clauses);
        self.trace(b);
    }

    pub fn to_truncate_sql(&self, b: &mut SqlBuilder, clauses: &TruncateClauses) {
        self.truncate.generate(b, clauses);
        self.trace(b);
    }

    fn trace(&self, b: &SqlBuilder) {
        match b.error() {
            Some(err) => {
                tracing::debug!(target: "sqlweave.sql", dialect = %self.name, error = %err, "render failed");
            }
            None => {
                tracing::trace!(
                    target: "sqlweave.sql",
                    dialect = %self.name,
                    sql = b.sql(),
                    param_count = b.args().len(),
                    "rendered"
                );
            }
        }
    }
}
