//! # sqlweave
//!
//! A dialect-aware SQL construction engine.
//!
//! ## Features
//!
//! - **Immutable expression model**: identifiers, literals, comparisons, AND/OR
//!   groups, functions, casts, subqueries and per-statement clause containers
//! - **Dialects as data**: quoting, placeholders, keyword fragments, operator
//!   spellings and clause order live in [`DialectOptions`] and can be loaded
//!   from TOML
//! - **Record mapping**: structs describe their columns through [`Record`]
//!   (usually derived) and can be used as column lists, insert rows and update
//!   sources
//! - **Deferred errors**: builders keep going after a failure and report the
//!   first error when SQL is requested
//!
//! ## Query builders
//!
//! ```ignore
//! use sqlweave::qb;
//! use sqlweave::exp::{self, ExprExt};
//!
//! let (sql, args) = qb::dialect("postgres")
//!     .from(["users"])
//!     .select(["id", "name"])
//!     .where_([exp::col("id").eq(5)])
//!     .to_sql()?;
//! assert_eq!(sql, r#"SELECT "id", "name" FROM "users" WHERE ("id" = $1)"#);
//! ```
//!
//! ## Custom dialects
//!
//! ```ignore
//! use sqlweave::dialect::{self, DialectOptions, PlaceholderStyle};
//!
//! dialect::register_dialect("custom", "db", DialectOptions {
//!     quote_char: '`',
//!     placeholder: PlaceholderStyle::Numbered("$".into()),
//!     ..DialectOptions::default()
//! });
//! ```

extern crate self as sqlweave;

pub mod dialect;
pub mod error;
pub mod exec;
pub mod exp;
pub mod mapper;
pub mod prelude;
pub mod qb;
pub mod sqlgen;
pub mod value;

pub use dialect::{
    DialectOptions, DialectRegistry, SqlDialect, get_dialect, get_dialect_with_tag,
    register_dialect,
};
pub use error::{SqlError, SqlResult};
pub use exec::{DbExecutor, QueryExecutor, QueryFactory};
pub use exp::{Expression, IntoExpression};
pub use mapper::Record;
pub use qb::{DeleteQb, InsertQb, QueryBuilder, SelectQb, SqlQb, TruncateQb, UpdateQb};
pub use sqlgen::SqlBuilder;
pub use value::Value;

#[cfg(feature = "derive")]
pub use sqlweave_derive::Record;
