//! TOML dialect configuration.
//!
//! ```toml
//! [[dialect]]
//! name = "warehouse"
//! tag = "db"
//! base = "postgres"
//!
//! [dialect.options]
//! quote_char = "`"
//! placeholder = { style = "named", prefix = ":" }
//!
//! [dialect.options.features]
//! returning = "reject"
//! ```
//!
//! `base` selects a built-in preset (default: `default`); `options` is merged
//! over it key by key, nested tables included.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use super::SqlDialect;
use super::builtin::preset;
use super::options::DialectOptions;
use super::registry::{DEFAULT_DIALECT, DEFAULT_TAG, DialectRegistry};
use crate::error::{SqlError, SqlResult};

#[derive(Debug, Clone, Deserialize)]
struct DialectFile {
    #[serde(default)]
    dialect: Vec<DialectEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct DialectEntry {
    name: String,
    #[serde(default = "default_tag")]
    tag: String,
    #[serde(default)]
    base: Option<String>,
    #[serde(default)]
    options: toml::Table,
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

impl DialectEntry {
    fn resolve(self) -> SqlResult<(String, String, DialectOptions)> {
        let base_name = self.base.as_deref().unwrap_or(DEFAULT_DIALECT);
        let base = preset(base_name).ok_or_else(|| {
            SqlError::config(format!(
                "dialect '{}': unknown base preset '{base_name}'",
                self.name
            ))
        })?;

        let rendered = toml::to_string(&base)
            .map_err(|e| SqlError::config(format!("dialect '{}': {e}", self.name)))?;
        let mut merged: toml::Table = toml::from_str(&rendered)?;
        merge(&mut merged, self.options);
        let options = DialectOptions::deserialize(toml::Value::Table(merged))
            .map_err(|e| SqlError::config(format!("dialect '{}': {e}", self.name)))?;
        Ok((self.name, self.tag, options))
    }
}

fn merge(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(nested)) => {
                merge(existing, nested);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Parse dialect entries without registering them.
pub fn parse_dialects(source: &str) -> SqlResult<Vec<(String, String, DialectOptions)>> {
    let file: DialectFile = toml::from_str(source)?;
    file.dialect.into_iter().map(DialectEntry::resolve).collect()
}

impl DialectRegistry {
    /// Register every `[[dialect]]` entry of `source`.
    ///
    /// Entries are validated before any is registered, so a failing file leaves
    /// the registry untouched.
    pub fn load_toml(&self, source: &str) -> SqlResult<Vec<Arc<SqlDialect>>> {
        let entries = parse_dialects(source)?;
        Ok(entries
            .into_iter()
            .map(|(name, tag, options)| self.register(&name, &tag, options))
            .collect())
    }

    /// [`load_toml`](Self::load_toml) from a file.
    pub fn load_toml_file(&self, path: impl AsRef<Path>) -> SqlResult<Vec<Arc<SqlDialect>>> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            SqlError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        self.load_toml(&source)
    }
}
