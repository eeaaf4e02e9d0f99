//! Error types for sqlweave

use thiserror::Error;

/// Result type alias for sqlweave operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while building or rendering SQL.
///
/// Errors are plain values (`Clone + PartialEq`) so builders can carry the first
/// failure along a fluent chain and surface it only when SQL is requested.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SqlError {
    /// Malformed field annotation on a record
    #[error("Invalid tag on field '{field}': {message}")]
    Tag { field: String, message: String },

    /// Two record fields resolved to the same column name
    #[error("Duplicate column '{column}' in record '{record}'")]
    DuplicateColumn { record: String, column: String },

    /// A clause feature the dialect marks as rejected
    #[error("Dialect '{dialect}' does not support {feature} in {statement} statements")]
    Unsupported {
        dialect: String,
        statement: &'static str,
        feature: String,
    },

    /// A fragment in the configured clause order that does not belong to the statement
    #[error("Unsupported SQL fragment {fragment} for {statement} statements")]
    Fragment {
        statement: &'static str,
        fragment: String,
    },

    /// Clause container contents that cannot be rendered
    #[error("Validation error: {0}")]
    Validation(String),

    /// Dialect configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Error reported by an external executor
    #[error("Execution error: {0}")]
    Execution(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SqlError {
    /// Create a tag error for a specific field
    pub fn tag(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tag {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Create an unsupported-feature error
    pub fn unsupported(
        dialect: impl Into<String>,
        statement: &'static str,
        feature: impl Into<String>,
    ) -> Self {
        Self::Unsupported {
            dialect: dialect.into(),
            statement,
            feature: feature.into(),
        }
    }

    /// Check if this is an unsupported-feature error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Check if this is a record annotation error
    pub fn is_tag(&self) -> bool {
        matches!(self, Self::Tag { .. } | Self::DuplicateColumn { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<toml::de::Error> for SqlError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for SqlError {
    fn from(err: std::io::Error) -> Self {
        Self::Config(err.to_string())
    }
}
