//! Output buffer shared by the generators.

use crate::error::{SqlError, SqlResult};
use crate::value::Value;

/// SQL text plus the ordered argument list it references.
///
/// Generators write into the buffer and record the first failure with
/// [`set_error`](Self::set_error). A builder with an error never yields SQL.
#[derive(Debug, Clone, Default)]
pub struct SqlBuilder {
    sql: String,
    args: Vec<Value>,
    prepared: bool,
    error: Option<SqlError>,
}

impl SqlBuilder {
    /// `prepared` selects placeholders plus arguments over inline values.
    pub fn new(prepared: bool) -> Self {
        Self {
            prepared,
            ..Self::default()
        }
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn write_str(&mut self, s: &str) -> &mut Self {
        self.sql.push_str(s);
        self
    }

    pub fn write_char(&mut self, c: char) -> &mut Self {
        self.sql.push(c);
        self
    }

    /// Appends an argument and returns its 1-based position.
    pub fn push_arg(&mut self, value: Value) -> usize {
        self.args.push(value);
        self.args.len()
    }

    /// 1-based position of an argument equal to `value`, if any.
    pub fn find_arg(&self, value: &Value) -> Option<usize> {
        self.args.iter().position(|a| a == value).map(|i| i + 1)
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Records `error` unless one is already recorded.
    pub fn set_error(&mut self, error: SqlError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub fn error(&self) -> Option<&SqlError> {
        self.error.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// The rendered statement, or the first recorded error.
    pub fn to_sql(&self) -> SqlResult<(String, Vec<Value>)> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok((self.sql.clone(), self.args.clone())),
        }
    }

    /// Like [`to_sql`](Self::to_sql) without copying.
    pub fn finish(self) -> SqlResult<(String, Vec<Value>)> {
        match self.error {
            Some(err) => Err(err),
            None => Ok((self.sql, self.args)),
        }
    }
}
