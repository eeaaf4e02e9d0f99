//! SQL identifiers.
//!
//! [`Identifier`] represents a schema / table / column reference. Each present
//! segment is quoted independently when rendered, so `public.users.id` becomes
//! `"public"."users"."id"` under a `"`-quoting dialect.
//!
//! The string parser is a plain split on `.` with no escaping support: a segment
//! that itself contains a `.` has to be built from explicit segments with
//! [`Identifier::new`].
//!
//! # Example
//! ```ignore
//! use sqlweave::exp::Identifier;
//!
//! let c = Identifier::parse("users.id");
//! assert_eq!(c.table_name(), Some("users"));
//! assert!(c.is_qualified());
//! ```

/// A SQL identifier (schema, table and/or column).
///
/// Empty segments are stored as `None`. A column of `*` renders unquoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Identifier {
    schema: Option<String>,
    table: Option<String>,
    column: Option<String>,
}

fn segment(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

impl Identifier {
    /// Build an identifier from explicit segments. Empty strings mean "absent".
    pub fn new(schema: &str, table: &str, column: &str) -> Self {
        Self {
            schema: segment(schema),
            table: segment(table),
            column: segment(column),
        }
    }

    /// Parse a dotted identifier.
    ///
    /// - `col` → column
    /// - `table.col` → table + column
    /// - `schema.table.col` → schema + table + column
    /// - anything else is kept whole as the column name
    ///
    /// Empty segments are treated as absent, so `.col` is an unqualified column.
    pub fn parse(s: &str) -> Self {
        let parts: Vec<&str> = s.split('.').collect();
        match parts.as_slice() {
            [table, column] => Self::new("", table, column),
            [schema, table, column] => Self::new(schema, table, column),
            _ => Self::new("", "", s),
        }
    }

    /// Returns a copy with the schema replaced.
    pub fn schema(&self, schema: &str) -> Self {
        Self {
            schema: segment(schema),
            ..self.clone()
        }
    }

    /// Returns a copy with the table replaced.
    pub fn table(&self, table: &str) -> Self {
        Self {
            table: segment(table),
            ..self.clone()
        }
    }

    /// Returns a copy with the column replaced.
    pub fn col(&self, column: &str) -> Self {
        Self {
            column: segment(column),
            ..self.clone()
        }
    }

    /// `table.*`
    pub fn all(&self) -> Self {
        self.col("*")
    }

    pub fn schema_name(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn column_name(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// An identifier is qualified when a table or schema segment is present.
    pub fn is_qualified(&self) -> bool {
        self.table.is_some() || self.schema.is_some()
    }

    /// Returns `true` when no segment is present.
    pub fn is_empty(&self) -> bool {
        self.schema.is_none() && self.table.is_none() && self.column.is_none()
    }

    /// Present segments in rendering order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        [&self.schema, &self.table, &self.column]
            .into_iter()
            .filter_map(|s| s.as_deref())
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::parse(s)
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier::parse(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_simple() {
        let ident = Identifier::parse("users");
        assert_eq!(ident.column_name(), Some("users"));
        assert!(!ident.is_qualified());
    }

    #[test]
    fn ident_dotted() {
        let ident = Identifier::parse("users.id");
        assert_eq!(ident.table_name(), Some("users"));
        assert_eq!(ident.column_name(), Some("id"));
        assert!(ident.is_qualified());
    }

    #[test]
    fn ident_three_parts() {
        let ident = Identifier::parse("public.users.id");
        let parts: Vec<&str> = ident.segments().collect();
        assert_eq!(parts, vec!["public", "users", "id"]);
    }

    #[test]
    fn ident_leading_empty_segment_is_unqualified() {
        let ident = Identifier::parse(".id");
        assert!(!ident.is_qualified());
        assert_eq!(ident.column_name(), Some("id"));
    }

    #[test]
    fn ident_trailing_empty_segment_is_table_only() {
        let ident = Identifier::parse("users.");
        assert_eq!(ident.table_name(), Some("users"));
        assert_eq!(ident.column_name(), None);
    }

    #[test]
    fn ident_four_parts_kept_whole() {
        let ident = Identifier::parse("a.b.c.d");
        assert_eq!(ident.column_name(), Some("a.b.c.d"));
        assert!(!ident.is_qualified());
    }

    #[test]
    fn ident_explicit_segments_keep_dots() {
        let ident = Identifier::new("", "", "t.id");
        assert_eq!(ident.column_name(), Some("t.id"));
        assert!(!ident.is_qualified());
    }

    #[test]
    fn ident_copy_on_write() {
        let base = Identifier::parse("id");
        let qualified = base.table("users");
        assert!(!base.is_qualified());
        assert!(qualified.is_qualified());
    }
}
