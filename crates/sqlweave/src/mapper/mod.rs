//! Record mapper: turns tagged record types into column lists and value lists.
//!
//! A type becomes mappable by implementing [`Record`], normally through
//! `#[derive(Record)]`. The trait describes the record's fields statically
//! ([`FieldDef`]) and returns its current field values in the same order
//! ([`FieldValue`]). [`ColumnMap`] interprets the per-tag annotations and is what
//! column-list construction and the INSERT / UPDATE generators consult.
//!
//! ```ignore
//! use sqlweave::Record;
//!
//! #[derive(Record)]
//! struct User {
//!     id: i64,
//!     #[record(db = "full_name")]
//!     name: String,
//!     #[record(db = "-")]
//!     password_hash: String,
//! }
//! ```

mod column_map;
mod tag;

pub use column_map::{ColumnData, ColumnMap};
pub use tag::{FieldTag, parse_tag};

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::SqlResult;
use crate::value::Value;

/// A record type that can be mapped to columns and values.
pub trait Record: Send + Sync + 'static {
    /// Static field descriptions, in declaration order.
    fn fields() -> Vec<FieldDef>;

    /// Current field values, one per entry of [`Record::fields`], same order.
    fn field_values(&self) -> Vec<FieldValue>;
}

/// Description of one record field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    /// Rust field name.
    pub name: &'static str,
    /// Column name used when no annotation overrides it.
    pub column: &'static str,
    /// Raw annotations keyed by tag namespace, e.g. `[("db", "full_name,skipinsert")]`.
    pub tags: &'static [(&'static str, &'static str)],
    pub kind: FieldKind,
}

impl FieldDef {
    /// A plain value field without annotations.
    pub const fn value(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            tags: &[],
            kind: FieldKind::Value,
        }
    }

    pub const fn with_tags(self, tags: &'static [(&'static str, &'static str)]) -> Self {
        Self { tags, ..self }
    }

    pub const fn with_kind(self, kind: FieldKind) -> Self {
        Self { kind, ..self }
    }

    /// The raw annotation for `tag`, if any.
    pub fn tag(&self, tag: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, raw)| *raw)
    }
}

/// How a field contributes columns.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// One column.
    Value,
    /// Embedded record: its columns are merged into the parent unqualified.
    Flatten(fn() -> Vec<FieldDef>),
    /// Qualified sub-object: its columns are prefixed with `<column>.`.
    Nested(fn() -> Vec<FieldDef>),
}

/// Current value of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Value(Value),
    /// Values of an embedded or nested record.
    Record(Vec<FieldValue>),
}

impl FieldValue {
    /// Convenience for hand-written [`Record`] impls.
    pub fn of(value: impl Into<Value>) -> Self {
        FieldValue::Value(value.into())
    }

    /// Follow an index path through nested records.
    pub(crate) fn lookup<'a>(values: &'a [FieldValue], path: &[usize]) -> Option<&'a Value> {
        let (first, rest) = path.split_first()?;
        match (values.get(*first)?, rest.is_empty()) {
            (FieldValue::Value(v), true) => Some(v),
            (FieldValue::Record(inner), false) => Self::lookup(inner, rest),
            _ => None,
        }
    }
}

/// Type-erased handle to a [`Record`] implementation.
#[derive(Clone, Copy)]
pub struct RecordType {
    id: TypeId,
    name: &'static str,
    fields: fn() -> Vec<FieldDef>,
}

impl RecordType {
    pub fn of<T: Record>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            fields: T::fields,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified Rust type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> Vec<FieldDef> {
        (self.fields)()
    }

    /// The cached column map of this type under `tag`.
    pub fn column_map(&self, tag: &str) -> SqlResult<Arc<ColumnMap>> {
        ColumnMap::for_type(self, tag)
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordType").field(&self.name).finish()
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RecordType {}

impl Hash for RecordType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Object-safe view of a record value.
pub trait RecordValue: Send + Sync {
    fn record_type(&self) -> RecordType;
    fn record_values(&self) -> Vec<FieldValue>;
}

impl<T: Record> RecordValue for T {
    fn record_type(&self) -> RecordType {
        RecordType::of::<T>()
    }

    fn record_values(&self) -> Vec<FieldValue> {
        self.field_values()
    }
}

/// A shared, type-erased record value stored in clause containers.
#[derive(Clone)]
pub struct RecordRef(Arc<dyn RecordValue>);

impl RecordRef {
    pub fn new<T: Record>(record: T) -> Self {
        Self(Arc::new(record))
    }

    pub fn record_type(&self) -> RecordType {
        self.0.record_type()
    }

    pub fn values(&self) -> Vec<FieldValue> {
        self.0.record_values()
    }
}

impl fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordRef")
            .field("type", &self.record_type().name())
            .field("values", &self.values())
            .finish()
    }
}

impl PartialEq for RecordRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.record_type() == other.record_type() && self.values() == other.values())
    }
}

#[cfg(test)]
mod tests;
