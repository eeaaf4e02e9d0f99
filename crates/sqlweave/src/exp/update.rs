//! SET assignments for UPDATE and conflict updates.

use super::{Expression, Identifier, IntoExpression};
use crate::error::SqlResult;
use crate::mapper::{Record, RecordRef};

/// `"col"=value`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    col: Identifier,
    val: Expression,
}

impl UpdateExpression {
    pub fn new(col: impl Into<Identifier>, val: impl IntoExpression) -> Self {
        Self {
            col: col.into(),
            val: val.into_expression(),
        }
    }

    pub fn col(&self) -> &Identifier {
        &self.col
    }

    pub fn value(&self) -> &Expression {
        &self.val
    }
}

impl Identifier {
    /// `self = value` as a SET assignment.
    pub fn set(&self, value: impl IntoExpression) -> UpdateExpression {
        UpdateExpression {
            col: self.clone(),
            val: value.into_expression(),
        }
    }
}

/// Where the SET values of an UPDATE come from.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateSource {
    /// Explicit assignments, rendered in order.
    Assignments(Vec<UpdateExpression>),
    /// A record, mapped with the generator's tag.
    Record(RecordRef),
}

impl UpdateSource {
    /// Assignments from `(column, value)` pairs. Column names are taken verbatim.
    pub fn pairs<I, C, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, V)>,
        C: AsRef<str>,
        V: IntoExpression,
    {
        UpdateSource::Assignments(
            pairs
                .into_iter()
                .map(|(c, v)| UpdateExpression::new(Identifier::new("", "", c.as_ref()), v))
                .collect(),
        )
    }

    pub fn record<T: Record>(record: T) -> Self {
        UpdateSource::Record(RecordRef::new(record))
    }

    /// The assignments this source renders to under `tag`.
    pub fn assignments(&self, tag: &str) -> SqlResult<Vec<UpdateExpression>> {
        match self {
            UpdateSource::Assignments(list) => Ok(list.clone()),
            UpdateSource::Record(record) => {
                let map = record.record_type().column_map(tag)?;
                Ok(map
                    .update_assignments(&record.values())?
                    .into_iter()
                    .map(|(col, val)| UpdateExpression::new(Identifier::new("", "", &col), val))
                    .collect())
            }
        }
    }
}

impl From<Vec<UpdateExpression>> for UpdateSource {
    fn from(list: Vec<UpdateExpression>) -> Self {
        UpdateSource::Assignments(list)
    }
}

impl From<UpdateExpression> for UpdateSource {
    fn from(single: UpdateExpression) -> Self {
        UpdateSource::Assignments(vec![single])
    }
}

impl From<RecordRef> for UpdateSource {
    fn from(record: RecordRef) -> Self {
        UpdateSource::Record(record)
    }
}
