//! INSERT row sources and conflict handling.

use super::{
    ColumnList, Expression, ExpressionList, Identifier, IntoExpression, SelectClauses,
    UpdateExpression, UpdateSource,
};
use crate::error::{SqlError, SqlResult};
use crate::mapper::{Record, RecordRef};

/// Rows of an INSERT.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// Explicit rows; the column list comes from the clause container.
    Values(Vec<Vec<Expression>>),
    /// Records of one type; columns come from the record mapper.
    Records(Vec<RecordRef>),
    /// `INSERT INTO t [(cols)] SELECT ...`
    Select(Box<SelectClauses>),
    /// `DEFAULT VALUES`
    DefaultValues,
}

impl InsertSource {
    /// A single row of values.
    pub fn row<I, E>(values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        InsertSource::Values(vec![values.into_iter().map(IntoExpression::into_expression).collect()])
    }

    pub fn records<T: Record>(records: impl IntoIterator<Item = T>) -> Self {
        InsertSource::Records(records.into_iter().map(RecordRef::new).collect())
    }

    /// Number of rows; a SELECT counts as one.
    pub fn row_count(&self) -> usize {
        match self {
            InsertSource::Values(rows) => rows.len(),
            InsertSource::Records(records) => records.len(),
            InsertSource::Select(_) | InsertSource::DefaultValues => 1,
        }
    }
}

/// Resolve record rows under `tag` into a column list and value rows.
///
/// All records must be of one type and produce the same columns.
pub(crate) fn record_rows(
    records: &[RecordRef],
    tag: &str,
) -> SqlResult<(ColumnList, Vec<Vec<Expression>>)> {
    let Some(first) = records.first() else {
        return Ok((ColumnList::empty(), Vec::new()));
    };
    let rt = first.record_type();
    let map = rt.column_map(tag)?;

    let mut columns: Option<Vec<String>> = None;
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        if record.record_type() != rt {
            return Err(SqlError::validation(format!(
                "insert records must be of one type, found {} and {}",
                rt.name(),
                record.record_type().name()
            )));
        }
        let (cols, values) = map.insert_row(&record.values())?;
        match &columns {
            Some(expected) if *expected != cols => {
                return Err(SqlError::validation(
                    "insert records produce different columns",
                ));
            }
            Some(_) => {}
            None => columns = Some(cols),
        }
        rows.push(values);
    }

    let columns = columns
        .unwrap_or_default()
        .iter()
        .map(|c| Expression::Identifier(Identifier::new("", "", c)))
        .collect();
    Ok((columns, rows))
}

/// What to do when an inserted row conflicts.
#[derive(Debug, Clone, PartialEq)]
pub enum ConflictAction {
    DoNothing,
    DoUpdate {
        updates: UpdateSource,
        where_: ExpressionList,
    },
}

/// `ON CONFLICT [(target)] DO NOTHING | DO UPDATE SET ... [WHERE ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictExpression {
    target: Option<String>,
    action: ConflictAction,
}

impl ConflictExpression {
    pub fn do_nothing() -> Self {
        Self {
            target: None,
            action: ConflictAction::DoNothing,
        }
    }

    /// `target` is emitted verbatim inside parentheses, e.g. `"id"` or `"id, tenant_id"`.
    pub fn do_update(target: impl Into<String>, updates: impl Into<UpdateSource>) -> Self {
        Self {
            target: Some(target.into()).filter(|t| !t.is_empty()),
            action: ConflictAction::DoUpdate {
                updates: updates.into(),
                where_: ExpressionList::default(),
            },
        }
    }

    /// Returns a copy with the conflict target replaced.
    pub fn target(&self, target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()).filter(|t| !t.is_empty()),
            ..self.clone()
        }
    }

    /// Returns a copy whose DO UPDATE carries an extra WHERE predicate.
    /// Has no effect on DO NOTHING.
    pub fn where_<I, E>(&self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        let action = match &self.action {
            ConflictAction::DoNothing => ConflictAction::DoNothing,
            ConflictAction::DoUpdate { updates, where_ } => ConflictAction::DoUpdate {
                updates: updates.clone(),
                where_: where_.append(exprs),
            },
        };
        Self {
            action,
            ..self.clone()
        }
    }

    pub fn target_column(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn action(&self) -> &ConflictAction {
        &self.action
    }

    pub fn is_do_nothing(&self) -> bool {
        matches!(self.action, ConflictAction::DoNothing)
    }

    /// Assignments of a DO UPDATE under `tag`; empty for DO NOTHING.
    pub fn updates(&self, tag: &str) -> SqlResult<Vec<UpdateExpression>> {
        match &self.action {
            ConflictAction::DoNothing => Ok(Vec::new()),
            ConflictAction::DoUpdate { updates, .. } => updates.assignments(tag),
        }
    }
}
