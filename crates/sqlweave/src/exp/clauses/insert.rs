use crate::exp::{
    ColumnList, CommonTableExpression, ConflictExpression, Expression, InsertSource, IntoExpression,
};

/// Slots of an INSERT statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsertClauses {
    ctes: Vec<CommonTableExpression>,
    into: Option<Expression>,
    columns: ColumnList,
    source: Option<InsertSource>,
    conflict: Option<ConflictExpression>,
    returning: ColumnList,
}

impl InsertClauses {
    pub fn new(into: impl IntoExpression) -> Self {
        Self {
            into: Some(into.into_expression()),
            ..Self::default()
        }
    }

    pub fn ctes(&self) -> &[CommonTableExpression] {
        &self.ctes
    }

    pub fn cte_append(&self, cte: CommonTableExpression) -> Self {
        let mut next = self.clone();
        next.ctes.push(cte);
        next
    }

    pub fn table(&self) -> Option<&Expression> {
        self.into.as_ref()
    }

    pub fn set_table(&self, into: impl IntoExpression) -> Self {
        Self {
            into: Some(into.into_expression()),
            ..self.clone()
        }
    }

    /// Explicit column list; ignored for record sources, which supply their own.
    pub fn columns(&self) -> &ColumnList {
        &self.columns
    }

    pub fn set_columns(&self, columns: ColumnList) -> Self {
        Self {
            columns,
            ..self.clone()
        }
    }

    pub fn source(&self) -> Option<&InsertSource> {
        self.source.as_ref()
    }

    pub fn set_source(&self, source: InsertSource) -> Self {
        Self {
            source: Some(source),
            ..self.clone()
        }
    }

    /// Adds explicit value rows, merging with existing value rows.
    pub fn rows_append(&self, rows: Vec<Vec<Expression>>) -> Self {
        let source = match &self.source {
            Some(InsertSource::Values(existing)) => {
                let mut merged = existing.clone();
                merged.extend(rows);
                InsertSource::Values(merged)
            }
            _ => InsertSource::Values(rows),
        };
        self.set_source(source)
    }

    pub fn conflict(&self) -> Option<&ConflictExpression> {
        self.conflict.as_ref()
    }

    pub fn set_conflict(&self, conflict: Option<ConflictExpression>) -> Self {
        Self {
            conflict,
            ..self.clone()
        }
    }

    pub fn returning(&self) -> &ColumnList {
        &self.returning
    }

    pub fn set_returning(&self, returning: ColumnList) -> Self {
        Self {
            returning,
            ..self.clone()
        }
    }
}
