//! INSERT generator.

use super::builder::SqlBuilder;
use super::expr::ExpressionSqlGenerator;
use super::{INSERT, select};
use crate::dialect::{FeatureSupport, SqlFragment};
use crate::error::SqlError;
use crate::exp::{
    ColumnList, ConflictAction, ConflictExpression, Expression, InsertClauses, InsertSource,
    record_rows,
};

/// Renders [`InsertClauses`] in the dialect's `insert_order`.
#[derive(Debug, Clone)]
pub struct InsertSqlGenerator {
    esg: ExpressionSqlGenerator,
}

impl InsertSqlGenerator {
    pub fn new(esg: ExpressionSqlGenerator) -> Self {
        Self { esg }
    }

    pub fn dialect(&self) -> &str {
        self.esg.dialect()
    }

    pub fn generate(&self, b: &mut SqlBuilder, clauses: &InsertClauses) {
        let esg = &self.esg;
        let Some(table) = clauses.table() else {
            b.set_error(SqlError::validation("insert requires a table"));
            return;
        };

        // DO NOTHING becomes a keyword variant on dialects with INSERT IGNORE syntax
        let ignore = match (clauses.conflict(), &esg.options().insert_ignore_fragment) {
            (Some(c), Some(fragment)) if c.is_do_nothing() => Some(fragment.as_str()),
            _ => None,
        };

        for fragment in &esg.options().insert_order {
            if b.has_error() {
                return;
            }
            match fragment {
                SqlFragment::CommonTable => esg.ctes_sql(b, INSERT, clauses.ctes()),
                SqlFragment::InsertBegin => {
                    b.write_str(ignore.unwrap_or(&esg.options().insert_fragment));
                    b.write_char(' ');
                    esg.generate(b, table);
                }
                SqlFragment::Insert => self.rows_sql(b, clauses),
                SqlFragment::Conflict => {
                    if let Some(conflict) = clauses.conflict() {
                        if ignore.is_none() {
                            self.conflict_sql(b, conflict);
                        }
                    }
                }
                SqlFragment::Returning => esg.returning_sql(b, INSERT, clauses.returning()),
                other => esg.unsupported_fragment(b, INSERT, other),
            }
        }
    }

    fn rows_sql(&self, b: &mut SqlBuilder, clauses: &InsertClauses) {
        let esg = &self.esg;
        match clauses.source() {
            None | Some(InsertSource::DefaultValues) => {
                b.write_char(' ');
                b.write_str(&esg.options().default_values_fragment);
            }
            Some(InsertSource::Values(rows)) => self.values_sql(b, clauses.columns(), rows),
            Some(InsertSource::Records(records)) => match record_rows(records, esg.tag()) {
                Ok((columns, _)) if columns.is_empty() => {
                    b.set_error(SqlError::validation("insert records have no insertable columns"));
                }
                Ok((columns, rows)) => self.values_sql(b, &columns, &rows),
                Err(err) => b.set_error(err),
            },
            Some(InsertSource::Select(query)) => {
                self.columns_sql(b, clauses.columns());
                b.write_char(' ');
                select::render(esg, b, query);
            }
        }
    }

    fn columns_sql(&self, b: &mut SqlBuilder, columns: &ColumnList) {
        if !columns.is_empty() {
            b.write_str(" (");
            self.esg.comma_separated(b, columns.columns());
            b.write_char(')');
        }
    }

    fn values_sql(&self, b: &mut SqlBuilder, columns: &ColumnList, rows: &[Vec<Expression>]) {
        let esg = &self.esg;
        let Some(first) = rows.first() else {
            b.set_error(SqlError::validation("insert requires at least one row"));
            return;
        };
        if rows.iter().any(|r| r.len() != first.len()) {
            b.set_error(SqlError::validation("rows with different value length"));
            return;
        }
        if !columns.is_empty() && columns.len() != first.len() {
            b.set_error(SqlError::validation(format!(
                "insert has {} columns but {} values per row",
                columns.len(),
                first.len()
            )));
            return;
        }
        if rows.len() > 1 {
            let support = match esg.options().features.multi_row_insert {
                FeatureSupport::Omit => FeatureSupport::Reject,
                other => other,
            };
            if !esg.allows(b, support, INSERT, "multi-row VALUES") {
                return;
            }
        }

        self.columns_sql(b, columns);
        b.write_str(" VALUES ");
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                b.write_str(", ");
            }
            b.write_char('(');
            esg.comma_separated(b, row);
            b.write_char(')');
        }
    }

    fn conflict_sql(&self, b: &mut SqlBuilder, conflict: &ConflictExpression) {
        let esg = &self.esg;
        let opts = esg.options();

        b.write_str(&opts.conflict_fragment);
        if let Some(target) = conflict.target_column() {
            if esg.allows(b, opts.features.conflict_target, INSERT, "ON CONFLICT target") {
                b.write_str(" (");
                b.write_str(target);
                b.write_char(')');
            }
        }

        match conflict.action() {
            ConflictAction::DoNothing => {
                b.write_str(&opts.conflict_do_nothing_fragment);
            }
            ConflictAction::DoUpdate { where_, .. } => {
                let updates = match conflict.updates(esg.tag()) {
                    Ok(updates) if !updates.is_empty() => updates,
                    Ok(_) => {
                        b.set_error(SqlError::validation("conflict update requires set values"));
                        return;
                    }
                    Err(err) => {
                        b.set_error(err);
                        return;
                    }
                };
                b.write_str(&opts.conflict_do_update_fragment);
                esg.assignments_sql(b, &updates);
                if !where_.is_empty()
                    && esg.allows(b, opts.features.conflict_update_where, INSERT, "ON CONFLICT ... WHERE")
                {
                    b.write_str(" WHERE ");
                    esg.expression_list(b, where_);
                }
            }
        }
    }
}
