//! UPDATE generator.

use super::builder::SqlBuilder;
use super::expr::ExpressionSqlGenerator;
use super::UPDATE;
use crate::dialect::SqlFragment;
use crate::error::SqlError;
use crate::exp::UpdateClauses;

/// Renders [`UpdateClauses`] in the dialect's `update_order`.
#[derive(Debug, Clone)]
pub struct UpdateSqlGenerator {
    esg: ExpressionSqlGenerator,
}

impl UpdateSqlGenerator {
    pub fn new(esg: ExpressionSqlGenerator) -> Self {
        Self { esg }
    }

    pub fn dialect(&self) -> &str {
        self.esg.dialect()
    }

    pub fn generate(&self, b: &mut SqlBuilder, clauses: &UpdateClauses) {
        let esg = &self.esg;
        let features = &esg.options().features;

        let Some(table) = clauses.table() else {
            b.set_error(SqlError::validation("update requires a table"));
            return;
        };
        let Some(source) = clauses.values() else {
            b.set_error(SqlError::validation("update requires set values"));
            return;
        };

        for fragment in &esg.options().update_order {
            if b.has_error() {
                return;
            }
            match fragment {
                SqlFragment::CommonTable => esg.ctes_sql(b, UPDATE, clauses.ctes()),
                SqlFragment::UpdateBegin => {
                    b.write_str("UPDATE ");
                    esg.generate(b, table);
                }
                SqlFragment::Set => match source.assignments(esg.tag()) {
                    Ok(updates) if updates.is_empty() => {
                        b.set_error(SqlError::validation("update requires set values"));
                    }
                    Ok(updates) => {
                        b.write_str(" SET ");
                        esg.assignments_sql(b, &updates);
                    }
                    Err(err) => b.set_error(err),
                },
                SqlFragment::UpdateFrom => {
                    if !clauses.from().is_empty()
                        && esg.allows(b, features.update_from, UPDATE, "FROM")
                    {
                        b.write_str(" FROM ");
                        esg.comma_separated(b, clauses.from().columns());
                    }
                }
                SqlFragment::Where => esg.where_sql(b, clauses.where_()),
                SqlFragment::Order => {
                    if !clauses.order().is_empty()
                        && esg.allows(b, features.order_by_on_update, UPDATE, "ORDER BY")
                    {
                        esg.order_sql(b, UPDATE, clauses.order());
                    }
                }
                SqlFragment::Limit => {
                    if clauses.limit().is_some()
                        && esg.allows(b, features.limit_on_update, UPDATE, "LIMIT")
                    {
                        esg.limit_sql(b, clauses.limit());
                    }
                }
                SqlFragment::Returning => esg.returning_sql(b, UPDATE, clauses.returning()),
                other => esg.unsupported_fragment(b, UPDATE, other),
            }
        }
    }
}
