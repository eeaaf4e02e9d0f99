//! DELETE generator.

use super::builder::SqlBuilder;
use super::expr::ExpressionSqlGenerator;
use super::DELETE;
use crate::dialect::SqlFragment;
use crate::error::SqlError;
use crate::exp::DeleteClauses;

/// Renders [`DeleteClauses`] in the dialect's `delete_order`.
#[derive(Debug, Clone)]
pub struct DeleteSqlGenerator {
    esg: ExpressionSqlGenerator,
}

impl DeleteSqlGenerator {
    pub fn new(esg: ExpressionSqlGenerator) -> Self {
        Self { esg }
    }

    pub fn dialect(&self) -> &str {
        self.esg.dialect()
    }

    pub fn generate(&self, b: &mut SqlBuilder, clauses: &DeleteClauses) {
        let esg = &self.esg;
        let features = &esg.options().features;

        let Some(from) = clauses.from() else {
            b.set_error(SqlError::validation("delete requires a table"));
            return;
        };

        for fragment in &esg.options().delete_order {
            if b.has_error() {
                return;
            }
            match fragment {
                SqlFragment::CommonTable => esg.ctes_sql(b, DELETE, clauses.ctes()),
                SqlFragment::DeleteBegin => {
                    b.write_str("DELETE FROM ");
                    esg.generate(b, from);
                }
                SqlFragment::Where => esg.where_sql(b, clauses.where_()),
                SqlFragment::Order => {
                    if !clauses.order().is_empty()
                        && esg.allows(b, features.order_by_on_delete, DELETE, "ORDER BY")
                    {
                        esg.order_sql(b, DELETE, clauses.order());
                    }
                }
                SqlFragment::Limit => {
                    if clauses.limit().is_some()
                        && esg.allows(b, features.limit_on_delete, DELETE, "LIMIT")
                    {
                        esg.limit_sql(b, clauses.limit());
                    }
                }
                SqlFragment::Returning => esg.returning_sql(b, DELETE, clauses.returning()),
                other => esg.unsupported_fragment(b, DELETE, other),
            }
        }
    }
}
