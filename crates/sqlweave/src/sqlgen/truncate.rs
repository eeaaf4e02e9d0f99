//! TRUNCATE generator.

use super::builder::SqlBuilder;
use super::expr::ExpressionSqlGenerator;
use super::TRUNCATE;
use crate::dialect::{FeatureSupport, SqlFragment};
use crate::error::SqlError;
use crate::exp::TruncateClauses;

/// Renders [`TruncateClauses`] in the dialect's `truncate_order`.
#[derive(Debug, Clone)]
pub struct TruncateSqlGenerator {
    esg: ExpressionSqlGenerator,
}

impl TruncateSqlGenerator {
    pub fn new(esg: ExpressionSqlGenerator) -> Self {
        Self { esg }
    }

    pub fn dialect(&self) -> &str {
        self.esg.dialect()
    }

    pub fn generate(&self, b: &mut SqlBuilder, clauses: &TruncateClauses) {
        let esg = &self.esg;
        if clauses.tables().is_empty() {
            b.set_error(SqlError::validation("truncate requires at least one table"));
            return;
        }

        for fragment in &esg.options().truncate_order {
            if b.has_error() {
                return;
            }
            match fragment {
                SqlFragment::Truncate => self.truncate_sql(b, clauses),
                other => esg.unsupported_fragment(b, TRUNCATE, other),
            }
        }
    }

    fn truncate_sql(&self, b: &mut SqlBuilder, clauses: &TruncateClauses) {
        let esg = &self.esg;
        let features = &esg.options().features;
        let opts = clauses.options();

        if clauses.tables().columns().len() > 1 {
            let support = match features.multi_table_truncate {
                FeatureSupport::Omit => FeatureSupport::Reject,
                other => other,
            };
            if !esg.allows(b, support, TRUNCATE, "multiple tables") {
                return;
            }
        }

        b.write_str(&esg.options().truncate_fragment);
        b.write_char(' ');
        esg.comma_separated(b, clauses.tables().columns());

        if let Some(identity) = opts.identity {
            if esg.allows(b, features.truncate_identity, TRUNCATE, identity.as_sql()) {
                b.write_char(' ');
                b.write_str(identity.as_sql());
            }
        }
        if opts.cascade && esg.allows(b, features.truncate_cascade, TRUNCATE, "CASCADE") {
            b.write_str(" CASCADE");
        }
        if opts.restrict && esg.allows(b, features.truncate_cascade, TRUNCATE, "RESTRICT") {
            b.write_str(" RESTRICT");
        }
    }
}
