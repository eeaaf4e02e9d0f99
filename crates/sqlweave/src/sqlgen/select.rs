//! SELECT generator.

use super::builder::SqlBuilder;
use super::expr::ExpressionSqlGenerator;
use super::SELECT;
use crate::dialect::SqlFragment;
use crate::error::SqlError;
use crate::exp::{JoinCondition, JoinExpression, Lock, LockWait, SelectClauses};

/// Renders [`SelectClauses`] in the dialect's `select_order`.
#[derive(Debug, Clone)]
pub struct SelectSqlGenerator {
    esg: ExpressionSqlGenerator,
}

impl SelectSqlGenerator {
    pub fn new(esg: ExpressionSqlGenerator) -> Self {
        Self { esg }
    }

    pub fn dialect(&self) -> &str {
        self.esg.dialect()
    }

    pub fn generate(&self, b: &mut SqlBuilder, clauses: &SelectClauses) {
        render(&self.esg, b, clauses);
    }
}

/// Shared with subquery rendering.
pub(crate) fn render(esg: &ExpressionSqlGenerator, b: &mut SqlBuilder, clauses: &SelectClauses) {
    let features = &esg.options().features;
    for fragment in &esg.options().select_order {
        if b.has_error() {
            return;
        }
        match fragment {
            SqlFragment::CommonTable => esg.ctes_sql(b, SELECT, clauses.ctes()),
            SqlFragment::Select => select_sql(esg, b, clauses),
            SqlFragment::From => {
                if !clauses.from().is_empty() {
                    b.write_str(" FROM ");
                    esg.comma_separated(b, clauses.from().columns());
                }
            }
            SqlFragment::Join => {
                for join in clauses.joins() {
                    join_sql(esg, b, join);
                }
            }
            SqlFragment::Where => esg.where_sql(b, clauses.where_()),
            SqlFragment::GroupBy => {
                if !clauses.group_by().is_empty() {
                    b.write_str(" GROUP BY ");
                    esg.comma_separated(b, clauses.group_by().columns());
                }
            }
            SqlFragment::Having => {
                if !clauses.having().is_empty() {
                    b.write_str(" HAVING ");
                    esg.expression_list(b, clauses.having());
                }
            }
            SqlFragment::Compounds => {
                for compound in clauses.compounds() {
                    b.write_char(' ');
                    b.write_str(compound.kind().as_sql());
                    b.write_char(' ');
                    if esg.options().wrap_compounds_in_parens {
                        esg.subquery(b, compound.rhs());
                    } else if let Some(err) = compound.rhs().error() {
                        b.set_error(err.clone());
                    } else {
                        render(esg, b, compound.rhs().clauses());
                    }
                }
            }
            SqlFragment::Order => esg.order_sql(b, SELECT, clauses.order()),
            SqlFragment::Limit => esg.limit_sql(b, clauses.limit()),
            SqlFragment::Offset => esg.offset_sql(b, clauses.offset()),
            SqlFragment::Lock => {
                if let Some(lock) = clauses.lock() {
                    if esg.allows(b, features.lock, SELECT, "FOR UPDATE/SHARE") {
                        lock_sql(esg, b, lock);
                    }
                }
            }
            SqlFragment::Returning => esg.returning_sql(b, SELECT, clauses.returning()),
            other => esg.unsupported_fragment(b, SELECT, other),
        }
    }
}

fn select_sql(esg: &ExpressionSqlGenerator, b: &mut SqlBuilder, clauses: &SelectClauses) {
    b.write_str("SELECT");
    if let Some(distinct) = clauses.distinct() {
        b.write_str(" DISTINCT");
        if !distinct.is_empty()
            && esg.allows(b, esg.options().features.distinct_on, SELECT, "DISTINCT ON")
        {
            b.write_str(" ON (");
            esg.comma_separated(b, distinct.columns());
            b.write_char(')');
        }
    }
    b.write_char(' ');
    if clauses.columns().is_empty() {
        b.write_char('*');
    } else {
        esg.comma_separated(b, clauses.columns().columns());
    }
}

fn join_sql(esg: &ExpressionSqlGenerator, b: &mut SqlBuilder, join: &JoinExpression) {
    b.write_char(' ');
    b.write_str(join.kind().as_sql());
    if join.is_lateral() && esg.allows(b, esg.options().features.lateral, SELECT, "LATERAL") {
        b.write_str(" LATERAL");
    }
    b.write_char(' ');
    esg.generate(b, join.table());

    match join.condition() {
        JoinCondition::On(list) if !list.is_empty() => {
            b.write_str(" ON ");
            esg.expression_list(b, list);
        }
        JoinCondition::Using(cols) if !cols.is_empty() => {
            b.write_str(" USING (");
            esg.comma_separated(b, cols.columns());
            b.write_char(')');
        }
        _ if join.kind().is_conditioned() => {
            b.set_error(SqlError::validation(format!(
                "{} requires an ON or USING condition",
                join.kind().as_sql()
            )));
        }
        _ => {}
    }
}

fn lock_sql(esg: &ExpressionSqlGenerator, b: &mut SqlBuilder, lock: &Lock) {
    b.write_char(' ');
    b.write_str(lock.strength().as_sql());
    if !lock.tables().is_empty() {
        b.write_str(" OF ");
        for (i, table) in lock.tables().iter().enumerate() {
            if i > 0 {
                b.write_str(", ");
            }
            esg.identifier(b, table);
        }
    }
    match lock.wait() {
        LockWait::Wait => {}
        LockWait::NoWait => {
            b.write_str(" NOWAIT");
        }
        LockWait::SkipLocked => {
            b.write_str(" SKIP LOCKED");
        }
    }
}
