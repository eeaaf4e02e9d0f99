//! Clause writers shared by several statement kinds.

use super::builder::SqlBuilder;
use super::expr::ExpressionSqlGenerator;
use crate::error::SqlError;
use crate::exp::{
    ColumnList, CommonTableExpression, ExpressionList, Limit, OrderedExpression, UpdateExpression,
};
use crate::value::Value;

impl ExpressionSqlGenerator {
    /// `WITH [RECURSIVE] a AS (...), b AS (...) ` including the trailing space.
    pub(crate) fn ctes_sql(
        &self,
        b: &mut SqlBuilder,
        statement: &'static str,
        ctes: &[CommonTableExpression],
    ) {
        if ctes.is_empty() || !self.allows(b, self.options().features.with_cte, statement, "WITH") {
            return;
        }
        let recursive = ctes.iter().any(CommonTableExpression::is_recursive);
        if recursive
            && !self.allows(
                b,
                self.options().features.with_cte_recursive,
                statement,
                "WITH RECURSIVE",
            )
        {
            return;
        }

        b.write_str(if recursive { "WITH RECURSIVE " } else { "WITH " });
        for (i, cte) in ctes.iter().enumerate() {
            if i > 0 {
                b.write_str(", ");
            }
            b.write_str(cte.name());
            b.write_str(" AS ");
            self.subquery(b, cte.subquery());
        }
        b.write_char(' ');
    }

    /// ` WHERE ...`
    pub(crate) fn where_sql(&self, b: &mut SqlBuilder, list: &ExpressionList) {
        if !list.is_empty() {
            b.write_str(" WHERE ");
            self.expression_list(b, list);
        }
    }

    /// ` ORDER BY a ASC, b DESC`
    pub(crate) fn order_sql(
        &self,
        b: &mut SqlBuilder,
        statement: &'static str,
        order: &[OrderedExpression],
    ) {
        if order.is_empty() {
            return;
        }
        b.write_str(" ORDER BY ");
        for (i, o) in order.iter().enumerate() {
            if i > 0 {
                b.write_str(", ");
            }
            self.ordered(b, o, statement);
        }
    }

    /// ` LIMIT n`; the count is an ordinary argument in prepared mode.
    pub(crate) fn limit_sql(&self, b: &mut SqlBuilder, limit: Option<Limit>) {
        match limit {
            None => {}
            Some(Limit::All) => {
                b.write_str(" LIMIT ALL");
            }
            Some(Limit::Count(n)) => {
                b.write_str(" LIMIT ");
                self.value(b, &count_value(n));
            }
        }
    }

    /// ` OFFSET n`
    pub(crate) fn offset_sql(&self, b: &mut SqlBuilder, offset: Option<u64>) {
        if let Some(n) = offset {
            b.write_str(" OFFSET ");
            self.value(b, &count_value(n));
        }
    }

    /// ` RETURNING a, b`
    pub(crate) fn returning_sql(
        &self,
        b: &mut SqlBuilder,
        statement: &'static str,
        returning: &ColumnList,
    ) {
        if returning.is_empty()
            || !self.allows(b, self.options().features.returning, statement, "RETURNING")
        {
            return;
        }
        b.write_str(" RETURNING ");
        self.comma_separated(b, returning.columns());
    }

    /// `"a"=$1,"b"=$2`
    pub(crate) fn assignments_sql(&self, b: &mut SqlBuilder, updates: &[UpdateExpression]) {
        for (i, update) in updates.iter().enumerate() {
            if i > 0 {
                b.write_char(',');
            }
            self.identifier(b, update.col());
            b.write_char('=');
            self.generate(b, update.value());
        }
    }

    /// Records an error for a fragment that does not belong to `statement`.
    pub(crate) fn unsupported_fragment(
        &self,
        b: &mut SqlBuilder,
        statement: &'static str,
        fragment: impl std::fmt::Debug,
    ) {
        b.set_error(SqlError::Fragment {
            statement,
            fragment: format!("{fragment:?}"),
        });
    }
}

fn count_value(n: u64) -> Value {
    i64::try_from(n).map_or(Value::UInt(n), Value::Int)
}
