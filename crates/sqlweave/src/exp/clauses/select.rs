use super::Limit;
use crate::exp::{
    ColumnList, CommonTableExpression, CompoundExpression, ExpressionList, Identifier,
    IntoExpression, JoinExpression, Lock, OrderedExpression,
};

/// Slots of a SELECT statement.
///
/// An empty column list renders as `*`. `distinct` is `None` for no DISTINCT,
/// an empty list for plain `DISTINCT` and a non-empty list for `DISTINCT ON (...)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectClauses {
    ctes: Vec<CommonTableExpression>,
    distinct: Option<ColumnList>,
    columns: ColumnList,
    from: ColumnList,
    joins: Vec<JoinExpression>,
    where_: ExpressionList,
    group_by: ColumnList,
    having: ExpressionList,
    compounds: Vec<CompoundExpression>,
    order: Vec<OrderedExpression>,
    limit: Option<Limit>,
    offset: Option<u64>,
    lock: Option<Lock>,
    returning: ColumnList,
    alias: Option<Identifier>,
}

impl SelectClauses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctes(&self) -> &[CommonTableExpression] {
        &self.ctes
    }

    pub fn cte_append(&self, cte: CommonTableExpression) -> Self {
        let mut next = self.clone();
        next.ctes.push(cte);
        next
    }

    pub fn distinct(&self) -> Option<&ColumnList> {
        self.distinct.as_ref()
    }

    pub fn set_distinct(&self, distinct: Option<ColumnList>) -> Self {
        Self {
            distinct,
            ..self.clone()
        }
    }

    pub fn columns(&self) -> &ColumnList {
        &self.columns
    }

    pub fn set_columns(&self, columns: ColumnList) -> Self {
        Self {
            columns,
            ..self.clone()
        }
    }

    pub fn columns_append(&self, columns: ColumnList) -> Self {
        Self {
            columns: self.columns.append([columns]),
            ..self.clone()
        }
    }

    pub fn from(&self) -> &ColumnList {
        &self.from
    }

    pub fn set_from(&self, from: ColumnList) -> Self {
        Self {
            from,
            ..self.clone()
        }
    }

    pub fn joins(&self) -> &[JoinExpression] {
        &self.joins
    }

    pub fn joins_append(&self, join: JoinExpression) -> Self {
        let mut next = self.clone();
        next.joins.push(join);
        next
    }

    pub fn where_(&self) -> &ExpressionList {
        &self.where_
    }

    /// Conjunctively appends predicates to WHERE.
    pub fn where_append<I, E>(&self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        Self {
            where_: self.where_.append(exprs),
            ..self.clone()
        }
    }

    pub fn clear_where(&self) -> Self {
        Self {
            where_: ExpressionList::default(),
            ..self.clone()
        }
    }

    pub fn group_by(&self) -> &ColumnList {
        &self.group_by
    }

    pub fn set_group_by(&self, group_by: ColumnList) -> Self {
        Self {
            group_by,
            ..self.clone()
        }
    }

    pub fn having(&self) -> &ExpressionList {
        &self.having
    }

    /// Conjunctively appends predicates to HAVING.
    pub fn having_append<I, E>(&self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoExpression,
    {
        Self {
            having: self.having.append(exprs),
            ..self.clone()
        }
    }

    pub fn compounds(&self) -> &[CompoundExpression] {
        &self.compounds
    }

    pub fn compounds_append(&self, compound: CompoundExpression) -> Self {
        let mut next = self.clone();
        next.compounds.push(compound);
        next
    }

    pub fn order(&self) -> &[OrderedExpression] {
        &self.order
    }

    pub fn set_order(&self, order: Vec<OrderedExpression>) -> Self {
        Self {
            order,
            ..self.clone()
        }
    }

    pub fn order_append(&self, order: impl IntoIterator<Item = OrderedExpression>) -> Self {
        let mut next = self.clone();
        next.order.extend(order);
        next
    }

    /// Inserts ordering terms ahead of the existing ones.
    pub fn order_prepend(&self, order: impl IntoIterator<Item = OrderedExpression>) -> Self {
        let mut merged: Vec<OrderedExpression> = order.into_iter().collect();
        merged.extend(self.order.iter().cloned());
        self.set_order(merged)
    }

    pub fn limit(&self) -> Option<Limit> {
        self.limit
    }

    pub fn set_limit(&self, limit: Option<Limit>) -> Self {
        Self {
            limit,
            ..self.clone()
        }
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn set_offset(&self, offset: Option<u64>) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }

    pub fn lock(&self) -> Option<&Lock> {
        self.lock.as_ref()
    }

    pub fn set_lock(&self, lock: Option<Lock>) -> Self {
        Self {
            lock,
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

    /// Alias used when this SELECT is rendered as a subquery.
    pub fn alias(&self) -> Option<&Identifier> {
        self.alias.as_ref()
    }

    pub fn set_alias(&self, alias: Option<Identifier>) -> Self {
        Self {
            alias,
            ..self.clone()
        }
    }
}
