use super::Limit;
use crate::exp::{
    ColumnList, CommonTableExpression, Expression, ExpressionList, IntoExpression,
    OrderedExpression, UpdateSource,
};

/// Slots of an UPDATE statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateClauses {
    ctes: Vec<CommonTableExpression>,
    table: Option<Expression>,
    set: Option<UpdateSource>,
    from: ColumnList,
    where_: ExpressionList,
    order: Vec<OrderedExpression>,
    limit: Option<Limit>,
    returning: ColumnList,
}

impl UpdateClauses {
    pub fn new(table: impl IntoExpression) -> Self {
        Self {
            table: Some(table.into_expression()),
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
        self.table.as_ref()
    }

    pub fn set_table(&self, table: impl IntoExpression) -> Self {
        Self {
            table: Some(table.into_expression()),
            ..self.clone()
        }
    }

    pub fn values(&self) -> Option<&UpdateSource> {
        self.set.as_ref()
    }

    pub fn set_values(&self, set: UpdateSource) -> Self {
        Self {
            set: Some(set),
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

    pub fn where_(&self) -> &ExpressionList {
        &self.where_
    }

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

    pub fn limit(&self) -> Option<Limit> {
        self.limit
    }

    pub fn set_limit(&self, limit: Option<Limit>) -> Self {
        Self {
            limit,
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
