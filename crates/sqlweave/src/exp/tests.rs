//! Unit tests for the expression model.

use super::*;
use crate::mapper::{FieldDef, FieldKind, FieldValue, Record};

struct Account {
    id: i64,
    name: String,
    order_count: i64,
}

impl Record for Account {
    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::value("id", "id"),
            FieldDef::value("name", "name").with_tags(&[("db", "full_name")]),
            FieldDef::value("order_count", "order_count")
                .with_tags(&[("db", ",subquery=orders")]),
        ]
    }

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::of(self.id),
            FieldValue::of(self.name.clone()),
            FieldValue::of(self.order_count),
        ]
    }
}

struct Owner {
    name: String,
}

impl Record for Owner {
    fn fields() -> Vec<FieldDef> {
        vec![FieldDef::value("name", "name")]
    }

    fn field_values(&self) -> Vec<FieldValue> {
        vec![FieldValue::of(self.name.clone())]
    }
}

struct Pet {
    id: i64,
    owner: Owner,
}

impl Record for Pet {
    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::value("id", "id"),
            FieldDef::value("owner", "owner").with_kind(FieldKind::Nested(Owner::fields)),
        ]
    }

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::of(self.id),
            FieldValue::Record(self.owner.field_values()),
        ]
    }
}

fn account() -> Account {
    Account {
        id: 1,
        name: "a".into(),
        order_count: 0,
    }
}

fn no_subqueries() -> SubqueryMap {
    SubqueryMap::new()
}

#[test]
fn test_column_list_dispatch_order() {
    let cols = ColumnList::new(
        &no_subqueries(),
        "db",
        [
            ColumnInput::Skip,
            ColumnInput::from("users.id"),
            ColumnInput::from(ColumnList::from_names(["a", "b"])),
            ColumnInput::from(count_star()),
            ColumnInput::from(None::<&str>),
        ],
    )
    .unwrap();

    assert_eq!(
        cols.columns(),
        &[
            Expression::Identifier(Identifier::parse("users.id")),
            Expression::Identifier(col("a")),
            Expression::Identifier(col("b")),
            count_star().into_expression(),
        ]
    );
}

#[test]
fn test_column_list_from_record() {
    let mut subqueries = no_subqueries();
    subqueries.insert("orders".into(), raw("(SELECT COUNT(*) FROM orders)").into_expression());
    let cols = ColumnList::new(&subqueries, "db", [&account()]).unwrap();

    assert_eq!(cols.len(), 3);
    assert_eq!(cols.columns()[0], Expression::Identifier(col("id")));
    assert_eq!(cols.columns()[1], Expression::Identifier(col("full_name")));
    assert_eq!(
        cols.columns()[2],
        AliasedExpression::new(raw("(SELECT COUNT(*) FROM orders)"), col("order_count"))
            .into_expression()
    );
}

#[test]
fn test_record_subquery_alias_is_replaced() {
    let inner = SelectClauses::new()
        .set_from(ColumnList::from_names(["orders"]))
        .set_alias(Some(col("total")));
    let mut subqueries = no_subqueries();
    subqueries.insert("orders".into(), inner.clone().into_expression());
    let cols = ColumnList::new(&subqueries, "db", [&account()]).unwrap();
    assert_eq!(
        cols.columns()[2],
        Expression::Subquery(Box::new(Subquery::new(inner.set_alias(Some(col("order_count"))))))
    );

    subqueries.insert("orders".into(), raw("(SELECT 1)").as_("total").into_expression());
    let cols = ColumnList::new(&subqueries, "db", [&account()]).unwrap();
    assert_eq!(
        cols.columns()[2],
        AliasedExpression::new(raw("(SELECT 1)"), col("order_count")).into_expression()
    );
}

#[test]
fn test_record_alias_without_subquery_is_deferred_value() {
    let cols = ColumnList::new(&no_subqueries(), "db", [&account()]).unwrap();
    assert_eq!(
        cols.columns()[2],
        AliasedExpression::new(raw("orders"), col("order_count")).into_expression()
    );
}

#[test]
fn test_nested_record_columns_are_aliased() {
    let pet = Pet {
        id: 1,
        owner: Owner { name: "x".into() },
    };
    let cols = ColumnList::new(&no_subqueries(), "db", [&pet]).unwrap();
    assert_eq!(
        cols.columns()[1],
        AliasedExpression::new(ident("owner.name"), Identifier::new("", "", "owner.name"))
            .into_expression()
    );
}

#[test]
fn test_append_does_not_mutate_receiver() {
    let base = ColumnList::from_names(["a"]);
    let extended = base.append([col("b")]);
    assert_eq!(base.len(), 1);
    assert_eq!(extended.len(), 2);
}

#[test]
fn test_append_is_associative() {
    let base = ColumnList::from_names(["a"]);
    let step = base.append([col("b")]).append([col("c")]);
    let once = base.append([col("b"), col("c")]);
    assert_eq!(step, once);
}

#[test]
fn test_append_empty_is_noop() {
    let base = ColumnList::from_names(["a", "b"]);
    assert_eq!(base.append(Vec::<Expression>::new()), base);
    assert_eq!(base.append([ColumnList::empty()]), base);
}

#[test]
fn test_from_ordered_unwraps() {
    let order = [col("a").asc(), col("b").desc()];
    let cols = ColumnList::from_ordered(&order);
    assert_eq!(cols, ColumnList::from_names(["a", "b"]));
}

#[test]
fn test_eq_null_becomes_is() {
    let e = col("deleted_at").eq(None::<i64>);
    match e {
        Expression::Boolean(b) => assert_eq!(b.op(), BooleanOperation::Is),
        other => panic!("unexpected {other:?}"),
    }
    let e = col("active").neq(true);
    match e {
        Expression::Boolean(b) => assert_eq!(b.op(), BooleanOperation::IsNot),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_and_drops_empty_members() {
    let list = and([col("a").eq(1).into_expression(), and(Vec::<Expression>::new()).into_expression()]);
    assert_eq!(list.len(), 1);
}

#[test]
fn test_or_append_stays_conjunctive() {
    let either = or([col("a").eq(1), col("b").eq(2)]);
    let both = either.append([col("c").eq(3)]);
    assert_eq!(both.kind(), ListKind::And);
    assert_eq!(both.len(), 2);
    assert_eq!(both.expressions()[0], Expression::List(either));
}

#[test]
fn test_identifier_set_builds_assignment() {
    let set = col("name").set("x");
    assert_eq!(set.col(), &col("name"));
    assert_eq!(set.value(), &Expression::Value(crate::value::Value::Text("x".into())));
}

#[test]
fn test_update_source_from_record() {
    let updates = UpdateSource::record(account()).assignments("db").unwrap();
    // subquery columns carry no stored value
    let cols: Vec<_> = updates.iter().map(|u| u.col().column_name().unwrap_or("")).collect();
    assert_eq!(cols, vec!["id", "full_name"]);
}

#[test]
fn test_conflict_where_only_on_update() {
    let nothing = ConflictExpression::do_nothing().where_([col("a").eq(1)]);
    assert!(nothing.is_do_nothing());

    let update = ConflictExpression::do_update("id", vec![col("n").set(1)]).where_([col("a").eq(1)]);
    match update.action() {
        ConflictAction::DoUpdate { where_, .. } => assert_eq!(where_.len(), 1),
        ConflictAction::DoNothing => panic!("expected DO UPDATE"),
    }
}
