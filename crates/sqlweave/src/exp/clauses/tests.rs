use super::*;
use crate::exp::{self, ColumnList, ExprExt, InsertSource, TruncateIdentity};

#[test]
fn select_mutators_copy_on_write() {
    let base = SelectClauses::new().set_from(ColumnList::from_names(["users"]));
    let filtered = base.where_append([exp::col("id").eq(1)]);

    assert!(base.where_().is_empty());
    assert_eq!(filtered.where_().len(), 1);
    assert_eq!(filtered.from(), base.from());
}

#[test]
fn where_append_is_conjunctive() {
    let clauses = SelectClauses::new()
        .where_append([exp::col("a").eq(1)])
        .where_append([exp::col("b").eq(2)]);
    assert_eq!(clauses.where_().len(), 2);
    assert_eq!(clauses.clear_where().where_().len(), 0);
}

#[test]
fn slots_are_replaced_wholesale() {
    let clauses = SelectClauses::new()
        .set_columns(ColumnList::from_names(["a", "b"]))
        .set_columns(ColumnList::from_names(["c"]));
    assert_eq!(clauses.columns(), &ColumnList::from_names(["c"]));

    let appended = clauses.columns_append(ColumnList::from_names(["d"]));
    assert_eq!(appended.columns(), &ColumnList::from_names(["c", "d"]));
}

#[test]
fn order_prepend_goes_first() {
    let clauses = SelectClauses::new()
        .order_append([exp::col("b").asc()])
        .order_prepend([exp::col("a").desc()]);
    let first = clauses.order()[0].expression();
    assert_eq!(first, &exp::Expression::Identifier(exp::col("a")));
}

#[test]
fn insert_rows_append_merges_values() {
    let clauses = InsertClauses::new(exp::table("t"))
        .rows_append(vec![vec![exp::val(1)]])
        .rows_append(vec![vec![exp::val(2)]]);
    assert_eq!(clauses.source().map(InsertSource::row_count), Some(2));

    let replaced = clauses.set_source(InsertSource::DefaultValues);
    assert_eq!(replaced.rows_append(vec![vec![exp::val(3)]]).source().map(InsertSource::row_count), Some(1));
}

#[test]
fn truncate_options_roundtrip() {
    let clauses = TruncateClauses::new(ColumnList::from_names(["a"])).set_options(TruncateOptions {
        cascade: true,
        identity: Some(TruncateIdentity::Restart),
        ..TruncateOptions::default()
    });
    assert!(clauses.options().cascade);
    assert!(!clauses.options().restrict);
}

#[test]
fn subquery_keeps_clauses() {
    let inner = SelectClauses::new().set_from(ColumnList::from_names(["orders"]));
    let sub = Subquery::from(inner.clone());
    assert_eq!(sub.clauses(), &inner);
    assert!(sub.error().is_none());
}
