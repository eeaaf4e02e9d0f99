//! Builder-level tests; rendering details are covered in `sqlgen`.

use super::*;
use crate::dialect::{DialectOptions, PlaceholderStyle, register_dialect};
use crate::exp::{self, ConflictExpression, ExprExt, JoinKind, UpdateSource};
use crate::mapper::{FieldDef, FieldValue, Record, RecordType};
use crate::value::Value;

struct User {
    id: i64,
    name: String,
    email: String,
}

impl Record for User {
    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::value("id", "id").with_tags(&[("db", ",skipinsert,skipupdate")]),
            FieldDef::value("name", "name").with_tags(&[("db", "full_name")]),
            FieldDef::value("email", "email"),
        ]
    }

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::of(self.id),
            FieldValue::of(self.name.clone()),
            FieldValue::of(self.email.clone()),
        ]
    }
}

struct Stats {
    user_id: i64,
    order_count: i64,
}

impl Record for Stats {
    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::value("user_id", "user_id"),
            FieldDef::value("order_count", "order_count").with_tags(&[("db", ",subquery=oc")]),
        ]
    }

    fn field_values(&self) -> Vec<FieldValue> {
        vec![FieldValue::of(self.user_id), FieldValue::of(self.order_count)]
    }
}

struct Broken;

impl Record for Broken {
    fn fields() -> Vec<FieldDef> {
        vec![FieldDef::value("x", "x").with_tags(&[("db", "x,sometimes")])]
    }

    fn field_values(&self) -> Vec<FieldValue> {
        vec![FieldValue::of(0)]
    }
}

fn user(id: i64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("{name}@example.com"),
    }
}

fn pg() -> QueryBuilder {
    dialect("postgres")
}

// ==================== SELECT ====================

#[test]
fn test_select_basic() {
    let (sql, args) = pg()
        .from(["users"])
        .select(["id", "name"])
        .where_([exp::col("id").eq(5)])
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT "id", "name" FROM "users" WHERE ("id" = $1)"#);
    assert_eq!(args, vec![Value::Int(5)]);
}

#[test]
fn test_registered_dialect_is_used() {
    register_dialect(
        "qb_tests_custom",
        "db",
        DialectOptions {
            quote_char: '`',
            placeholder: PlaceholderStyle::Numbered("$".to_string()),
            ..DialectOptions::default()
        },
    );
    let (sql, args) = dialect("qb_tests_custom")
        .from(["users"])
        .select(["id", "name"])
        .where_([exp::col("id").eq(5)])
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT `id`, `name` FROM `users` WHERE (`id` = $1)");
    assert_eq!(args, vec![Value::Int(5)]);
}

#[test]
fn test_unknown_dialect_uses_default() {
    let (sql, _) = dialect("no_such_dialect")
        .from(["users"])
        .where_([exp::col("id").eq(5)])
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "users" WHERE ("id" = ?)"#);
}

#[test]
fn test_select_record_columns() {
    let (sql, _) = pg()
        .from(["users"])
        .select([RecordType::of::<User>()])
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT "id", "full_name", "email" FROM "users""#);
}

#[test]
fn test_record_subquery_column() {
    let order_count = pg()
        .from(["orders"])
        .select([exp::count_star()])
        .where_([exp::ident("orders.user_id").eq(exp::ident("users.id"))]);

    let (sql, _) = pg()
        .from(["users"])
        .with_subquery("oc", order_count)
        .select([RecordType::of::<Stats>()])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT "user_id", (SELECT COUNT(*) FROM "orders" WHERE ("orders"."user_id" = "users"."id")) AS "order_count" FROM "users""#
    );
}

#[test]
fn test_record_subquery_column_replaces_own_alias() {
    let order_count = pg().from(["orders"]).select([exp::count_star()]).as_("total");

    let (sql, _) = pg()
        .from(["users"])
        .with_subquery("oc", order_count)
        .select([RecordType::of::<Stats>()])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT "user_id", (SELECT COUNT(*) FROM "orders") AS "order_count" FROM "users""#
    );
}

#[test]
fn test_build_error_is_deferred() {
    let qb = pg()
        .from(["users"])
        .select([RecordType::of::<Broken>()])
        .where_([exp::col("id").eq(1)])
        .limit(10);
    assert!(qb.build_error().is_some());
    assert!(qb.to_sql().unwrap_err().is_tag());
}

#[test]
fn test_first_error_wins() {
    let err = pg()
        .from(["users"])
        .cross_join(RecordType::of::<User>())
        .select([RecordType::of::<Broken>()])
        .to_sql()
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_subquery_carries_error() {
    let inner = pg().from(["orders"]).select([RecordType::of::<Broken>()]);
    let err = pg()
        .from(["users"])
        .where_([exp::col("id").is_in(inner)])
        .to_sql()
        .unwrap_err();
    assert!(err.is_tag());
}

#[test]
fn test_subquery_in_where() {
    let inner = pg()
        .from(["orders"])
        .select(["user_id"])
        .where_([exp::col("total").gt(100)]);
    let (sql, args) = pg()
        .from(["users"])
        .where_([exp::col("active").is_true(), exp::col("id").is_in(inner)])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "users" WHERE (("active" IS TRUE) AND ("id" IN (SELECT "user_id" FROM "orders" WHERE ("total" > $1))))"#
    );
    assert_eq!(args, vec![Value::Int(100)]);
}

#[test]
fn test_joins() {
    let (sql, _) = pg()
        .from(["users"])
        .inner_join("orders", [exp::ident("orders.user_id").eq(exp::ident("users.id"))])
        .join_using(JoinKind::Left, "profiles", ["user_id"])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "users" INNER JOIN "orders" ON ("orders"."user_id" = "users"."id") LEFT JOIN "profiles" USING ("user_id")"#
    );
}

#[test]
fn test_paginate() {
    let (sql, args) = pg().from(["users"]).paginate(3, 10).to_sql().unwrap();
    assert_eq!(sql, r#"SELECT * FROM "users" LIMIT $1 OFFSET $2"#);
    assert_eq!(args, vec![Value::Int(10), Value::Int(20)]);

    let (sql, _) = pg().from(["users"]).paginate(0, 10).to_sql().unwrap();
    assert_eq!(sql, r#"SELECT * FROM "users" LIMIT $1"#);
}

#[test]
fn test_paginate_offset_overflow() {
    let qb = pg().from(["users"]).paginate(u64::MAX, 2);
    assert!(qb.build_error().is_some());
    assert!(qb.to_sql().unwrap_err().is_validation());

    let (_, args) = pg().from(["users"]).paginate(u64::MAX, 1).to_sql().unwrap();
    assert_eq!(args, vec![Value::Int(1), Value::UInt(u64::MAX - 1)]);
}

#[test]
fn test_count() {
    let qb = pg()
        .from(["users"])
        .where_([exp::col("status").eq("active")])
        .order([exp::col("id").asc()])
        .limit(10);
    let (sql, _) = qb.count().to_sql().unwrap();
    assert_eq!(sql, r#"SELECT COUNT(*) FROM "users" WHERE ("status" = $1)"#);

    let grouped = pg().from(["orders"]).select(["user_id"]).group_by(["user_id"]);
    let (sql, _) = grouped.count().to_sql().unwrap();
    assert_eq!(
        sql,
        r#"SELECT COUNT(*) FROM (SELECT "user_id" FROM "orders" GROUP BY "user_id") AS "t""#
    );
}

#[test]
fn test_union() {
    let (sql, _) = pg()
        .from(["users"])
        .union(pg().from(["admins"]))
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "users" UNION (SELECT * FROM "admins")"#);
}

#[test]
fn test_with_cte() {
    let (sql, args) = pg()
        .from(["recent"])
        .with("recent", pg().from(["orders"]).where_([exp::col("age").lt(7)]))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"WITH recent AS (SELECT * FROM "orders" WHERE ("age" < $1)) SELECT * FROM "recent""#
    );
    assert_eq!(args.len(), 1);
}

#[test]
fn test_interpolated_mode() {
    let (sql, args) = pg()
        .prepared(false)
        .from(["users"])
        .where_([exp::col("name").eq("bob")])
        .limit(5)
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "users" WHERE ("name" = 'bob') LIMIT 5"#);
    assert!(args.is_empty());
}

#[test]
fn test_for_update() {
    let (sql, _) = pg().from(["jobs"]).for_update().to_sql().unwrap();
    assert_eq!(sql, r#"SELECT * FROM "jobs" FOR UPDATE"#);
}

// ==================== INSERT ====================

#[test]
fn test_insert_records() {
    let (sql, args) = pg()
        .insert("users")
        .records([user(1, "alice"), user(2, "bob")])
        .returning(["id"])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "users" ("full_name", "email") VALUES ($1, $2), ($3, $4) RETURNING "id""#
    );
    assert_eq!(args[0], Value::Text("alice".into()));
    assert_eq!(args[3], Value::Text("bob@example.com".into()));
}

#[test]
fn test_insert_vals() {
    let (sql, _) = pg()
        .insert("users")
        .cols(["name", "email"])
        .vals([exp::val("a"), exp::val("a@x.io")])
        .on_conflict_do_nothing()
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "users" ("name", "email") VALUES ($1, $2) ON CONFLICT DO NOTHING"#
    );
}

#[test]
fn test_insert_upsert() {
    let (sql, _) = pg()
        .insert("users")
        .cols(["id", "name"])
        .vals([exp::val(1), exp::val("a")])
        .on_conflict(ConflictExpression::do_update(
            "id",
            UpdateSource::pairs([("name", exp::raw("EXCLUDED.name"))]),
        ))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "users" ("id", "name") VALUES ($1, $2) ON CONFLICT (id) DO UPDATE SET "name"=EXCLUDED.name"#
    );
}

#[test]
fn test_insert_from_query() {
    let (sql, _) = pg()
        .insert("archive")
        .cols(["id"])
        .from_query(pg().from(["users"]).select(["id"]).where_([exp::col("active").is_false()]))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "archive" ("id") SELECT "id" FROM "users" WHERE ("active" IS FALSE)"#
    );
}

#[test]
fn test_insert_default_values() {
    let (sql, _) = pg().insert("counters").to_sql().unwrap();
    assert_eq!(sql, r#"INSERT INTO "counters" DEFAULT VALUES"#);
}

#[test]
fn test_insert_into_record_type_fails() {
    let err = pg().insert(RecordType::of::<User>()).to_sql().unwrap_err();
    assert!(err.is_validation());
}

// ==================== UPDATE / DELETE / TRUNCATE ====================

#[test]
fn test_update_set() {
    let (sql, args) = pg()
        .update("users")
        .set("status", "inactive")
        .set("score", 0)
        .where_([exp::col("id").eq(1)])
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"UPDATE "users" SET "status"=$1,"score"=$2 WHERE ("id" = $3)"#);
    assert_eq!(args.len(), 3);
}

#[test]
fn test_update_record() {
    let (sql, args) = pg()
        .update("users")
        .set_record(user(7, "carol"))
        .where_([exp::col("id").eq(7)])
        .returning(["id"])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"UPDATE "users" SET "full_name"=$1,"email"=$2 WHERE ("id" = $3) RETURNING "id""#
    );
    assert_eq!(
        args,
        vec![
            Value::Text("carol".into()),
            Value::Text("carol@example.com".into()),
            Value::Int(7)
        ]
    );
}

#[test]
fn test_update_without_set_fails() {
    let err = pg().update("users").where_([exp::col("id").eq(1)]).to_sql().unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_delete() {
    let (sql, _) = pg()
        .delete("users")
        .where_([exp::col("id").eq(1)])
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"DELETE FROM "users" WHERE ("id" = $1)"#);

    let (sql, _) = dialect("mysql")
        .delete("logs")
        .order([exp::col("id").asc()])
        .limit(100)
        .to_sql()
        .unwrap();
    assert_eq!(sql, "DELETE FROM `logs` ORDER BY `id` ASC LIMIT ?");
}

#[test]
fn test_truncate() {
    let (sql, args) = pg()
        .truncate(["a", "b"])
        .restart_identity()
        .cascade()
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"TRUNCATE "a", "b" RESTART IDENTITY CASCADE"#);
    assert!(args.is_empty());

    let (sql, _) = dialect("sqlite3").truncate(["a"]).to_sql().unwrap();
    assert_eq!(sql, "DELETE FROM `a`");

    let err = dialect("sqlite3").truncate(["a", "b"]).to_sql().unwrap_err();
    assert!(err.is_unsupported());
}

#[test]
fn test_free_functions_use_default_dialect() {
    assert_eq!(from("users").to_sql().unwrap().0, r#"SELECT * FROM "users""#);
    assert_eq!(
        delete("users").where_([exp::col("id").eq(1)]).to_sql().unwrap().0,
        r#"DELETE FROM "users" WHERE ("id" = ?)"#
    );
    assert_eq!(truncate("users").to_sql().unwrap().0, r#"TRUNCATE "users""#);
}
