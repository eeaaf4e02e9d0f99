use std::sync::Mutex;

use super::*;
use crate::error::SqlError;
use crate::exp::{self, ExprExt};
use crate::qb;

/// Records every call and answers with canned results.
#[derive(Default)]
struct MockExecutor {
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl MockExecutor {
    fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl DbExecutor for MockExecutor {
    type Row = Vec<Value>;

    async fn execute(&self, sql: &str, args: &[Value]) -> SqlResult<u64> {
        self.calls.lock().unwrap().push((sql.to_string(), args.to_vec()));
        Ok(args.len() as u64)
    }

    async fn query(&self, sql: &str, args: &[Value]) -> SqlResult<Vec<Self::Row>> {
        self.calls.lock().unwrap().push((sql.to_string(), args.to_vec()));
        if sql.contains("missing") {
            return Err(SqlError::execution("relation does not exist"));
        }
        Ok(vec![args.to_vec(), vec![Value::Null]])
    }
}

#[tokio::test]
async fn test_from_sql_query() {
    let factory = QueryFactory::new("db", MockExecutor::default());
    let rows = factory
        .from_sql("SELECT * FROM users WHERE id = $1", vec![Value::Int(1)])
        .query()
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec![Value::Int(1)]);
    assert_eq!(
        factory.executor().calls(),
        vec![("SELECT * FROM users WHERE id = $1".to_string(), vec![Value::Int(1)])]
    );
}

#[tokio::test]
async fn test_from_qb_exec() {
    let factory = QueryFactory::new("db", MockExecutor::default());
    let update = qb::dialect("postgres")
        .update("users")
        .set("active", false)
        .where_([exp::col("id").eq(9)]);

    let affected = factory.from_qb(&update).exec().await.unwrap();
    assert_eq!(affected, 2);

    let calls = factory.executor().calls();
    assert_eq!(calls[0].0, r#"UPDATE "users" SET "active"=$1 WHERE ("id" = $2)"#);
    assert_eq!(calls[0].1, vec![Value::Bool(false), Value::Int(9)]);
}

#[tokio::test]
async fn test_render_error_is_deferred() {
    let factory = QueryFactory::new("db", MockExecutor::default());
    let broken = qb::dialect("mysql")
        .delete("users")
        .returning(["id"]);

    let executor = factory.from_qb(&broken);
    let expected = SqlError::unsupported("mysql", "DELETE", "RETURNING");
    assert_eq!(executor.to_sql().unwrap_err(), expected);
    assert_eq!(executor.exec().await.unwrap_err(), expected);
    assert_eq!(executor.query().await.unwrap_err(), expected);
    assert!(factory.executor().calls().is_empty());
}

#[tokio::test]
async fn test_from_builder() {
    let factory = QueryFactory::new("db", MockExecutor::default());

    let mut b = SqlBuilder::new(true);
    b.write_str("DELETE FROM t");
    let (sql, args) = factory.from_builder(b).to_sql().unwrap();
    assert_eq!(sql, "DELETE FROM t");
    assert!(args.is_empty());

    let mut failed = SqlBuilder::new(true);
    failed.write_str("SELECT");
    failed.set_error(SqlError::validation("nope"));
    let err = factory.from_builder(failed).exec().await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_executor_error_passes_through() {
    let factory = QueryFactory::new("db", MockExecutor::default());
    let err = factory
        .from_sql("SELECT * FROM missing", Vec::new())
        .query()
        .await
        .unwrap_err();
    assert_eq!(err, SqlError::execution("relation does not exist"));
}

#[tokio::test]
async fn test_query_opt_and_borrowed_executor() {
    let mock = MockExecutor::default();
    let factory = QueryFactory::new("db", &mock);
    let first = factory
        .from_sql("SELECT 1", vec![Value::Int(1)])
        .query_opt()
        .await
        .unwrap();
    assert_eq!(first, Some(vec![Value::Int(1)]));
    assert_eq!(factory.tag(), "db");
    assert_eq!(mock.calls().len(), 1);
}
