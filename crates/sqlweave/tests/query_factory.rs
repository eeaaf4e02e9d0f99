use std::sync::Mutex;

use sqlweave::exp::{self, ExprExt};
use sqlweave::{DbExecutor, QueryFactory, Record, SqlError, SqlResult, Value, qb};

#[derive(Debug, Clone, Record)]
struct Job {
    #[record(db = ",skipinsert")]
    id: i64,
    queue: String,
    payload: serde_json::Value,
}

/// In-memory stand-in for a driver: remembers statements, returns one row per call.
#[derive(Default)]
struct Recorder {
    statements: Mutex<Vec<String>>,
}

impl DbExecutor for Recorder {
    type Row = Vec<Value>;

    async fn execute(&self, sql: &str, _args: &[Value]) -> SqlResult<u64> {
        self.statements.lock().unwrap().push(sql.to_string());
        Ok(1)
    }

    async fn query(&self, sql: &str, args: &[Value]) -> SqlResult<Vec<Self::Row>> {
        self.statements.lock().unwrap().push(sql.to_string());
        Ok(vec![args.to_vec()])
    }
}

#[tokio::test]
async fn test_insert_then_select() {
    let factory = QueryFactory::new("db", Recorder::default());
    let pg = qb::dialect("postgres");

    let job = Job {
        id: 0,
        queue: "mail".into(),
        payload: serde_json::json!({"to": "a@b.c"}),
    };
    let inserted = factory
        .from_qb(&pg.insert("jobs").records([job]).returning(["id"]))
        .query()
        .await
        .unwrap();
    assert_eq!(inserted[0][0], Value::Text("mail".into()));

    let rows = factory
        .from_qb(
            &pg.from(["jobs"])
                .where_([exp::col("queue").eq("mail")])
                .for_update(),
        )
        .query()
        .await
        .unwrap();
    assert_eq!(rows, vec![vec![Value::Text("mail".into())]]);

    let statements = factory.executor().statements.lock().unwrap().clone();
    assert_eq!(
        statements,
        vec![
            r#"INSERT INTO "jobs" ("queue", "payload") VALUES ($1, $2) RETURNING "id""#.to_string(),
            r#"SELECT * FROM "jobs" WHERE ("queue" = $1) FOR UPDATE"#.to_string(),
        ]
    );
}

#[tokio::test]
async fn test_rejected_feature_never_reaches_executor() {
    let factory = QueryFactory::new("db", Recorder::default());
    let err = factory
        .from_qb(&qb::dialect("sqlite3").from(["jobs"]).distinct_on(["queue"]))
        .query()
        .await
        .unwrap_err();
    assert!(matches!(err, SqlError::Unsupported { statement: "SELECT", .. }));
    assert!(factory.executor().statements.lock().unwrap().is_empty());
}
