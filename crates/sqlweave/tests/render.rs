use sqlweave::dialect::{
    self, DialectOptions, DialectRegistry, PlaceholderStyle, get_dialect_with_tag,
};
use sqlweave::exp::{self, ColumnList, ExprExt, SelectClauses};
use sqlweave::mapper::RecordType;
use sqlweave::qb::{self, QueryBuilder};
use sqlweave::{IntoExpression, Record, SqlBuilder, SqlDialect, SqlQb, Value};

#[derive(Debug, Clone, Record)]
#[allow(non_snake_case)]
struct Person {
    ID: i64,
    #[record(col = "full_name")]
    Name: String,
}

fn render_columns(dialect: &SqlDialect, columns: ColumnList) -> String {
    let mut b = SqlBuilder::new(true);
    let clauses = SelectClauses::new()
        .set_columns(columns)
        .set_from(ColumnList::from_names(["t"]));
    dialect.to_select_sql(&mut b, &clauses);
    b.finish().unwrap().0
}

/// Placeholder numbers in order of appearance.
fn placeholder_numbers(sql: &str, prefix: char) -> Vec<usize> {
    let mut out = Vec::new();
    let mut chars = sql.chars().peekable();
    while let Some(c) = chars.next() {
        if c != prefix {
            continue;
        }
        let mut digits = String::new();
        while let Some(d) = chars.peek().filter(|d| d.is_ascii_digit()) {
            digits.push(*d);
            chars.next();
        }
        if let Ok(n) = digits.parse() {
            out.push(n);
        }
    }
    out
}

#[test]
fn test_custom_dialect_scenario() {
    dialect::register_dialect(
        "custom",
        "db",
        DialectOptions {
            quote_char: '`',
            placeholder: PlaceholderStyle::Numbered("$".to_string()),
            ..DialectOptions::default()
        },
    );
    let (sql, args) = qb::dialect("custom")
        .from(["users"])
        .select(["id", "name"])
        .where_([exp::col("id").eq(5)])
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT `id`, `name` FROM `users` WHERE (`id` = $1)");
    assert_eq!(args, vec![Value::Int(5)]);
}

#[test]
fn test_tagged_record_columns() {
    let d = get_dialect_with_tag("unregistered_col_dialect", "col");
    let columns = ColumnList::new(&Default::default(), d.tag(), [RecordType::of::<Person>()]).unwrap();
    assert_eq!(render_columns(&d, columns), r#"SELECT "id", "full_name" FROM "t""#);
}

#[test]
fn test_record_mapping_is_deterministic() {
    let build = || {
        QueryBuilder::new(dialect::register_dialect("postgres_col", "col", dialect::postgres()))
            .insert("people")
            .records([Person {
                ID: 1,
                Name: "a".into(),
            }])
            .to_sql()
            .unwrap()
    };
    let first = build();
    assert_eq!(first, build());
    assert_eq!(
        first.0,
        r#"INSERT INTO "people" ("id", "full_name") VALUES ($1, $2)"#
    );
}

#[test]
fn test_append_is_associative() {
    let d = dialect::get_dialect("default");
    let base = ColumnList::from_names(["a"]);
    let stepwise = base.append([exp::col("b")]).append([exp::col("c")]);
    let together = base.append([exp::col("b"), exp::col("c")]);
    assert_eq!(render_columns(&d, stepwise), render_columns(&d, together));
}

#[test]
fn test_empty_append_is_noop() {
    let d = dialect::get_dialect("default");
    let base = ColumnList::from_names(["a", "b"]);
    let appended = base.append(Vec::<exp::Expression>::new());
    assert_eq!(appended, base);
    assert_eq!(render_columns(&d, appended), render_columns(&d, base));
}

#[test]
fn test_keyword_only_for_present_clauses() {
    let bare = qb::dialect("postgres").from(["t"]).to_sql().unwrap().0;
    assert_eq!(bare, r#"SELECT * FROM "t""#);

    let full = qb::dialect("postgres")
        .from(["t"])
        .where_([exp::col("a").eq(1)])
        .group_by(["a"])
        .having([exp::count_star().gt(1)])
        .order([exp::col("a").asc()])
        .limit(1)
        .offset(1)
        .to_sql()
        .unwrap()
        .0;
    for keyword in ["WHERE", "GROUP BY", "HAVING", "ORDER BY", "LIMIT", "OFFSET"] {
        assert!(!bare.contains(keyword));
        assert_eq!(full.matches(keyword).count(), 1, "{keyword} in {full}");
    }
}

#[test]
fn test_numbered_placeholders_follow_arguments() {
    let inner = qb::dialect("postgres")
        .from(["orders"])
        .select(["user_id"])
        .where_([exp::col("total").gt(3)]);
    let (sql, args) = qb::dialect("postgres")
        .from(["users"])
        .where_([
            exp::col("a").eq(1),
            exp::literal("b > ? AND c < ?", [2, 2]).into_expression(),
            exp::col("id").is_in(inner),
        ])
        .limit(4)
        .offset(5)
        .to_sql()
        .unwrap();
    let numbers = placeholder_numbers(&sql, '$');
    assert_eq!(numbers, (1..=args.len()).collect::<Vec<_>>());
    assert_eq!(
        args,
        vec![
            Value::Int(1),
            Value::Int(2),
            Value::Int(2),
            Value::Int(3),
            Value::Int(4),
            Value::Int(5)
        ]
    );

    let (sql, args) = qb::dialect("postgres")
        .update("t")
        .set("a", 10)
        .set("b", exp::literal("b + ?", [20]))
        .where_([exp::col("c").eq(30)])
        .returning(["a"])
        .to_sql()
        .unwrap();
    assert_eq!(placeholder_numbers(&sql, '$'), vec![1, 2, 3]);
    assert_eq!(args, vec![Value::Int(10), Value::Int(20), Value::Int(30)]);
}

#[test]
fn test_registry_round_trip_changes_only_overrides() {
    let registry = DialectRegistry::new();
    registry.register(
        "quoted",
        "db",
        DialectOptions {
            quote_char: '`',
            ..DialectOptions::default()
        },
    );
    let build = |d| {
        QueryBuilder::new(d)
            .from(["users"])
            .where_([exp::col("name").eq("x")])
            .limit(2)
            .to_sql()
            .unwrap()
    };
    let (custom, custom_args) = build(registry.get("quoted"));
    let (default, default_args) = build(registry.get("default"));
    assert_eq!(custom, default.replace('"', "`"));
    assert_eq!(custom_args, default_args);
}

#[test]
fn test_unknown_dialect_matches_default() {
    let query = |name: &str| {
        qb::dialect(name)
            .from(["users"])
            .select(["id"])
            .where_([exp::col("id").is_in(vec![1, 2])])
            .to_sql()
            .unwrap()
    };
    assert_eq!(query("definitely_not_registered"), query("default"));
}
