//! Built-in dialect presets.

use super::options::{BytesLiteral, DialectOptions, FeatureSupport, PlaceholderStyle};
use super::registry::DialectRegistry;

/// PostgreSQL: `"` quoting, `$N` placeholders, no ORDER BY / LIMIT on UPDATE or DELETE.
pub fn postgres() -> DialectOptions {
    let mut opts = DialectOptions {
        placeholder: PlaceholderStyle::Numbered("$".to_string()),
        bytes_literal: BytesLiteral::Escape,
        ..DialectOptions::default()
    };
    opts.features.order_by_on_update = FeatureSupport::Omit;
    opts.features.limit_on_update = FeatureSupport::Omit;
    opts.features.order_by_on_delete = FeatureSupport::Omit;
    opts.features.limit_on_delete = FeatureSupport::Omit;
    opts
}

/// MySQL: backtick quoting, `?` placeholders, `INSERT IGNORE`, `ON DUPLICATE KEY UPDATE`.
pub fn mysql() -> DialectOptions {
    let mut opts = DialectOptions {
        quote_char: '`',
        escape_backslash: true,
        true_literal: "1".to_string(),
        false_literal: "0".to_string(),
        time_format: "%Y-%m-%d %H:%M:%S%.f".to_string(),
        insert_ignore_fragment: Some("INSERT IGNORE INTO".to_string()),
        conflict_fragment: " ON DUPLICATE KEY".to_string(),
        conflict_do_nothing_fragment: String::new(),
        conflict_do_update_fragment: " UPDATE ".to_string(),
        ..DialectOptions::default()
    };
    opts.operators = [
        ("ILIKE", "LIKE"),
        ("NOT ILIKE", "NOT LIKE"),
        ("~", "REGEXP BINARY"),
        ("!~", "NOT REGEXP BINARY"),
        ("~*", "REGEXP"),
        ("!~*", "NOT REGEXP"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    opts.features.returning = FeatureSupport::Reject;
    opts.features.distinct_on = FeatureSupport::Reject;
    opts.features.nulls_ordering = FeatureSupport::Omit;
    opts.features.update_from = FeatureSupport::Reject;
    opts.features.conflict_target = FeatureSupport::Omit;
    opts.features.conflict_update_where = FeatureSupport::Reject;
    opts.features.truncate_identity = FeatureSupport::Omit;
    opts.features.truncate_cascade = FeatureSupport::Omit;
    opts
}

/// SQLite: backtick quoting, `?` placeholders, TRUNCATE as `DELETE FROM`.
pub fn sqlite3() -> DialectOptions {
    let mut opts = DialectOptions {
        quote_char: '`',
        true_literal: "1".to_string(),
        false_literal: "0".to_string(),
        time_format: "%Y-%m-%d %H:%M:%S%.f".to_string(),
        insert_ignore_fragment: Some("INSERT OR IGNORE INTO".to_string()),
        truncate_fragment: "DELETE FROM".to_string(),
        wrap_compounds_in_parens: false,
        ..DialectOptions::default()
    };
    opts.operators = [
        ("ILIKE", "LIKE"),
        ("NOT ILIKE", "NOT LIKE"),
        ("~", "REGEXP"),
        ("!~", "NOT REGEXP"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    opts.features.returning = FeatureSupport::Reject;
    opts.features.distinct_on = FeatureSupport::Reject;
    opts.features.lateral = FeatureSupport::Reject;
    opts.features.lock = FeatureSupport::Omit;
    opts.features.update_from = FeatureSupport::Reject;
    opts.features.conflict_update_where = FeatureSupport::Reject;
    opts.features.truncate_cascade = FeatureSupport::Omit;
    opts.features.truncate_identity = FeatureSupport::Omit;
    opts.features.multi_table_truncate = FeatureSupport::Reject;
    opts
}

/// A preset by name (`postgres`, `mysql`, `sqlite3`, `default`), case-insensitive.
pub fn preset(name: &str) -> Option<DialectOptions> {
    match name.to_ascii_lowercase().as_str() {
        "postgres" => Some(postgres()),
        "mysql" => Some(mysql()),
        "sqlite3" => Some(sqlite3()),
        "default" => Some(DialectOptions::default()),
        _ => None,
    }
}

/// Register `postgres`, `mysql` and `sqlite3` under tag `db`.
pub fn register_builtin_dialects(registry: &DialectRegistry) {
    registry.register("postgres", "db", postgres());
    registry.register("mysql", "db", mysql());
    registry.register("sqlite3", "db", sqlite3());
}
