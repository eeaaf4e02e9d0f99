//! Dialect rendering options.
//!
//! Every knob the generators consult lives here. The struct is `serde`
//! (de)serialisable with `#[serde(default)]`, so a TOML override only needs to
//! name the fields it changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Policy for a clause feature on one dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSupport {
    /// Rendered normally.
    #[default]
    Supported,
    /// Silently dropped from the output.
    Omit,
    /// Rendering fails with [`SqlError::Unsupported`](crate::SqlError::Unsupported).
    Reject,
}

/// Per-feature policies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectFeatures {
    pub returning: FeatureSupport,
    pub distinct_on: FeatureSupport,
    pub with_cte: FeatureSupport,
    pub with_cte_recursive: FeatureSupport,
    pub lateral: FeatureSupport,
    pub lock: FeatureSupport,
    pub nulls_ordering: FeatureSupport,
    pub order_by_on_update: FeatureSupport,
    pub limit_on_update: FeatureSupport,
    pub order_by_on_delete: FeatureSupport,
    pub limit_on_delete: FeatureSupport,
    pub update_from: FeatureSupport,
    /// `Omit` is treated as `Reject`: dropping rows is never silent.
    pub multi_row_insert: FeatureSupport,
    pub conflict_target: FeatureSupport,
    pub conflict_update_where: FeatureSupport,
    pub truncate_cascade: FeatureSupport,
    pub truncate_identity: FeatureSupport,
    /// More than one table in TRUNCATE. `Omit` is treated as `Reject`.
    pub multi_table_truncate: FeatureSupport,
}

/// Spelling of interpolated byte strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BytesLiteral {
    /// `X'00ff'`
    #[default]
    Hex,
    /// `'\x00ff'` (PostgreSQL bytea escape input)
    Escape,
}

/// Placeholder spelling for prepared statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", content = "prefix", rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// The prefix alone, e.g. `?`.
    Positional(String),
    /// Prefix and 1-based position, e.g. `$1`.
    Numbered(String),
    /// Prefix, `p` and 1-based position, e.g. `:p1`.
    Named(String),
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        PlaceholderStyle::Positional("?".to_string())
    }
}

impl PlaceholderStyle {
    /// Render the placeholder for the 1-based argument position `n`.
    pub fn render(&self, n: usize) -> String {
        match self {
            PlaceholderStyle::Positional(prefix) => prefix.clone(),
            PlaceholderStyle::Numbered(prefix) => format!("{prefix}{n}"),
            PlaceholderStyle::Named(prefix) => format!("{prefix}p{n}"),
        }
    }
}

/// A clause slot in a statement's rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlFragment {
    CommonTable,
    Select,
    From,
    Join,
    Where,
    GroupBy,
    Having,
    Compounds,
    Order,
    Limit,
    Offset,
    Lock,
    UpdateBegin,
    Set,
    UpdateFrom,
    InsertBegin,
    Insert,
    Conflict,
    DeleteBegin,
    Truncate,
    Returning,
}

/// Rendering rules of one dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectOptions {
    /// Identifier quote; doubled when it occurs inside a segment.
    pub quote_char: char,
    /// String literal quote for interpolated values; doubled inside strings.
    pub string_quote: char,
    /// Also escape `\` as `\\` in interpolated strings.
    pub escape_backslash: bool,
    pub placeholder: PlaceholderStyle,
    /// With [`PlaceholderStyle::Named`], equal values share one placeholder.
    pub reuse_named_placeholders: bool,
    pub true_literal: String,
    pub false_literal: String,
    /// Right-hand side of `IS TRUE`; may differ from `true_literal` where a
    /// dialect spells boolean values as integers.
    pub is_true_literal: String,
    pub is_false_literal: String,
    pub null_literal: String,
    pub bytes_literal: BytesLiteral,
    /// `chrono` format for interpolated timestamps.
    pub time_format: String,
    /// `chrono` format for interpolated dates.
    pub date_format: String,

    pub insert_fragment: String,
    /// When set, DO NOTHING conflicts render with this keyword instead of a
    /// conflict clause, e.g. `INSERT IGNORE INTO`.
    pub insert_ignore_fragment: Option<String>,
    pub default_values_fragment: String,
    pub conflict_fragment: String,
    pub conflict_do_nothing_fragment: String,
    pub conflict_do_update_fragment: String,
    pub truncate_fragment: String,
    /// Wrap the right-hand side of UNION / INTERSECT in parentheses.
    pub wrap_compounds_in_parens: bool,

    /// Function name overrides, matched case-insensitively, e.g. `NOW` → `CURRENT_TIMESTAMP`.
    pub function_names: BTreeMap<String, String>,
    /// Operator overrides keyed by canonical spelling, e.g. `ILIKE` → `LIKE`.
    pub operators: BTreeMap<String, String>,

    pub features: DialectFeatures,

    pub select_order: Vec<SqlFragment>,
    pub update_order: Vec<SqlFragment>,
    pub insert_order: Vec<SqlFragment>,
    pub delete_order: Vec<SqlFragment>,
    pub truncate_order: Vec<SqlFragment>,
}

impl Default for DialectOptions {
    fn default() -> Self {
        use SqlFragment::*;

        Self {
            quote_char: '"',
            string_quote: '\'',
            escape_backslash: false,
            placeholder: PlaceholderStyle::default(),
            reuse_named_placeholders: false,
            true_literal: "TRUE".to_string(),
            false_literal: "FALSE".to_string(),
            is_true_literal: "TRUE".to_string(),
            is_false_literal: "FALSE".to_string(),
            null_literal: "NULL".to_string(),
            bytes_literal: BytesLiteral::Hex,
            time_format: "%Y-%m-%dT%H:%M:%S%.f%:z".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            insert_fragment: "INSERT INTO".to_string(),
            insert_ignore_fragment: None,
            default_values_fragment: "DEFAULT VALUES".to_string(),
            conflict_fragment: " ON CONFLICT".to_string(),
            conflict_do_nothing_fragment: " DO NOTHING".to_string(),
            conflict_do_update_fragment: " DO UPDATE SET ".to_string(),
            truncate_fragment: "TRUNCATE".to_string(),
            wrap_compounds_in_parens: true,
            function_names: BTreeMap::new(),
            operators: BTreeMap::new(),
            features: DialectFeatures::default(),
            select_order: vec![
                CommonTable, Select, From, Join, Where, GroupBy, Having, Compounds, Order, Limit,
                Offset, Lock, Returning,
            ],
            update_order: vec![
                CommonTable, UpdateBegin, Set, UpdateFrom, Where, Order, Limit, Returning,
            ],
            insert_order: vec![CommonTable, InsertBegin, Insert, Conflict, Returning],
            delete_order: vec![CommonTable, DeleteBegin, Where, Order, Limit, Returning],
            truncate_order: vec![Truncate],
        }
    }
}

impl DialectOptions {
    /// The rendered name of function `name`.
    pub fn function_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.function_names
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map_or(name, |(_, v)| v.as_str())
    }

    /// The rendered spelling of canonical operator `op`.
    pub fn operator<'a>(&'a self, op: &'a str) -> &'a str {
        self.operators
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(op))
            .map_or(op, |(_, v)| v.as_str())
    }
}
