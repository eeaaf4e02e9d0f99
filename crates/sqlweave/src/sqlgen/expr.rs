//! Expression rendering.

use std::sync::Arc;

use super::builder::SqlBuilder;
use super::select;
use crate::dialect::{BytesLiteral, DialectOptions, FeatureSupport, PlaceholderStyle};
use crate::error::SqlError;
use crate::exp::{
    AliasedExpression, BooleanExpression, BooleanOperation, CastExpression, Expression,
    ExpressionList, Identifier, Literal, NullsOrder, OrderedExpression, RangeExpression,
    SortDirection, SqlFunction, Subquery,
};
use crate::value::Value;

/// Renders expression nodes for one dialect.
///
/// Shared by all statement generators; the statement generators add clause
/// structure on top.
#[derive(Debug, Clone)]
pub struct ExpressionSqlGenerator {
    dialect: String,
    tag: String,
    options: Arc<DialectOptions>,
}

impl ExpressionSqlGenerator {
    pub fn new(dialect: &str, tag: &str, options: Arc<DialectOptions>) -> Self {
        Self {
            dialect: dialect.to_string(),
            tag: tag.to_string(),
            options,
        }
    }

    pub fn dialect(&self) -> &str {
        &self.dialect
    }

    /// Record tag used when records are mapped during rendering.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn options(&self) -> &DialectOptions {
        &self.options
    }

    /// Whether a feature is rendered; records an error when it is rejected.
    pub(crate) fn allows(
        &self,
        b: &mut SqlBuilder,
        support: FeatureSupport,
        statement: &'static str,
        feature: &str,
    ) -> bool {
        match support {
            FeatureSupport::Supported => true,
            FeatureSupport::Omit => false,
            FeatureSupport::Reject => {
                b.set_error(SqlError::unsupported(&self.dialect, statement, feature));
                false
            }
        }
    }

    /// Render any expression.
    pub fn generate(&self, b: &mut SqlBuilder, expr: &Expression) {
        match expr {
            Expression::Identifier(i) => self.identifier(b, i),
            Expression::Literal(l) => self.literal(b, l),
            Expression::Value(v) => self.value(b, v),
            Expression::Default => {
                b.write_str("DEFAULT");
            }
            Expression::Tuple(items) => self.tuple(b, items),
            Expression::Boolean(e) => self.boolean(b, e),
            Expression::Range(e) => self.range(b, e),
            Expression::List(list) => self.expression_list(b, list),
            Expression::Columns(cols) => self.comma_separated(b, cols.columns()),
            Expression::Ordered(o) => self.ordered(b, o, "expression"),
            Expression::Aliased(a) => self.aliased(b, a),
            Expression::Function(f) => self.function(b, f),
            Expression::Cast(c) => self.cast(b, c),
            Expression::Subquery(s) => self.subquery(b, s),
        }
    }

    /// `a, b, c`
    pub(crate) fn comma_separated(&self, b: &mut SqlBuilder, exprs: &[Expression]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                b.write_str(", ");
            }
            self.generate(b, expr);
        }
    }

    pub(crate) fn identifier(&self, b: &mut SqlBuilder, ident: &Identifier) {
        if ident.is_empty() {
            b.set_error(SqlError::validation("empty identifier"));
            return;
        }
        for (i, segment) in ident.segments().enumerate() {
            if i > 0 {
                b.write_char('.');
            }
            self.quote(b, segment);
        }
    }

    fn quote(&self, b: &mut SqlBuilder, segment: &str) {
        if segment == "*" {
            b.write_char('*');
            return;
        }
        let q = self.options.quote_char;
        b.write_char(q);
        for c in segment.chars() {
            if c == q {
                b.write_char(q);
            }
            b.write_char(c);
        }
        b.write_char(q);
    }

    fn literal(&self, b: &mut SqlBuilder, literal: &Literal) {
        let mut args = literal.args().iter();
        for c in literal.sql().chars() {
            if c == '?' {
                if let Some(arg) = args.next() {
                    self.generate(b, arg);
                    continue;
                }
            }
            b.write_char(c);
        }
    }

    /// A value: `NULL` inline, otherwise a placeholder or an inline literal.
    pub(crate) fn value(&self, b: &mut SqlBuilder, value: &Value) {
        if value.is_null() {
            b.write_str(&self.options.null_literal);
        } else if b.is_prepared() {
            self.placeholder(b, value);
        } else {
            self.interpolate(b, value);
        }
    }

    fn placeholder(&self, b: &mut SqlBuilder, value: &Value) {
        let reuse = self.options.reuse_named_placeholders
            && matches!(self.options.placeholder, PlaceholderStyle::Named(_));
        let n = match reuse.then(|| b.find_arg(value)).flatten() {
            Some(n) => n,
            None => b.push_arg(value.clone()),
        };
        b.write_str(&self.options.placeholder.render(n));
    }

    fn interpolate(&self, b: &mut SqlBuilder, value: &Value) {
        let opts = &self.options;
        match value {
            Value::Null => {
                b.write_str(&opts.null_literal);
            }
            Value::Bool(v) => self.bool_literal(b, *v),
            Value::Int(n) => {
                b.write_str(&n.to_string());
            }
            Value::UInt(n) => {
                b.write_str(&n.to_string());
            }
            Value::Float(f) => {
                b.write_str(&f.to_string());
            }
            Value::Text(s) => self.string_literal(b, s),
            Value::Bytes(bytes) => self.bytes_literal(b, bytes),
            Value::Timestamp(t) => self.string_literal(b, &t.format(&opts.time_format).to_string()),
            Value::Date(d) => self.string_literal(b, &d.format(&opts.date_format).to_string()),
            Value::Uuid(u) => self.string_literal(b, &u.to_string()),
            Value::Json(j) => self.string_literal(b, &j.to_string()),
        }
    }

    fn bool_literal(&self, b: &mut SqlBuilder, v: bool) {
        let opts = &self.options;
        b.write_str(if v { &opts.true_literal } else { &opts.false_literal });
    }

    /// Hex spelling, so arbitrary bytes survive without a text round trip.
    fn bytes_literal(&self, b: &mut SqlBuilder, bytes: &[u8]) {
        let q = self.options.string_quote;
        match self.options.bytes_literal {
            BytesLiteral::Hex => {
                b.write_char('X');
                b.write_char(q);
            }
            BytesLiteral::Escape => {
                b.write_char(q);
                b.write_str("\\x");
            }
        }
        for byte in bytes {
            b.write_str(&format!("{byte:02x}"));
        }
        b.write_char(q);
    }

    fn string_literal(&self, b: &mut SqlBuilder, s: &str) {
        let q = self.options.string_quote;
        b.write_char(q);
        for c in s.chars() {
            if c == q {
                b.write_char(q);
            } else if c == '\\' && self.options.escape_backslash {
                b.write_char('\\');
            }
            b.write_char(c);
        }
        b.write_char(q);
    }

    fn tuple(&self, b: &mut SqlBuilder, items: &[Expression]) {
        b.write_char('(');
        if items.is_empty() {
            b.write_str(&self.options.null_literal);
        } else {
            self.comma_separated(b, items);
        }
        b.write_char(')');
    }

    fn boolean(&self, b: &mut SqlBuilder, e: &BooleanExpression) {
        b.write_char('(');
        self.generate(b, e.lhs());
        b.write_char(' ');
        b.write_str(self.options.operator(e.op().as_sql()));
        b.write_char(' ');
        match (e.op(), e.rhs()) {
            (BooleanOperation::Is | BooleanOperation::IsNot, Expression::Value(Value::Bool(v))) => {
                let opts = &self.options;
                b.write_str(if *v { &opts.is_true_literal } else { &opts.is_false_literal });
            }
            (_, rhs) => self.generate(b, rhs),
        }
        b.write_char(')');
    }

    fn range(&self, b: &mut SqlBuilder, e: &RangeExpression) {
        b.write_char('(');
        self.generate(b, e.lhs());
        b.write_str(if e.is_negated() { " NOT BETWEEN " } else { " BETWEEN " });
        self.generate(b, e.start());
        b.write_str(" AND ");
        self.generate(b, e.end());
        b.write_char(')');
    }

    /// One member renders bare; two or more as `(a AND b)`.
    pub(crate) fn expression_list(&self, b: &mut SqlBuilder, list: &ExpressionList) {
        match list.expressions() {
            [] => {}
            [single] => self.generate(b, single),
            exprs => {
                b.write_char('(');
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        b.write_str(list.kind().as_sql());
                    }
                    self.generate(b, expr);
                }
                b.write_char(')');
            }
        }
    }

    pub(crate) fn ordered(&self, b: &mut SqlBuilder, o: &OrderedExpression, statement: &'static str) {
        self.generate(b, o.expression());
        b.write_str(match o.direction() {
            SortDirection::Asc => " ASC",
            SortDirection::Desc => " DESC",
        });
        let nulls = match o.nulls() {
            NullsOrder::Default => return,
            NullsOrder::First => " NULLS FIRST",
            NullsOrder::Last => " NULLS LAST",
        };
        if self.allows(b, self.options.features.nulls_ordering, statement, "NULLS FIRST/LAST") {
            b.write_str(nulls);
        }
    }

    fn aliased(&self, b: &mut SqlBuilder, a: &AliasedExpression) {
        self.generate(b, a.expression());
        b.write_str(" AS ");
        self.identifier(b, a.alias());
    }

    fn function(&self, b: &mut SqlBuilder, f: &SqlFunction) {
        b.write_str(self.options.function_name(f.name()));
        b.write_char('(');
        if f.is_distinct() {
            b.write_str("DISTINCT ");
        }
        self.comma_separated(b, f.args());
        b.write_char(')');
    }

    fn cast(&self, b: &mut SqlBuilder, c: &CastExpression) {
        b.write_str("CAST(");
        self.generate(b, c.expression());
        b.write_str(" AS ");
        b.write_str(c.target());
        b.write_char(')');
    }

    /// `(SELECT ...) [AS alias]`
    pub(crate) fn subquery(&self, b: &mut SqlBuilder, s: &Subquery) {
        if let Some(err) = s.error() {
            b.set_error(err.clone());
            return;
        }
        b.write_char('(');
        select::render(self, b, s.clauses());
        b.write_char(')');
        if let Some(alias) = s.clauses().alias() {
            b.write_str(" AS ");
            self.identifier(b, alias);
        }
    }
}
