//! Column maps: the interpreted view of a record type under one tag namespace.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use super::{FieldDef, FieldKind, FieldTag, FieldValue, Record, RecordType, parse_tag};
use crate::error::{SqlError, SqlResult};
use crate::exp::Expression;
use crate::value::Value;

/// One mapped column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnData {
    /// Column name; nested columns are prefixed with `<parent>.`.
    pub column: String,
    /// Dotted Rust field path, e.g. `address.street`.
    pub field_name: String,
    /// Index path into [`Record::field_values`].
    pub path: Vec<usize>,
    pub should_insert: bool,
    pub should_update: bool,
    pub default_if_empty: bool,
    pub omit_nil: bool,
    pub omit_empty: bool,
    /// Subquery alias from a `subquery=<alias>` option.
    pub subquery: Option<String>,
}

impl ColumnData {
    /// Expression used for this column in INSERT / UPDATE, or `None` when the
    /// column is omitted for this value.
    fn value_expression(&self, value: &Value) -> Option<Expression> {
        if self.omit_nil && value.is_null() {
            return None;
        }
        if value.is_empty() {
            if self.default_if_empty {
                return Some(Expression::Default);
            }
            if self.omit_empty {
                return None;
            }
        }
        Some(Expression::Value(value.clone()))
    }
}

/// Interpreted annotations of a record type, in field declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    record: &'static str,
    columns: Vec<ColumnData>,
    index: HashMap<String, usize>,
}

type CacheKey = (TypeId, String);

fn cache() -> &'static RwLock<HashMap<CacheKey, Arc<ColumnMap>>> {
    static CACHE: OnceLock<RwLock<HashMap<CacheKey, Arc<ColumnMap>>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

impl ColumnMap {
    /// The cached column map of `T` under `tag`.
    pub fn of<T: Record>(tag: &str) -> SqlResult<Arc<ColumnMap>> {
        Self::for_type(&RecordType::of::<T>(), tag)
    }

    pub(crate) fn for_type(rt: &RecordType, tag: &str) -> SqlResult<Arc<ColumnMap>> {
        let key = (rt.type_id(), tag.to_string());
        if let Some(map) = cache()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(map));
        }

        // Built outside the lock; a racing writer produces an identical map.
        let map = Arc::new(Self::build(rt, tag)?);
        let mut guard = cache().write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(guard.entry(key).or_insert(map)))
    }

    /// Build without consulting the cache.
    pub fn build(rt: &RecordType, tag: &str) -> SqlResult<ColumnMap> {
        let mut map = ColumnMap {
            record: rt.name(),
            columns: Vec::new(),
            index: HashMap::new(),
        };
        let scope = Scope {
            tag,
            column_prefix: String::new(),
            field_prefix: String::new(),
            path: Vec::new(),
            inherited: FieldTag::default(),
        };
        map.collect(&rt.fields(), &scope)?;
        Ok(map)
    }

    fn collect(&mut self, fields: &[FieldDef], scope: &Scope<'_>) -> SqlResult<()> {
        for (i, field) in fields.iter().enumerate() {
            let field_name = format!("{}{}", scope.field_prefix, field.name);
            let tag = match field.tag(scope.tag) {
                Some(raw) => parse_tag(&field_name, raw)?,
                None => FieldTag::default(),
            };
            if tag.skip {
                continue;
            }

            let column = tag.name.clone().unwrap_or_else(|| field.column.to_string());
            let mut path = scope.path.clone();
            path.push(i);
            let inherited = FieldTag {
                skip_insert: scope.inherited.skip_insert || tag.skip_insert,
                skip_update: scope.inherited.skip_update || tag.skip_update,
                ..FieldTag::default()
            };

            match field.kind {
                FieldKind::Value => self.push(ColumnData {
                    column: format!("{}{}", scope.column_prefix, column),
                    field_name,
                    path,
                    should_insert: !inherited.skip_insert,
                    should_update: !inherited.skip_update,
                    default_if_empty: tag.default_if_empty,
                    omit_nil: tag.omit_nil,
                    omit_empty: tag.omit_empty,
                    subquery: tag.subquery,
                })?,
                FieldKind::Flatten(inner) => self.collect(
                    &inner(),
                    &Scope {
                        tag: scope.tag,
                        column_prefix: scope.column_prefix.clone(),
                        field_prefix: format!("{field_name}."),
                        path,
                        inherited,
                    },
                )?,
                FieldKind::Nested(inner) => self.collect(
                    &inner(),
                    &Scope {
                        tag: scope.tag,
                        column_prefix: format!("{}{}.", scope.column_prefix, column),
                        field_prefix: format!("{field_name}."),
                        path,
                        inherited,
                    },
                )?,
            }
        }
        Ok(())
    }

    fn push(&mut self, data: ColumnData) -> SqlResult<()> {
        if self.index.contains_key(&data.column) {
            return Err(SqlError::DuplicateColumn {
                record: self.record.to_string(),
                column: data.column,
            });
        }
        self.index.insert(data.column.clone(), self.columns.len());
        self.columns.push(data);
        Ok(())
    }

    /// Rust type name of the mapped record.
    pub fn record_name(&self) -> &'static str {
        self.record
    }

    pub fn columns(&self) -> &[ColumnData] {
        &self.columns
    }

    pub fn get(&self, column: &str) -> Option<&ColumnData> {
        self.index.get(column).map(|&i| &self.columns[i])
    }

    /// Column names in order, plus column → subquery alias for annotated columns.
    pub fn cols(&self) -> (Vec<String>, HashMap<String, String>) {
        let names = self.columns.iter().map(|c| c.column.clone()).collect();
        let aliases = self
            .columns
            .iter()
            .filter_map(|c| c.subquery.clone().map(|alias| (c.column.clone(), alias)))
            .collect();
        (names, aliases)
    }

    /// Columns and values of one record for INSERT.
    ///
    /// Subquery columns have no stored value and are never inserted.
    pub fn insert_row(&self, values: &[FieldValue]) -> SqlResult<(Vec<String>, Vec<Expression>)> {
        let mut cols = Vec::new();
        let mut exprs = Vec::new();
        for data in self.columns.iter().filter(|c| c.should_insert && c.subquery.is_none()) {
            if let Some(expr) = self.value_of(data, values)? {
                cols.push(data.column.clone());
                exprs.push(expr);
            }
        }
        Ok((cols, exprs))
    }

    /// Column assignments of one record for UPDATE.
    pub fn update_assignments(&self, values: &[FieldValue]) -> SqlResult<Vec<(String, Expression)>> {
        let mut out = Vec::new();
        for data in self.columns.iter().filter(|c| c.should_update && c.subquery.is_none()) {
            if let Some(expr) = self.value_of(data, values)? {
                out.push((data.column.clone(), expr));
            }
        }
        Ok(out)
    }

    fn value_of(&self, data: &ColumnData, values: &[FieldValue]) -> SqlResult<Option<Expression>> {
        let value = FieldValue::lookup(values, &data.path).ok_or_else(|| {
            SqlError::validation(format!(
                "record '{}' has no value for field '{}'",
                self.record, data.field_name
            ))
        })?;
        Ok(data.value_expression(value))
    }
}

struct Scope<'a> {
    tag: &'a str,
    column_prefix: String,
    field_prefix: String,
    path: Vec<usize>,
    inherited: FieldTag,
}
