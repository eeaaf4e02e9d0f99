use super::*;
use crate::error::SqlError;
use crate::exp::Expression;

struct Audit {
    created_by: String,
    updated_by: Option<String>,
}

impl Record for Audit {
    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::value("created_by", "created_by").with_tags(&[("db", ",skipupdate")]),
            FieldDef::value("updated_by", "updated_by").with_tags(&[("db", ",omitnil")]),
        ]
    }

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::of(self.created_by.clone()),
            FieldValue::of(self.updated_by.clone()),
        ]
    }
}

struct Address {
    street: String,
    city: String,
}

impl Record for Address {
    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::value("street", "street"),
            FieldDef::value("city", "city"),
        ]
    }

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::of(self.street.clone()),
            FieldValue::of(self.city.clone()),
        ]
    }
}

struct Customer {
    id: i64,
    name: String,
    secret: String,
    audit: Audit,
    address: Address,
    status: String,
}

impl Record for Customer {
    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::value("id", "id").with_tags(&[("db", ",skipinsert,skipupdate")]),
            FieldDef::value("name", "name").with_tags(&[("db", "full_name"), ("col", "nm")]),
            FieldDef::value("secret", "secret").with_tags(&[("db", "-")]),
            FieldDef::value("audit", "audit").with_kind(FieldKind::Flatten(Audit::fields)),
            FieldDef::value("address", "address").with_kind(FieldKind::Nested(Address::fields)),
            FieldDef::value("status", "status").with_tags(&[("db", ",defaultifempty")]),
        ]
    }

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::of(self.id),
            FieldValue::of(self.name.clone()),
            FieldValue::of(self.secret.clone()),
            FieldValue::Record(self.audit.field_values()),
            FieldValue::Record(self.address.field_values()),
            FieldValue::of(self.status.clone()),
        ]
    }
}

fn customer() -> Customer {
    Customer {
        id: 7,
        name: "Ada".into(),
        secret: "hunter2".into(),
        audit: Audit {
            created_by: "root".into(),
            updated_by: None,
        },
        address: Address {
            street: "Main".into(),
            city: "Paris".into(),
        },
        status: String::new(),
    }
}

struct Duplicated {
    a: i32,
    b: i32,
}

impl Record for Duplicated {
    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::value("a", "a").with_tags(&[("db", "same")]),
            FieldDef::value("b", "b").with_tags(&[("db", "same")]),
        ]
    }

    fn field_values(&self) -> Vec<FieldValue> {
        vec![FieldValue::of(self.a), FieldValue::of(self.b)]
    }
}

struct BadTag;

impl Record for BadTag {
    fn fields() -> Vec<FieldDef> {
        vec![FieldDef::value("x", "x").with_tags(&[("db", "x,nope")])]
    }

    fn field_values(&self) -> Vec<FieldValue> {
        vec![FieldValue::of(1)]
    }
}

#[test]
fn column_order_and_names() {
    let map = ColumnMap::of::<Customer>("db").unwrap();
    let (cols, aliases) = map.cols();
    assert_eq!(
        cols,
        vec![
            "id",
            "full_name",
            "created_by",
            "updated_by",
            "address.street",
            "address.city",
            "status"
        ]
    );
    assert!(aliases.is_empty());
}

#[test]
fn tag_namespace_is_selected_by_name() {
    let map = ColumnMap::of::<Customer>("col").unwrap();
    let (cols, _) = map.cols();
    assert_eq!(cols[1], "nm");
    // `-` only applies under the `db` namespace
    assert!(cols.contains(&"secret".to_string()));
}

#[test]
fn field_paths_follow_nesting() {
    let map = ColumnMap::of::<Customer>("db").unwrap();
    let street = map.get("address.street").unwrap();
    assert_eq!(street.field_name, "address.street");
    assert_eq!(street.path, vec![4, 0]);
    assert_eq!(map.get("created_by").unwrap().field_name, "audit.created_by");
}

#[test]
fn insert_row_applies_options() {
    let map = ColumnMap::of::<Customer>("db").unwrap();
    let (cols, values) = map.insert_row(&customer().field_values()).unwrap();
    // id skipped on insert, updated_by omitted because it is nil
    assert_eq!(
        cols,
        vec!["full_name", "created_by", "address.street", "address.city", "status"]
    );
    assert_eq!(values[0], Expression::Value(Value::Text("Ada".into())));
    assert_eq!(values[4], Expression::Default);
}

#[test]
fn update_assignments_respect_skipupdate() {
    let map = ColumnMap::of::<Customer>("db").unwrap();
    let mut c = customer();
    c.audit.updated_by = Some("admin".into());
    let cols: Vec<String> = map
        .update_assignments(&c.field_values())
        .unwrap()
        .into_iter()
        .map(|(col, _)| col)
        .collect();
    assert_eq!(
        cols,
        vec!["full_name", "updated_by", "address.street", "address.city", "status"]
    );
}

#[test]
fn duplicate_columns_are_errors() {
    let err = ColumnMap::of::<Duplicated>("db").unwrap_err();
    assert!(matches!(err, SqlError::DuplicateColumn { ref column, .. } if column == "same"));
}

#[test]
fn malformed_tags_are_errors() {
    assert!(ColumnMap::of::<BadTag>("db").unwrap_err().is_tag());
    // other namespaces are unaffected
    assert!(ColumnMap::of::<BadTag>("other").is_ok());
}

#[test]
fn mapping_is_cached_and_deterministic() {
    let a = ColumnMap::of::<Customer>("db").unwrap();
    let b = ColumnMap::of::<Customer>("db").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(ColumnMap::build(&RecordType::of::<Customer>(), "db").unwrap(), *a);
}

#[test]
fn record_ref_equality_is_structural() {
    let a = RecordRef::new(customer());
    let b = RecordRef::new(customer());
    assert_eq!(a, b);
    assert_eq!(a.record_type(), RecordType::of::<Customer>());
}

#[test]
fn lookup_rejects_shape_mismatch() {
    let values = customer().field_values();
    assert_eq!(
        FieldValue::lookup(&values, &[4, 1]),
        Some(&Value::Text("Paris".into()))
    );
    assert_eq!(FieldValue::lookup(&values, &[4]), None);
    assert_eq!(FieldValue::lookup(&values, &[99]), None);
}
