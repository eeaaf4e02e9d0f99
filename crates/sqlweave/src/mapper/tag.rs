//! Field annotation parsing.
//!
//! Grammar: `name[,option...]`. A bare `-` skips the field; an empty name keeps
//! the default column name.

use crate::error::{SqlError, SqlResult};

/// Parsed annotation of one field under one tag namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTag {
    pub skip: bool,
    pub name: Option<String>,
    pub skip_insert: bool,
    pub skip_update: bool,
    pub default_if_empty: bool,
    pub omit_nil: bool,
    pub omit_empty: bool,
    pub subquery: Option<String>,
}

/// Parse the raw annotation `raw` attached to `field`.
pub fn parse_tag(field: &str, raw: &str) -> SqlResult<FieldTag> {
    let raw = raw.trim();
    if raw == "-" {
        return Ok(FieldTag {
            skip: true,
            ..FieldTag::default()
        });
    }

    let mut parts = raw.split(',');
    let name = parts.next().map(str::trim).unwrap_or_default();
    let mut tag = FieldTag {
        name: (!name.is_empty()).then(|| name.to_string()),
        ..FieldTag::default()
    };

    for option in parts.map(str::trim).filter(|o| !o.is_empty()) {
        match option {
            "skipinsert" => tag.skip_insert = true,
            "skipupdate" => tag.skip_update = true,
            "defaultifempty" => tag.default_if_empty = true,
            "omitnil" => tag.omit_nil = true,
            "omitempty" => tag.omit_empty = true,
            _ => match option.split_once('=') {
                Some(("subquery", alias)) => {
                    let alias = alias.trim();
                    if alias.is_empty() {
                        return Err(SqlError::tag(field, "subquery option requires an alias"));
                    }
                    tag.subquery = Some(alias.to_string());
                }
                _ => {
                    return Err(SqlError::tag(field, format!("unknown option '{option}'")));
                }
            },
        }
    }

    Ok(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_only() {
        let tag = parse_tag("name", "full_name").unwrap();
        assert_eq!(tag.name.as_deref(), Some("full_name"));
        assert!(!tag.skip);
    }

    #[test]
    fn dash_skips() {
        assert!(parse_tag("secret", "-").unwrap().skip);
    }

    #[test]
    fn empty_name_keeps_default() {
        let tag = parse_tag("created", ",skipupdate").unwrap();
        assert_eq!(tag.name, None);
        assert!(tag.skip_update);
    }

    #[test]
    fn all_options() {
        let tag = parse_tag(
            "f",
            "col, skipinsert,skipupdate,defaultifempty,omitnil,omitempty,subquery=counts",
        )
        .unwrap();
        assert!(tag.skip_insert && tag.skip_update && tag.default_if_empty);
        assert!(tag.omit_nil && tag.omit_empty);
        assert_eq!(tag.subquery.as_deref(), Some("counts"));
    }

    #[test]
    fn unknown_option_is_error() {
        let err = parse_tag("f", "col,frobnicate").unwrap_err();
        assert!(err.is_tag());
        assert!(err.to_string().contains("frobnicate"));
    }

    #[test]
    fn subquery_requires_alias() {
        assert!(parse_tag("f", "col,subquery=").unwrap_err().is_tag());
    }
}
