//! Record schema definitions
//!
//! A schema describes a record type for values that arrive as JSON rather
//! than as Rust structs. Supported field kinds:
//! - int: signed 64-bit integer
//! - uint: unsigned 64-bit integer
//! - float: 64-bit floating point
//! - string: UTF-8 string
//! - bool, map: accepted but carry no rules
//! - pointer: nullable reference to a target kind
//! - record: nested record with its own fields
//! - sequence: homogeneous list of one element kind

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Kind of a schema field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Int,
    Uint,
    Float,
    String,
    Bool,
    Map,
    /// Nullable; `null` or an absent field is a nil pointer
    Pointer { target: Box<FieldKind> },
    Record {
        /// Record type name, for diagnostics only
        #[serde(rename = "record", default)]
        record_name: String,
        fields: Vec<FieldSchema>,
    },
    Sequence { element: Box<FieldKind> },
}

impl FieldKind {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Int => "int",
            FieldKind::Uint => "uint",
            FieldKind::Float => "float",
            FieldKind::String => "string",
            FieldKind::Bool => "bool",
            FieldKind::Map => "map",
            FieldKind::Pointer { .. } => "pointer",
            FieldKind::Record { .. } => "record",
            FieldKind::Sequence { .. } => "sequence",
        }
    }

    pub fn pointer(target: FieldKind) -> Self {
        FieldKind::Pointer {
            target: Box::new(target),
        }
    }

    pub fn sequence(element: FieldKind) -> Self {
        FieldKind::Sequence {
            element: Box::new(element),
        }
    }

    pub fn record(name: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        FieldKind::Record {
            record_name: name.into(),
            fields,
        }
    }
}

/// One field: name, kind and optional constraint annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            tag: None,
            kind,
        }
    }

    pub fn tagged(name: impl Into<String>, tag: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            tag: Some(tag.into()),
            kind,
        }
    }
}

/// Top-level record schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldSchema>,
}

impl RecordSchema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields,
        }
    }

    /// Validates the schema structure itself (not a document)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Schema must have a non-empty name".into());
        }
        check_fields(&self.fields, &self.name)
    }
}

fn check_fields(fields: &[FieldSchema], owner: &str) -> Result<(), String> {
    let mut seen = HashSet::new();
    for field in fields {
        if field.name.is_empty() {
            return Err(format!("'{}' has a field with an empty name", owner));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(format!("'{}' declares field '{}' twice", owner, field.name));
        }
        check_kind(&field.kind, &format!("{}.{}", owner, field.name))?;
    }
    Ok(())
}

fn check_kind(kind: &FieldKind, owner: &str) -> Result<(), String> {
    match kind {
        FieldKind::Record { fields, .. } => check_fields(fields, owner),
        FieldKind::Pointer { target } => check_kind(target, owner),
        FieldKind::Sequence { element } => check_kind(element, owner),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_nested_kinds() {
        let schema: RecordSchema = serde_json::from_str(
            r#"{
                "name": "Person",
                "fields": [
                    {"name": "age", "type": "int", "tag": "int,min:1,max:120"},
                    {"name": "nickname", "type": "pointer", "target": {"type": "string"}},
                    {"name": "asset", "type": "record", "record": "Asset", "fields": [
                        {"name": "houses", "type": "sequence", "element": {
                            "type": "record", "record": "House", "fields": [
                                {"name": "cost", "type": "uint", "tag": "uint,max:10000000"}
                            ]
                        }}
                    ]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(schema.fields.len(), 3);
        assert_eq!(schema.fields[0].tag.as_deref(), Some("int,min:1,max:120"));
        assert_eq!(schema.fields[1].kind, FieldKind::pointer(FieldKind::String));
        let FieldKind::Record { record_name, fields } = &schema.fields[2].kind else {
            panic!("expected record kind");
        };
        assert_eq!(record_name, "Asset");
        assert_eq!(fields[0].kind.type_name(), "sequence");
        assert!(schema.validate_structure().is_ok());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let schema = RecordSchema::new(
            "Person",
            vec![
                FieldSchema::new("age", FieldKind::Int),
                FieldSchema::new("age", FieldKind::Uint),
            ],
        );
        let err = schema.validate_structure().unwrap_err();
        assert!(err.contains("twice"));
    }

    #[test]
    fn test_nested_empty_name_rejected() {
        let schema = RecordSchema::new(
            "Person",
            vec![FieldSchema::new(
                "asset",
                FieldKind::record("Asset", vec![FieldSchema::new("", FieldKind::Int)]),
            )],
        );
        let err = schema.validate_structure().unwrap_err();
        assert!(err.contains("Person.asset"));
    }

    #[test]
    fn test_empty_schema_name_rejected() {
        let schema = RecordSchema::new(" ", vec![]);
        assert!(schema.validate_structure().is_err());
    }

    #[test]
    fn test_field_kind_names() {
        assert_eq!(FieldKind::Int.type_name(), "int");
        assert_eq!(FieldKind::Map.type_name(), "map");
        assert_eq!(FieldKind::sequence(FieldKind::Float).type_name(), "sequence");
        assert_eq!(FieldKind::record("R", vec![]).type_name(), "record");
    }
}
