//! Schema-bound JSON documents
//!
//! Binding checks that a JSON value has the shape its schema declares:
//! - The document is an object
//! - No undeclared fields exist
//! - Field types match their declared kinds exactly (no coercion)
//! - `null` appears only where a pointer is declared
//!
//! Absent fields are not an error: they read as the kind's zero value
//! (0, "", empty sequence, nil pointer, record of zero values), the same
//! as a freshly constructed record. A bound document is then validated
//! through the record walker like any other [`Reflect`] value.

use serde_json::{Map, Value};

use super::errors::{MismatchDetails, SchemaError, SchemaResult};
use super::types::{FieldKind, FieldSchema, RecordSchema};
use crate::observability::{log_event, Event};
use crate::reflect::{Field, Node, Reflect, Shape};

/// A JSON document checked against a record schema.
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    schema: &'a RecordSchema,
    value: &'a Value,
}

impl<'a> Document<'a> {
    /// Binds `value` to `schema`, rejecting shape mismatches.
    pub fn bind(schema: &'a RecordSchema, value: &'a Value) -> SchemaResult<Self> {
        let result = match value.as_object() {
            Some(object) => check_object(object, &schema.fields, ""),
            None => Err(type_error("$root", "object", value)),
        };

        if let Err(err) = &result {
            log_event(
                Event::DocumentRejected,
                &[("reason", err.message()), ("schema", schema.name.as_str())],
            );
        }

        result.map(|()| Self { schema, value })
    }

    pub fn schema(&self) -> &RecordSchema {
        self.schema
    }

    pub fn value(&self) -> &Value {
        self.value
    }
}

impl Reflect for Document<'_> {
    fn reflect(&self) -> Shape<'_> {
        record_shape(&self.schema.name, &self.schema.fields, self.value.as_object())
    }
}

/// One field value seen through its declared kind. `None` is an absent field.
struct DocumentNode<'a> {
    kind: &'a FieldKind,
    value: Option<&'a Value>,
}

impl Reflect for DocumentNode<'_> {
    fn reflect(&self) -> Shape<'_> {
        match self.kind {
            FieldKind::Int => Shape::Int(self.value.and_then(Value::as_i64).unwrap_or(0)),
            FieldKind::Uint => Shape::Uint(self.value.and_then(Value::as_u64).unwrap_or(0)),
            FieldKind::Float => Shape::Float(self.value.and_then(Value::as_f64).unwrap_or(0.0)),
            FieldKind::String => Shape::Str(self.value.and_then(Value::as_str).unwrap_or("")),
            FieldKind::Bool => Shape::Unsupported("bool"),
            FieldKind::Map => Shape::Unsupported("map"),
            FieldKind::Pointer { target } => match self.value {
                None | Some(Value::Null) => Shape::Pointer(None),
                Some(value) => Shape::Pointer(Some(Node::owned(DocumentNode {
                    kind: target,
                    value: Some(value),
                }))),
            },
            FieldKind::Record {
                record_name,
                fields,
            } => record_shape(record_name, fields, self.value.and_then(Value::as_object)),
            FieldKind::Sequence { element } => Shape::Sequence(
                self.value
                    .and_then(Value::as_array)
                    .map(|items| {
                        items
                            .iter()
                            .map(|item| {
                                Node::owned(DocumentNode {
                                    kind: element,
                                    value: Some(item),
                                })
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            ),
        }
    }
}

fn record_shape<'a>(
    name: &'a str,
    fields: &'a [FieldSchema],
    object: Option<&'a Map<String, Value>>,
) -> Shape<'a> {
    Shape::record(
        name,
        fields
            .iter()
            .map(|field| {
                Field::with_node(
                    &field.name,
                    field.tag.as_deref(),
                    Node::owned(DocumentNode {
                        kind: &field.kind,
                        value: object.and_then(|object| object.get(&field.name)),
                    }),
                )
            })
            .collect(),
    )
}

fn check_object(
    object: &Map<String, Value>,
    fields: &[FieldSchema],
    path_prefix: &str,
) -> SchemaResult<()> {
    for key in object.keys() {
        if !fields.iter().any(|field| &field.name == key) {
            return Err(SchemaError::document_mismatch(MismatchDetails::extra_field(
                make_path(path_prefix, key),
            )));
        }
    }

    for field in fields {
        if let Some(value) = object.get(&field.name) {
            check_value(value, &field.kind, &make_path(path_prefix, &field.name))?;
        }
    }

    Ok(())
}

fn check_value(value: &Value, kind: &FieldKind, path: &str) -> SchemaResult<()> {
    let matches = match kind {
        FieldKind::Int => value.is_i64(),
        FieldKind::Uint => value.is_u64(),
        FieldKind::Float => value.is_number(),
        FieldKind::String => value.is_string(),
        FieldKind::Bool => value.is_boolean(),
        FieldKind::Map => value.is_object(),
        FieldKind::Pointer { target } => {
            return match value {
                Value::Null => Ok(()),
                other => check_value(other, target, path),
            };
        }
        FieldKind::Record { fields, .. } => {
            let object = value
                .as_object()
                .ok_or_else(|| type_error(path, "record", value))?;
            return check_object(object, fields, path);
        }
        FieldKind::Sequence { element } => {
            let items = value
                .as_array()
                .ok_or_else(|| type_error(path, "sequence", value))?;
            for (i, item) in items.iter().enumerate() {
                check_value(item, element, &format!("{}[{}]", path, i))?;
            }
            return Ok(());
        }
    };

    if matches {
        Ok(())
    } else {
        Err(type_error(path, kind.type_name(), value))
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() {
                "int"
            } else if n.is_u64() {
                "uint"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "record",
    }
}

fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn type_error(path: &str, expected: &str, actual: &Value) -> SchemaError {
    SchemaError::document_mismatch(MismatchDetails::new(path, expected, json_type_name(actual)))
}
