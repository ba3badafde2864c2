//! Schema-described records
//!
//! Lets records be declared as data rather than Rust types. A
//! [`RecordSchema`] lists fields with their kinds and constraint
//! annotations; a JSON [`Document`] bound to it validates through the same
//! walker as native records.
//!
//! # Design Principles
//!
//! - Schemas are checked when loaded
//! - Documents are type-checked against the schema before validation
//! - No coercion: `1.0` is not an int, `"1"` is not a number
//! - Absent fields read as zero values

mod document;
mod errors;
mod loader;
mod types;

pub use document::Document;
pub use errors::{MismatchDetails, SchemaError, SchemaErrorCode, SchemaResult};
pub use loader::SchemaLoader;
pub use types::{FieldKind, FieldSchema, RecordSchema};
