//! Schema error types
//!
//! Error codes:
//! - SCHEMA_MALFORMED: schema file unreadable, invalid JSON or bad structure
//! - SCHEMA_UNKNOWN_RECORD: no schema registered under a name
//! - SCHEMA_DUPLICATE_RECORD: a name registered twice
//! - SCHEMA_DOCUMENT_MISMATCH: a document's shape differs from its schema

use std::fmt;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    SchemaMalformed,
    SchemaUnknownRecord,
    SchemaDuplicateRecord,
    SchemaDocumentMismatch,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::SchemaMalformed => "SCHEMA_MALFORMED",
            SchemaErrorCode::SchemaUnknownRecord => "SCHEMA_UNKNOWN_RECORD",
            SchemaErrorCode::SchemaDuplicateRecord => "SCHEMA_DUPLICATE_RECORD",
            SchemaErrorCode::SchemaDocumentMismatch => "SCHEMA_DOCUMENT_MISMATCH",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Where a document departs from its schema
#[derive(Debug, Clone)]
pub struct MismatchDetails {
    /// Field path (e.g., "asset.houses[0].cost")
    pub field: String,
    /// Expected kind or condition
    pub expected: String,
    /// Actual JSON type found
    pub actual: String,
}

impl MismatchDetails {
    pub fn new(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn extra_field(field: impl Into<String>) -> Self {
        Self::new(field, "no undeclared fields", "extra field present")
    }
}

impl fmt::Display for MismatchDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// Schema error type with full context
#[derive(Debug)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    details: Option<MismatchDetails>,
}

impl SchemaError {
    /// Create an error for a malformed schema file
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::SchemaMalformed,
            message: format!("Malformed schema '{}': {}", path.into(), reason.into()),
            details: None,
        }
    }

    /// Create an unknown record error
    pub fn unknown_record(name: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::SchemaUnknownRecord,
            message: format!("Record schema '{}' not found", name.into()),
            details: None,
        }
    }

    /// Create a duplicate record error
    pub fn duplicate_record(name: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::SchemaDuplicateRecord,
            message: format!("Record schema '{}' is already registered", name.into()),
            details: None,
        }
    }

    /// Create a document mismatch error
    pub fn document_mismatch(details: MismatchDetails) -> Self {
        Self {
            code: SchemaErrorCode::SchemaDocumentMismatch,
            message: format!("Document does not match schema: {}", details),
            details: Some(details),
        }
    }

    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&MismatchDetails> {
        self.details.as_ref()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchemaErrorCode::SchemaMalformed.code(), "SCHEMA_MALFORMED");
        assert_eq!(SchemaErrorCode::SchemaUnknownRecord.code(), "SCHEMA_UNKNOWN_RECORD");
        assert_eq!(
            SchemaErrorCode::SchemaDocumentMismatch.code(),
            "SCHEMA_DOCUMENT_MISMATCH"
        );
    }

    #[test]
    fn test_mismatch_display() {
        let err = SchemaError::document_mismatch(MismatchDetails::new("age", "int", "string"));
        let display = err.to_string();
        assert!(display.starts_with("SCHEMA_DOCUMENT_MISMATCH"));
        assert!(display.contains("age"));
        assert_eq!(err.details().unwrap().expected, "int");
    }
}
