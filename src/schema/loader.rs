//! Schema loader
//!
//! Reads record schemas from JSON files and keeps them in a registry
//! keyed by record name:
//! - One schema per `*.json` file
//! - Unreadable, malformed or structurally invalid files are errors
//! - A record name may be registered only once

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::errors::{SchemaError, SchemaResult};
use super::types::RecordSchema;
use crate::observability::{log_event, Event};

/// In-memory registry of record schemas.
#[derive(Debug, Default)]
pub struct SchemaLoader {
    schemas: HashMap<String, RecordSchema>,
}

impl SchemaLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and checks one schema file without registering it.
    pub fn read_file(path: &Path) -> SchemaResult<RecordSchema> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let schema: RecordSchema = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema(path.display().to_string(), e))?;

        let shown = path.display().to_string();
        log_event(
            Event::SchemaLoaded,
            &[("path", shown.as_str()), ("record", schema.name.as_str())],
        );
        Ok(schema)
    }

    /// Loads a schema file into the registry, returning its record name.
    pub fn load_file(&mut self, path: &Path) -> SchemaResult<String> {
        let schema = Self::read_file(path)?;
        let name = schema.name.clone();
        self.insert(schema)?;
        Ok(name)
    }

    /// Loads every `*.json` file in `dir`, in file name order.
    ///
    /// Returns the number of schemas loaded.
    pub fn load_dir(&mut self, dir: &Path) -> SchemaResult<usize> {
        let entries = fs::read_dir(dir).map_err(|e| {
            SchemaError::malformed_schema(
                dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_schema(
                    dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            self.load_file(path)?;
        }
        Ok(paths.len())
    }

    /// Registers a schema built in code.
    pub fn register(&mut self, schema: RecordSchema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema("<in-memory>", e))?;
        self.insert(schema)
    }

    fn insert(&mut self, schema: RecordSchema) -> SchemaResult<()> {
        if self.schemas.contains_key(&schema.name) {
            return Err(SchemaError::duplicate_record(&schema.name));
        }
        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RecordSchema> {
        self.schemas.get(name)
    }

    /// Like [`get`](Self::get), failing with `SCHEMA_UNKNOWN_RECORD`.
    pub fn require(&self, name: &str) -> SchemaResult<&RecordSchema> {
        self.get(name).ok_or_else(|| SchemaError::unknown_record(name))
    }

    /// Registered record names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
