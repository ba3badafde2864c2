//! CLI command implementations
//!
//! `check` loads the configuration, the schema and the document in that
//! order, binds the document and validates it. Any failure before
//! validation is an error; a failed validation prints its verdict and
//! then fails with `CLI_DOCUMENT_INVALID`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::observability::{Logger, Severity, DEFAULT_LEVEL};
use crate::rules::{self, LengthUnit};
use crate::schema::{Document, RecordSchema, SchemaError, SchemaLoader};
use crate::validator::{RecordValidator, ValidatorOptions, Violation};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// How string length is measured (optional, default "bytes")
    #[serde(default)]
    pub length_unit: LengthUnit,

    /// Minimum log severity (optional, default "WARN")
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_log_level() -> Severity {
    DEFAULT_LEVEL
}

impl Default for Config {
    fn default() -> Self {
        Self {
            length_unit: LengthUnit::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.log_level == Severity::Fatal {
            return Err(CliError::config_error(
                "log_level FATAL would hide validation errors; use ERROR or lower",
            ));
        }
        Ok(())
    }

    pub fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            length_unit: self.length_unit,
        }
    }
}

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}

/// Run a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Check {
            schema,
            document,
            record,
            config,
        } => {
            let config = match config {
                Some(path) => Config::load(&path)?,
                None => Config::default(),
            };
            Logger::set_level(config.log_level);

            let verdict = check(&config, &schema, record.as_deref(), &document)?;
            write_response(verdict_json(&verdict))?;

            verdict.map_err(|violation| {
                CliError::invalid(format!(
                    "{} failed validation: {}",
                    document.display(),
                    violation
                ))
            })
        }
        Command::ParseTag { tag } => write_response(parse_tag(&tag)),
    }
}

/// Validate the document at `document` against a schema.
///
/// `schema` is either one schema file or a directory of them; with a
/// directory, `record` names the schema to use. The outer error covers
/// loading and binding; the inner result is the validation verdict.
pub fn check(
    config: &Config,
    schema: &Path,
    record: Option<&str>,
    document: &Path,
) -> CliResult<Result<(), Violation>> {
    let schema = resolve_schema(schema, record)?;

    let content = fs::read_to_string(document).map_err(|e| {
        CliError::io_error(format!("Failed to read {}: {}", document.display(), e))
    })?;
    let value: Value = serde_json::from_str(&content)?;
    let bound = Document::bind(&schema, &value)?;

    Ok(RecordValidator::new(config.validator_options()).check(&bound))
}

/// Parse an annotation into its constraint list, as JSON
pub fn parse_tag(tag: &str) -> Value {
    json!({
        "tag": tag,
        "constraints": rules::parse_tag(tag),
    })
}

fn resolve_schema(path: &Path, record: Option<&str>) -> CliResult<RecordSchema> {
    if !path.is_dir() {
        let schema = SchemaLoader::read_file(path)?;
        return match record {
            Some(name) if name != schema.name => Err(SchemaError::unknown_record(name).into()),
            _ => Ok(schema),
        };
    }

    let mut loader = SchemaLoader::new();
    loader.load_dir(path)?;
    let name = match (record, loader.names().as_slice()) {
        (Some(name), _) => name.to_string(),
        (None, [only]) => only.to_string(),
        (None, names) => {
            return Err(CliError::config_error(format!(
                "--record is required when the schema directory holds {} records",
                names.len()
            )))
        }
    };
    Ok(loader.require(&name)?.clone())
}

fn verdict_json(verdict: &Result<(), Violation>) -> Value {
    match verdict {
        Ok(()) => json!({ "valid": true, "violation": null }),
        Err(violation) => json!({
            "valid": false,
            "violation": {
                "path": violation.path.to_string(),
                "code": violation.code(),
                "message": violation.kind.to_string(),
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;
    use tempfile::TempDir;

    const PERSON: &str = r#"{
        "name": "Person",
        "fields": [
            {"name": "age", "type": "int", "tag": "int,min:1,max:120"},
            {"name": "nick", "type": "string", "tag": "string,max:3"}
        ]
    }"#;

    fn write(dir: &TempDir, file: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(file);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_config_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.json", "{}");

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_level, Severity::Warn);
    }

    #[test]
    fn test_config_values() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "config.json",
            r#"{"length_unit":"chars","log_level":"TRACE"}"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.length_unit, LengthUnit::Chars);
        assert_eq!(config.log_level, Severity::Trace);
    }

    #[test]
    fn test_config_rejects_unknown_and_fatal() {
        let dir = TempDir::new().unwrap();
        let unknown = write(&dir, "a.json", r#"{"data_dir":"/tmp"}"#);
        let fatal = write(&dir, "b.json", r#"{"log_level":"FATAL"}"#);

        assert_eq!(
            Config::load(&unknown).unwrap_err().code(),
            &CliErrorCode::ConfigError
        );
        assert_eq!(
            Config::load(&fatal).unwrap_err().code(),
            &CliErrorCode::ConfigError
        );
    }

    #[test]
    fn test_check_valid_and_invalid() {
        let dir = TempDir::new().unwrap();
        let schema = write(&dir, "person.json", PERSON);
        let good = write(&dir, "good.json", r#"{"age": 50, "nick": "al"}"#);
        let bad = write(&dir, "bad.json", r#"{"age": 199, "nick": "al"}"#);
        let config = Config::default();

        assert!(check(&config, &schema, None, &good).unwrap().is_ok());

        let violation = check(&config, &schema, None, &bad).unwrap().unwrap_err();
        assert_eq!(violation.path.to_string(), "age");
        assert_eq!(violation.code(), "RULE_ABOVE_MAX");
    }

    #[test]
    fn test_check_length_unit_from_config() {
        let dir = TempDir::new().unwrap();
        let schema = write(&dir, "person.json", PERSON);
        let doc = write(&dir, "doc.json", r#"{"age": 5, "nick": "äöü"}"#);

        assert!(check(&Config::default(), &schema, None, &doc)
            .unwrap()
            .is_err());

        let chars = Config {
            length_unit: LengthUnit::Chars,
            ..Config::default()
        };
        assert!(check(&chars, &schema, None, &doc).unwrap().is_ok());
    }

    #[test]
    fn test_check_schema_directory() {
        let dir = TempDir::new().unwrap();
        let schemas = dir.path().join("schemas");
        fs::create_dir(&schemas).unwrap();
        fs::write(schemas.join("person.json"), PERSON).unwrap();
        fs::write(
            schemas.join("house.json"),
            r#"{"name":"House","fields":[{"name":"cost","type":"uint","tag":"uint,max:10"}]}"#,
        )
        .unwrap();
        let doc = write(&dir, "house.json", r#"{"cost": 11}"#);
        let config = Config::default();

        let err = check(&config, &schemas, None, &doc).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);

        let verdict = check(&config, &schemas, Some("House"), &doc).unwrap();
        assert_eq!(verdict.unwrap_err().path.to_string(), "cost");
    }

    #[test]
    fn test_check_document_mismatch() {
        let dir = TempDir::new().unwrap();
        let schema = write(&dir, "person.json", PERSON);
        let doc = write(&dir, "doc.json", r#"{"age": "fifty"}"#);

        let err = check(&Config::default(), &schema, None, &doc).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::SchemaError);
        assert!(err.message().contains("SCHEMA_DOCUMENT_MISMATCH"));
    }

    #[test]
    fn test_check_record_name_must_match_file() {
        let dir = TempDir::new().unwrap();
        let schema = write(&dir, "person.json", PERSON);
        let doc = write(&dir, "doc.json", "{}");

        let err = check(&Config::default(), &schema, Some("House"), &doc).unwrap_err();
        assert!(err.message().contains("SCHEMA_UNKNOWN_RECORD"));
    }

    #[test]
    fn test_parse_tag_json() {
        let value = parse_tag("string,min:6,max:20");
        assert_eq!(value["constraints"][0]["op"], "min");
        assert_eq!(value["constraints"][0]["operand"], "6");
        assert_eq!(value["constraints"][1]["op"], "max");
        assert_eq!(value["constraints"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_verdict_json() {
        assert_eq!(verdict_json(&Ok(()))["valid"], true);
    }
}
