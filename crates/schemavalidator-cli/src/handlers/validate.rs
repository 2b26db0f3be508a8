//! Validation command handler and related utilities

use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, ErrorContext, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use is_terminal::IsTerminal;
use schemavalidator_core::{normalize_id, ScoredFailure, SchemaValidator, ValidatorError};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Result data emitted by the structured output formats
#[derive(Debug, Serialize)]
struct ValidationOutcome<'a> {
    schema: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    failures: &'a [ScoredFailure],
}

/// Handle the validate command
#[instrument(skip(config, output), fields(schema = %args.schema_id))]
pub fn handle_validate(
    args: ValidateArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let timer = Timer::with_details("validate_command", &format!("schema: {}", args.schema_id));

    let text = read_document(args.document.as_deref())?;
    debug!("Document read, {} bytes", text.len());

    let registry = config
        .registry
        .validator_config(args.base_path.as_deref(), args.strictness_schema.as_deref())?;
    output.info(&format!("Loading schemas from {}", registry.schema_root.display()))?;

    let validator = {
        let _load_timer = Timer::new("registry_loading");
        SchemaValidator::new(registry)?
    };
    output.info(&format!("Loaded {} schemas", validator.store().len()))?;

    let result = match args.document.as_deref() {
        Some(path) if is_yaml(path) => {
            let document: Value = serde_yaml::from_str(&text).map_err(|_| Error::InvalidFormat {
                path: path.to_path_buf(),
                expected: "YAML".to_string(),
            })?;
            validator.validate(&document, args.schema_id.as_str())
        }
        _ => validator.validate_json_string(&text, &args.schema_id),
    };
    debug!(elapsed_ms = timer.elapsed().as_millis() as u64, "Validation finished");

    let schema = normalize_id(&args.schema_id);
    match result {
        Ok(()) => {
            info!("Document is valid");
            output.success("OK")?;
            if output.format() != OutputFormat::Human {
                output.data(&ValidationOutcome {
                    schema,
                    valid: true,
                    message: None,
                    failures: &[],
                })?;
            }
            Ok(())
        }
        Err(ValidatorError::SchemaValidationError { message, report }) => {
            warn!(failures = report.len(), "Document failed validation");
            output.report(&report)?;
            if output.format() != OutputFormat::Human {
                output.data(&ValidationOutcome {
                    schema,
                    valid: false,
                    message: Some(message.as_str()),
                    failures: report.failures(),
                })?;
            }
            Err(ValidatorError::SchemaValidationError { message, report }.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Read the document from `path`, or from stdin when no path is given
fn read_document(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut stdin = io::stdin();
            if stdin.is_terminal() {
                return Err(Error::invalid_args(
                    "no document given; pass --document FILE or pipe one on stdin",
                ));
            }
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .context("Failed to read document from stdin")?;
            Ok(text)
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("yaml") || s.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}
