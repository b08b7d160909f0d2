//! Output formatting utilities

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::core::error::ClientError;
use crate::core::outcome::Outcome;

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list {
                OutputFormat::Table
            } else {
                OutputFormat::Yaml
            }
        }
        other => other,
    }
}

/// Whether the format prints the `{success, ...}` envelope
pub fn is_structured(format: OutputFormat) -> bool {
    matches!(format, OutputFormat::Json | OutputFormat::Yaml)
}

/// Print an outcome as JSON or YAML
pub fn print_outcome<T: Serialize>(outcome: &Outcome<T>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(outcome).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ => {
            let json = serde_json::to_string_pretty(outcome).into_diagnostic()?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Report a failed call
///
/// Structured formats also get the failure envelope on stdout so scripts can
/// read it; the error itself is returned for the exit status and stderr.
pub fn fail<T>(err: ClientError, format: OutputFormat) -> Result<T> {
    if is_structured(format) {
        print_outcome(&Outcome::<()>::failed(&err), format)?;
    }
    Err(err.into())
}

/// Unwrap a client result, reporting failures per [`fail`]
pub fn check<T>(result: std::result::Result<T, ClientError>, format: OutputFormat) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => fail(err, format),
    }
}

/// Print the result of a create/update/delete call
pub fn report_mutation(
    result: std::result::Result<Option<Value>, ClientError>,
    format: OutputFormat,
    done: &str,
) -> Result<()> {
    let data = check(result, format)?;

    match format {
        OutputFormat::Json | OutputFormat::Yaml => {
            print_outcome(&Outcome::from_optional(Ok(data)), format)?;
        }
        OutputFormat::Id => {
            if let Some(id) = data.as_ref().and_then(record_id) {
                println!("{}", id);
            }
        }
        _ => {
            println!("{} {}", style("✓").green(), done);
            if let Some(id) = data.as_ref().and_then(record_id) {
                println!("   {}", style(id).cyan());
            }
        }
    }
    Ok(())
}

/// Best identifier found in an echoed record
fn record_id(record: &Value) -> Option<String> {
    const KEYS: &[&str] = &["wonum", "workorderid", "href"];
    KEYS.iter().find_map(|key| match record.get(*key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Print a single record in a structured format
pub fn print_record<T: Serialize>(record: &T, format: OutputFormat) -> Result<()> {
    print_outcome(&Outcome::ok(record), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_effective_format() {
        assert_eq!(effective_format(OutputFormat::Auto, true), OutputFormat::Table);
        assert_eq!(effective_format(OutputFormat::Auto, false), OutputFormat::Yaml);
        assert_eq!(effective_format(OutputFormat::Csv, false), OutputFormat::Csv);
    }

    #[test]
    fn test_record_id_prefers_wonum() {
        assert_eq!(
            record_id(&json!({"workorderid": 12, "wonum": "1001"})).as_deref(),
            Some("1001")
        );
        assert_eq!(record_id(&json!({"workorderid": 12})).as_deref(), Some("12"));
        assert_eq!(record_id(&json!({})), None);
    }
}
