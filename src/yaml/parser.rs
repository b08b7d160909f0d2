//! YAML parsing for local files

use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::yaml::diagnostics::{YamlError, YamlSyntaxError};

/// Parse YAML content into a typed value with nice error messages
pub fn parse_yaml<T: DeserializeOwned + 'static>(content: &str, filename: &str) -> Result<T, YamlError> {
    serde_yml::from_str(content).map_err(|e| {
        YamlError::Syntax(YamlSyntaxError::from_serde_error(&e, content, filename))
    })
}

/// Read an optional YAML file
///
/// A missing file, or one holding only whitespace and comments, yields
/// `None`. Anything else must parse as `T`.
pub fn read_yaml_file<T: DeserializeOwned + 'static>(path: &Path) -> Result<Option<T>, YamlError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let filename = path.display().to_string();
    let value: serde_yml::Value = parse_yaml(&content, &filename)?;
    if value.is_null() {
        return Ok(None);
    }
    serde_yml::from_value(value)
        .map(Some)
        .map_err(|e| YamlError::Syntax(YamlSyntaxError::from_serde_error(&e, &content, &filename)))
}
