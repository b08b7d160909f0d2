//! YAML handling for the config file and the local store
//!
//! Parse failures carry the file name and source span so miette can point
//! at the offending line.

pub mod diagnostics;
pub mod parser;

pub use diagnostics::{YamlError, YamlSyntaxError};
pub use parser::{parse_yaml, read_yaml_file};
