//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod context;
pub mod filters;
pub mod helpers;
pub mod output;
pub mod resource_cmd;
pub mod table;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};
pub use filters::StatusFilter;
pub use resource_cmd::ResourceConfig;
