//! CLI command implementations

pub mod activity;
pub mod attach;
pub mod auth;
pub mod completions;
pub mod config;
pub mod labor;
pub mod material;
pub mod predict;
pub mod wo;
pub mod worklog;
