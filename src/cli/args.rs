//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    activity::ActivityCommands, attach::AttachCommands, auth::LoginArgs,
    completions::CompletionsArgs, config::ConfigCommands, labor::LabtransCommands,
    labor::WplaborCommands, material::MaterialCommands, material::MatusetransCommands,
    predict::PredictArgs, wo::WoCommands, worklog::WorklogCommands,
};

#[derive(Parser, Debug)]
#[command(name = "mxf")]
#[command(author, version, about = "Field client for Maximo work orders over OSLC REST")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "auto")]
    pub output: OutputFormat,

    /// Backend base URL for this invocation (e.g. http://host:9080/maximo/oslc)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Default for GlobalOpts {
    fn default() -> Self {
        Self {
            output: OutputFormat::Auto,
            base_url: None,
            verbose: 0,
            quiet: false,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table for lists, YAML for single records
    #[default]
    Auto,
    /// Aligned table
    Table,
    /// Tab-separated values
    Tsv,
    /// Comma-separated values
    Csv,
    /// JSON in the `{success, data}` / `{success, error}` shape
    Json,
    /// YAML
    Yaml,
    /// Record identifiers only, one per line
    Id,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a session and store it locally
    Login(LoginArgs),

    /// End the session and forget stored credentials
    Logout,

    /// Show the stored session and backend
    Whoami,

    /// Base URL and local configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Work orders
    #[command(subcommand)]
    Wo(WoCommands),

    /// Work log entries
    #[command(subcommand)]
    Worklog(WorklogCommands),

    /// Labor transactions
    #[command(subcommand)]
    Labtrans(LabtransCommands),

    /// Planned labor
    #[command(subcommand)]
    Wplabor(WplaborCommands),

    /// Material transactions
    #[command(subcommand)]
    Matusetrans(MatusetransCommands),

    /// Planned materials
    #[command(subcommand)]
    Material(MaterialCommands),

    /// Work order activities
    #[command(subcommand)]
    Activity(ActivityCommands),

    /// Attachments
    #[command(subcommand)]
    Attach(AttachCommands),

    /// Failure-prediction input for a work order
    Predict(PredictArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
