//! `mxf config` command - base URL override and local settings

use clap::Subcommand;
use console::style;
use miette::Result;
use serde::Serialize;

use crate::cli::context::Context;
use crate::cli::output::{check, print_record};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::client::Endpoints;
use crate::core::config::Config;
use crate::core::resource::FetchPolicy;
use crate::core::store::{base_url_override, KeyValueStore, BASE_URL_KEY};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Store a base URL override (e.g. http://host:9080/maximo/oslc)
    SetUrl {
        /// OSLC root URL
        url: String,
    },

    /// Remove the stored base URL override
    ResetUrl,

    /// Print where configuration and data files live
    Path,
}

/// Effective settings as shown by `config show`
#[derive(Debug, Serialize)]
struct Effective {
    base_url: String,
    base_url_override: Option<String>,
    object_structure: String,
    page_size: u32,
    timeout_secs: u64,
    fetch_policy: FetchPolicy,
    predict_url: Option<String>,
    logged_in_as: Option<String>,
}

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show => run_show(global),
        ConfigCommands::SetUrl { url } => run_set_url(&url, global),
        ConfigCommands::ResetUrl => run_reset_url(global),
        ConfigCommands::Path => run_path(global),
    }
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    let ctx = Context::load(global)?;
    let Config {
        object_structure,
        page_size,
        timeout_secs,
        fetch_policy,
        predict_url,
        ..
    } = ctx.config.clone();

    let effective = Effective {
        base_url: ctx.base_url.clone(),
        base_url_override: base_url_override(&ctx.store)?,
        object_structure,
        page_size,
        timeout_secs,
        fetch_policy,
        predict_url,
        logged_in_as: ctx.session().ok().map(|s| s.username),
    };

    match global.output {
        OutputFormat::Json | OutputFormat::Yaml => print_record(&effective, global.output),
        _ => {
            let row = |label: &str, value: &str| {
                println!("{:<18} {}", style(label).bold(), value);
            };
            row("base_url", &effective.base_url);
            if let Some(url) = &effective.base_url_override {
                row("  (override)", url);
            }
            row("object_structure", &effective.object_structure);
            row("page_size", &effective.page_size.to_string());
            row("timeout_secs", &effective.timeout_secs.to_string());
            row("fetch_policy", &effective.fetch_policy.to_string());
            row(
                "predict_url",
                effective.predict_url.as_deref().unwrap_or("(not set)"),
            );
            row(
                "logged in as",
                effective.logged_in_as.as_deref().unwrap_or("(nobody)"),
            );
            Ok(())
        }
    }
}

fn run_set_url(url: &str, global: &GlobalOpts) -> Result<()> {
    let mut ctx = Context::load(global)?;

    // Reject garbage before it is persisted
    let endpoints = check(
        Endpoints::new(url, &ctx.config.object_structure),
        global.output,
    )?;
    ctx.store.set(BASE_URL_KEY, endpoints.base())?;

    println!(
        "{} Base URL set to {}",
        style("✓").green(),
        style(endpoints.base()).cyan()
    );
    Ok(())
}

fn run_reset_url(global: &GlobalOpts) -> Result<()> {
    let mut ctx = Context::load(global)?;
    ctx.store.remove(BASE_URL_KEY)?;
    println!("{} Base URL override removed", style("✓").green());
    Ok(())
}

fn run_path(global: &GlobalOpts) -> Result<()> {
    let ctx = Context::load(global)?;
    println!("{}", ctx.paths.config_file().display());
    println!("{}", ctx.store.path().display());
    Ok(())
}
