//! `mxf login`, `mxf logout` and `mxf whoami`

use console::style;
use miette::Result;
use serde::Serialize;
use tracing::warn;

use crate::cli::context::Context;
use crate::cli::helpers::{secret_or_prompt, value_or_prompt};
use crate::cli::output::{check, print_outcome};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::client::MaximoClient;
use crate::core::config::{Config, Paths};
use crate::core::error::ClientError;
use crate::core::outcome::Outcome;
use crate::core::store::{clear_session, load_session, FileStore};

#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    /// Username (prompted if omitted)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Password (prompted if omitted)
    #[arg(long, short = 'p', env = "MXF_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// What login and whoami report; never includes secrets
#[derive(Debug, Serialize)]
struct SessionInfo {
    username: String,
    base_url: String,
}

pub async fn run_login(args: LoginArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = Context::load(global)?;
    let client = check(ctx.client(), global.output)?;

    let username = value_or_prompt(args.username, "Username")?;
    let password = secret_or_prompt(args.password, "Password")?;

    let session = check(
        client.login(&mut ctx.store, &username, &password).await,
        global.output,
    )?;

    let info = SessionInfo {
        username: session.username,
        base_url: ctx.base_url,
    };
    match global.output {
        OutputFormat::Json | OutputFormat::Yaml => print_outcome(&Outcome::ok(info), global.output),
        _ => {
            println!(
                "{} Logged in as {} at {}",
                style("✓").green(),
                style(&info.username).cyan(),
                style(&info.base_url).dim()
            );
            Ok(())
        }
    }
}

pub async fn run_logout(global: &GlobalOpts) -> Result<()> {
    // Nothing about config or the server may keep the session on disk
    let paths = check(Paths::discover().map_err(Into::into), global.output)?;
    let mut store = check(
        FileStore::open_or_reset(paths.store_file()).map_err(Into::into),
        global.output,
    )?;

    let client = Config::load_from(&paths.config_file())
        .map_err(ClientError::from)
        .and_then(|config| {
            let base_url = config.resolve_base_url(global.base_url.as_deref(), &store)?;
            MaximoClient::from_config(&config, &base_url)
        });

    match client {
        Ok(client) => check(client.logout(&mut store).await, global.output)?,
        Err(e) => {
            warn!(error = %e, "skipping server logout");
            check(clear_session(&mut store).map_err(Into::into), global.output)?
        }
    }

    match global.output {
        OutputFormat::Json | OutputFormat::Yaml => {
            print_outcome(&Outcome::<()>::done(), global.output)
        }
        _ => {
            println!("{} Logged out", style("✓").green());
            Ok(())
        }
    }
}

pub fn run_whoami(global: &GlobalOpts) -> Result<()> {
    let ctx = Context::load(global)?;
    let session = check(load_session(&ctx.store).map_err(Into::into), global.output)?;

    let info = session.map(|s| SessionInfo {
        username: s.username,
        base_url: ctx.base_url.clone(),
    });

    match (global.output, info) {
        (OutputFormat::Json | OutputFormat::Yaml, Some(info)) => {
            print_outcome(&Outcome::ok(info), global.output)
        }
        (OutputFormat::Json | OutputFormat::Yaml, None) => {
            print_outcome(&Outcome::<()>::done(), global.output)
        }
        (_, Some(info)) => {
            println!("{}: {}", style("User").bold(), style(&info.username).cyan());
            println!("{}: {}", style("Server").bold(), info.base_url);
            Ok(())
        }
        (_, None) => {
            println!("Not logged in.");
            println!();
            println!("Log in with: {}", style("mxf login").yellow());
            Ok(())
        }
    }
}
