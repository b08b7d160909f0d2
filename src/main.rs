use clap::Parser;
use miette::Result;
use mxfield::cli::commands::{
    activity, attach, auth, completions, config, labor, material, predict, wo, worklog,
};
use mxfield::cli::{Cli, Commands, GlobalOpts};
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the log filter
const LOG_ENV: &str = "MXF_LOG";

fn init_logging(global: &GlobalOpts) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(match (global.quiet, global.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "mxfield=info",
            (false, _) => "mxfield=debug",
        })
    });

    // Logs go to stderr so stdout stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    init_logging(&cli.global);
    let global = &cli.global;

    match cli.command {
        Commands::Login(args) => auth::run_login(args, global).await,
        Commands::Logout => auth::run_logout(global).await,
        Commands::Whoami => auth::run_whoami(global),
        Commands::Config(cmd) => config::run(cmd, global),
        Commands::Wo(cmd) => wo::run(cmd, global).await,
        Commands::Worklog(cmd) => worklog::run(cmd, global).await,
        Commands::Labtrans(cmd) => labor::run_labtrans(cmd, global).await,
        Commands::Wplabor(cmd) => labor::run_wplabor(cmd, global).await,
        Commands::Matusetrans(cmd) => material::run_matusetrans(cmd, global).await,
        Commands::Material(cmd) => material::run_material(cmd, global).await,
        Commands::Activity(cmd) => activity::run(cmd, global).await,
        Commands::Attach(cmd) => attach::run(cmd, global).await,
        Commands::Predict(args) => predict::run(args, global).await,
        Commands::Completions(args) => completions::run(args),
    }
}
