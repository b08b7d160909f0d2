//! `mxf predict` command - maintenance recommendation for a work order

use console::style;
use miette::Result;
use serde::Serialize;

use crate::cli::context::Context;
use crate::cli::output::{check, effective_format, print_record};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::{PredictionInput, Recommendation};

#[derive(clap::Args, Debug)]
pub struct PredictArgs {
    /// Work order id (numeric workorderid)
    pub workorderid: String,

    /// Only build and print the model input, do not call the service
    #[arg(long)]
    pub input_only: bool,
}

#[derive(Debug, Serialize)]
struct PredictionReport {
    input: PredictionInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendation: Option<Recommendation>,
}

pub async fn run(args: PredictArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::load(global)?;
    let format = effective_format(global.output, false);
    let (client, token) = check(ctx.connect(), format)?;

    let input = check(
        client.prediction_input(&token, &args.workorderid).await,
        format,
    )?;
    let recommendation = if args.input_only {
        None
    } else {
        check(client.predict(&input).await, format)?
    };

    match format {
        OutputFormat::Json | OutputFormat::Yaml => print_record(
            &PredictionReport {
                input,
                recommendation,
            },
            format,
        ),
        _ => {
            println!("{}", style("Model input").bold());
            println!("  asset type       {}", input.asset_type.as_deref().unwrap_or("-"));
            println!("  failure code     {}", input.failure_code.as_deref().unwrap_or("-"));
            println!("  problem code     {}", input.problem_code.as_deref().unwrap_or("-"));
            println!("  failure freq.    {}", input.failure_frequency);
            println!("  equipment age    {} years", input.age_equipment);
            println!(
                "  priority         {}",
                if input.priority.is_empty() { "-" } else { input.priority.as_str() }
            );

            if args.input_only {
                return Ok(());
            }
            println!();
            match recommendation {
                Some(Recommendation {
                    action: Some(action),
                    ..
                }) => println!("{} {}", style("Recommended action:").green().bold(), action),
                Some(_) => println!("The prediction service returned no action."),
                None => println!(
                    "{} No prediction service configured (set predict_url in {})",
                    style("!").yellow(),
                    ctx.paths.config_file().display()
                ),
            }
            Ok(())
        }
    }
}
