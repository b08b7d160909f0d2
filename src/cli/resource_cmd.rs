//! Shared sub-record command infrastructure
//!
//! Every work order child collection is listed and added the same way; this
//! module holds the common parts so the per-kind command files only describe
//! their arguments and columns.

use clap::Args;
use console::style;
use miette::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cli::context::Context;
use crate::cli::output::{check, effective_format, print_outcome, report_mutation};
use crate::cli::table::{ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::client::{DetailFailure, Expanded};
use crate::core::entity::SubRecord;
use crate::core::outcome::Outcome;
use crate::core::resource::ResourceKind;

// =========================================================================
// Resource Configuration
// =========================================================================

/// Static configuration for a child collection
pub struct ResourceConfig<T> {
    pub kind: ResourceKind,
    pub columns: &'static [ColumnDef],
    /// Build a list row from a record
    pub to_row: fn(&T) -> TableRow,
}

/// Arguments shared by every `list` subcommand
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Work order id (workorderid, not wonum)
    pub workorderid: String,

    /// Limit output to N items
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show count only, not the items
    #[arg(long)]
    pub count: bool,
}

// =========================================================================
// Common List Implementation
// =========================================================================

/// List an expanded collection
pub async fn run_list_expanded<T>(
    args: ListArgs,
    config: &ResourceConfig<T>,
    global: &GlobalOpts,
) -> Result<()>
where
    T: DeserializeOwned + Serialize,
{
    let ctx = Context::load(global)?;
    let format = effective_format(global.output, true);
    let (client, token) = check(ctx.connect(), format)?;

    let expanded: Expanded<T> = check(
        client
            .list_records(&token, &args.workorderid, config.kind)
            .await,
        format,
    )?;
    print_failures(&expanded.failures, config.kind);

    output_records(expanded.items, &args, config, format)
}

/// Print records in the requested format
pub fn output_records<T: Serialize>(
    mut items: Vec<T>,
    args: &ListArgs,
    config: &ResourceConfig<T>,
    format: OutputFormat,
) -> Result<()> {
    if let Some(limit) = args.limit {
        items.truncate(limit);
    }

    if args.count {
        println!("{}", items.len());
        return Ok(());
    }

    match format {
        OutputFormat::Json | OutputFormat::Yaml => print_outcome(&Outcome::ok(items), format),
        _ => {
            if items.is_empty() && format == OutputFormat::Table {
                print_no_results(config.kind.name_plural());
                return Ok(());
            }
            let rows: Vec<TableRow> = items.iter().map(config.to_row).collect();
            TableFormatter::new(config.columns, config.kind.name_plural()).output(&rows, format)
        }
    }
}

/// Warn about details skipped under best-effort fetching
pub fn print_failures(failures: &[DetailFailure], kind: ResourceKind) {
    if failures.is_empty() {
        return;
    }
    eprintln!(
        "{} {} {} could not be loaded:",
        style("!").yellow(),
        failures.len(),
        kind.name_plural()
    );
    for failure in failures {
        eprintln!("   {} {}", style(&failure.url).dim(), failure.error);
    }
}

/// Print "No X found" message
pub fn print_no_results(name_plural: &str) {
    println!("No {} found.", name_plural);
}

// =========================================================================
// Common Add Implementation
// =========================================================================

/// Add a child record to a work order and report the result
pub async fn run_add<R: SubRecord>(workorderid: &str, record: R, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::load(global)?;
    let (client, token) = check(ctx.connect(), global.output)?;

    let result = client.add_record(&token, workorderid, &record).await;
    report_mutation(
        result,
        global.output,
        &format!("Added {} to work order {}", R::KIND.name(), style(workorderid).cyan()),
    )
}
