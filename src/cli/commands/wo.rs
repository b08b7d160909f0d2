//! `mxf wo` command - work order listing, lookup, creation and status changes

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::context::Context;
use crate::cli::filters::StatusFilter;
use crate::cli::helpers::{display_opt, is_interactive, value_or_prompt};
use crate::cli::output::{check, effective_format, print_outcome, print_record, report_mutation};
use crate::cli::table::{ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::WorkOrderStatus;
use crate::core::error::ClientError;
use crate::core::outcome::Outcome;
use crate::entities::{format_number, NewWorkOrder, WorkOrder};

#[derive(Subcommand, Debug)]
pub enum WoCommands {
    /// List work orders, one page at a time
    List(ListArgs),

    /// Find work orders by number
    Find {
        /// Work order number (wonum)
        wonum: String,
    },

    /// Show one work order
    Show {
        /// Work order id (workorderid)
        id: String,
    },

    /// Create a new work order
    New(NewArgs),

    /// Change the status of a work order
    Status {
        /// Work order id (workorderid)
        id: String,

        /// New status code (e.g. INPRG, COMP); prompted if omitted
        status: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Only show work orders in this status
    #[arg(long, short = 's', value_enum, default_value_t = StatusFilter::All)]
    pub status: StatusFilter,

    /// Limit output to N items
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Description (prompted if omitted)
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Site id (prompted if omitted)
    #[arg(long)]
    pub siteid: Option<String>,

    /// Work order number; assigned by the backend when omitted
    #[arg(long)]
    pub wonum: Option<String>,

    /// Location
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Asset number
    #[arg(long)]
    pub assetnum: Option<String>,

    /// Work type (e.g. CM, PM)
    #[arg(long)]
    pub worktype: Option<String>,

    /// Initial status
    #[arg(long)]
    pub status: Option<String>,
}

const WO_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 10),
    ColumnDef::new("wonum", "WONUM", 10),
    ColumnDef::new("description", "DESCRIPTION", 40),
    ColumnDef::new("status", "STATUS", 22),
    ColumnDef::new("priority", "PRI", 5),
    ColumnDef::new("location", "LOCATION", 14),
    ColumnDef::new("siteid", "SITE", 8),
];

fn wo_row(wo: &WorkOrder) -> TableRow {
    TableRow::new(display_opt(wo.workorderid.as_deref()))
        .cell("id", display_opt(wo.workorderid.as_deref()))
        .cell("wonum", display_opt(wo.wonum.as_deref()))
        .cell("description", display_opt(wo.description.as_deref()))
        .cell("status", wo.status_label())
        .cell("priority", format_number(wo.priority()))
        .cell("location", display_opt(wo.location.as_deref()))
        .cell("siteid", display_opt(wo.siteid.as_deref()))
}

pub async fn run(cmd: WoCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        WoCommands::List(args) => run_list(args, global).await,
        WoCommands::Find { wonum } => run_find(&wonum, global).await,
        WoCommands::Show { id } => run_show(&id, global).await,
        WoCommands::New(args) => run_new(args, global).await,
        WoCommands::Status { id, status } => run_status(&id, status, global).await,
    }
}

// =========================================================================
// Queries
// =========================================================================

async fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::load(global)?;
    let format = effective_format(global.output, true);
    let (client, token) = check(ctx.connect(), format)?;

    let page = check(client.list_work_orders(&token, args.page).await, format)?;
    let mut items: Vec<WorkOrder> = page
        .items
        .into_iter()
        .filter(|wo| args.status.matches(wo.status.as_ref()))
        .collect();
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
                println!("No work orders found on page {}.", page.page);
                return Ok(());
            }
            let rows: Vec<TableRow> = items.iter().map(wo_row).collect();
            TableFormatter::new(WO_COLUMNS, "work orders").output(&rows, format)?;
            if format == OutputFormat::Table && page.has_more {
                println!(
                    "{}",
                    style(format!("Next page: mxf wo list --page {}", page.page + 1)).dim()
                );
            }
            Ok(())
        }
    }
}

async fn run_find(wonum: &str, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::load(global)?;
    let format = effective_format(global.output, true);
    let (client, token) = check(ctx.connect(), format)?;

    let items = check(client.search_work_orders(&token, wonum).await, format)?;
    match format {
        OutputFormat::Json | OutputFormat::Yaml => print_outcome(&Outcome::ok(items), format),
        _ if items.is_empty() && format == OutputFormat::Table => {
            println!("No work order matches '{}'.", wonum);
            Ok(())
        }
        _ => {
            let rows: Vec<TableRow> = items.iter().map(wo_row).collect();
            TableFormatter::new(WO_COLUMNS, "work orders").output(&rows, format)
        }
    }
}

async fn run_show(id: &str, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::load(global)?;
    let format = effective_format(global.output, false);
    let (client, token) = check(ctx.connect(), format)?;

    let wo = check(client.get_work_order(&token, id).await, format)?;
    match format {
        OutputFormat::Id => {
            println!("{}", display_opt(wo.workorderid.as_deref()));
            Ok(())
        }
        OutputFormat::Table | OutputFormat::Tsv | OutputFormat::Csv => {
            TableFormatter::new(WO_COLUMNS, "work orders").output(&[wo_row(&wo)], format)
        }
        _ => print_record(&wo, format),
    }
}

// =========================================================================
// Mutations
// =========================================================================

async fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::load(global)?;
    let (client, token) = check(ctx.connect(), global.output)?;

    let work_order = NewWorkOrder {
        description: value_or_prompt(args.description, "Description")?,
        siteid: value_or_prompt(args.siteid, "Site")?,
        wonum: args.wonum,
        location: args.location,
        assetnum: args.assetnum,
        worktype: args.worktype,
        status: args.status.as_deref().map(WorkOrderStatus::from),
    };

    let result = client.create_work_order(&token, &work_order).await;
    report_mutation(result, global.output, "Created work order")
}

async fn run_status(id: &str, status: Option<String>, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::load(global)?;
    let (client, token) = check(ctx.connect(), global.output)?;

    let wo = check(client.get_work_order(&token, id).await, global.output)?;
    let new_status = match status {
        Some(code) => WorkOrderStatus::from(code.as_str()),
        None => pick_status(wo.status.as_ref())?,
    };

    if wo.status.as_ref() == Some(&new_status) {
        println!(
            "Work order {} is already {}.",
            style(id).cyan(),
            new_status.label()
        );
        return Ok(());
    }

    let result = client.update_status(&token, &wo, &new_status).await;
    report_mutation(
        result,
        global.output,
        &format!(
            "Work order {} moved from {} to {}",
            style(id).cyan(),
            wo.status_label(),
            style(new_status.label()).green()
        ),
    )
}

/// Ask for a status interactively, skipping the current one
fn pick_status(current: Option<&WorkOrderStatus>) -> Result<WorkOrderStatus> {
    if !is_interactive() {
        return Err(ClientError::InvalidInput("a new status is required".to_string()).into());
    }

    let choices: Vec<&WorkOrderStatus> = WorkOrderStatus::known()
        .iter()
        .filter(|s| Some(*s) != current)
        .collect();
    let labels: Vec<String> = choices
        .iter()
        .map(|s| format!("{:<7} {}", s.code(), s.label()))
        .collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("New status")
        .items(&labels)
        .default(0)
        .interact()
        .into_diagnostic()?;

    Ok(choices[selection].clone())
}
