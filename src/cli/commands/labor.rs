//! `mxf labtrans` and `mxf wplabor` commands - actual and planned labor

use clap::Subcommand;
use miette::Result;

use crate::cli::context::Context;
use crate::cli::helpers::{display_opt, short_timestamp, value_or_prompt};
use crate::cli::output::{check, effective_format};
use crate::cli::resource_cmd::{output_records, run_add, run_list_expanded, ListArgs, ResourceConfig};
use crate::cli::table::{ColumnDef, TableRow};
use crate::cli::GlobalOpts;
use crate::core::resource::ResourceKind;
use crate::entities::{
    format_number, LaborTransaction, NewLaborTransaction, NewPlannedLabor, PlannedLabor,
};

// =========================================================================
// Labor transactions (LABTRANS)
// =========================================================================

#[derive(Subcommand, Debug)]
pub enum LabtransCommands {
    /// List labor transactions
    List(ListArgs),

    /// Report labor hours
    Add {
        /// Work order id (workorderid)
        workorderid: String,

        /// Labor code (prompted if omitted)
        #[arg(long, short = 'l')]
        laborcode: Option<String>,

        /// Organization id (prompted if omitted)
        #[arg(long)]
        orgid: Option<String>,

        /// Regular hours worked
        #[arg(long)]
        hours: f64,

        /// Quantity
        #[arg(long, default_value_t = 1.0)]
        quantity: f64,

        /// Pay rate
        #[arg(long, default_value_t = 0.0)]
        rate: f64,
    },
}

const LABTRANS_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 10),
    ColumnDef::new("laborcode", "LABOR", 12),
    ColumnDef::new("craft", "CRAFT", 10),
    ColumnDef::new("hours", "HOURS", 7),
    ColumnDef::new("rate", "RATE", 8),
    ColumnDef::new("cost", "COST", 10),
    ColumnDef::new("start", "START", 16),
];

fn labtrans_row(tx: &LaborTransaction) -> TableRow {
    TableRow::new(display_opt(tx.labtransid.as_deref()))
        .cell("id", display_opt(tx.labtransid.as_deref()))
        .cell("laborcode", display_opt(tx.laborcode.as_deref()))
        .cell("craft", display_opt(tx.craft.as_deref()))
        .cell("hours", format_number(tx.regularhrs))
        .cell("rate", format_number(tx.payrate))
        .cell("cost", format_number(tx.linecost))
        .cell("start", short_timestamp(tx.startdate.as_deref()))
}

const LABTRANS_CONFIG: ResourceConfig<LaborTransaction> = ResourceConfig {
    kind: ResourceKind::LaborTransaction,
    columns: LABTRANS_COLUMNS,
    to_row: labtrans_row,
};

pub async fn run_labtrans(cmd: LabtransCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        LabtransCommands::List(args) => run_list_expanded(args, &LABTRANS_CONFIG, global).await,
        LabtransCommands::Add {
            workorderid,
            laborcode,
            orgid,
            hours,
            quantity,
            rate,
        } => {
            let record = NewLaborTransaction {
                laborcode: value_or_prompt(laborcode, "Labor code")?,
                orgid: value_or_prompt(orgid, "Organization")?,
                regularhrs: hours,
                quantity,
                rate,
                ratehaschanged: false,
                apptrequired: false,
            };
            run_add(&workorderid, record, global).await
        }
    }
}

// =========================================================================
// Planned labor (WPLABOR)
// =========================================================================

#[derive(Subcommand, Debug)]
pub enum WplaborCommands {
    /// List planned labor
    List(ListArgs),

    /// Plan labor on a work order
    Add {
        /// Work order id (workorderid)
        workorderid: String,

        /// Labor code (prompted if omitted)
        #[arg(long, short = 'l')]
        laborcode: Option<String>,

        /// Organization id (prompted if omitted)
        #[arg(long)]
        orgid: Option<String>,

        /// Planned hours
        #[arg(long)]
        hours: f64,

        /// Number of people
        #[arg(long, default_value_t = 1.0)]
        quantity: f64,

        /// Rate
        #[arg(long, default_value_t = 0.0)]
        rate: f64,
    },
}

const WPLABOR_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 12),
    ColumnDef::new("laborcode", "LABOR", 12),
    ColumnDef::new("craft", "CRAFT", 10),
    ColumnDef::new("hours", "HOURS", 7),
    ColumnDef::new("quantity", "QTY", 5),
    ColumnDef::new("rate", "RATE", 8),
    ColumnDef::new("cost", "COST", 10),
];

fn wplabor_row(plan: &PlannedLabor) -> TableRow {
    TableRow::new(display_opt(plan.wplaborid.as_deref()))
        .cell("id", display_opt(plan.wplaborid.as_deref()))
        .cell("laborcode", display_opt(plan.laborcode.as_deref()))
        .cell("craft", display_opt(plan.craft.as_deref()))
        .cell("hours", format_number(plan.laborhrs))
        .cell("quantity", format_number(plan.quantity))
        .cell("rate", format_number(plan.rate))
        .cell("cost", format_number(plan.linecost))
}

const WPLABOR_CONFIG: ResourceConfig<PlannedLabor> = ResourceConfig {
    kind: ResourceKind::PlannedLabor,
    columns: WPLABOR_COLUMNS,
    to_row: wplabor_row,
};

pub async fn run_wplabor(cmd: WplaborCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        WplaborCommands::List(args) => {
            // Planned labor is not expanded; one request returns the rows
            let ctx = Context::load(global)?;
            let format = effective_format(global.output, true);
            let (client, token) = check(ctx.connect(), format)?;
            let items = check(client.planned_labor(&token, &args.workorderid).await, format)?;
            output_records(items, &args, &WPLABOR_CONFIG, format)
        }
        WplaborCommands::Add {
            workorderid,
            laborcode,
            orgid,
            hours,
            quantity,
            rate,
        } => {
            let record = NewPlannedLabor::new(
                value_or_prompt(laborcode, "Labor code")?,
                value_or_prompt(orgid, "Organization")?,
                hours,
                quantity,
                rate,
            );
            run_add(&workorderid, record, global).await
        }
    }
}
