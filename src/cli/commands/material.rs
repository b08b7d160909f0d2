//! `mxf matusetrans` and `mxf material` commands - used and planned materials

use clap::Subcommand;
use miette::Result;

use crate::cli::helpers::{display_opt, short_timestamp, value_or_prompt};
use crate::cli::resource_cmd::{run_add, run_list_expanded, ListArgs, ResourceConfig};
use crate::cli::table::{ColumnDef, TableRow};
use crate::cli::GlobalOpts;
use crate::core::resource::ResourceKind;
use crate::entities::{format_number, MaterialTransaction, NewPlannedMaterial, PlannedMaterial};

// =========================================================================
// Material transactions (MATUSETRANS)
// =========================================================================

#[derive(Subcommand, Debug)]
pub enum MatusetransCommands {
    /// List materials issued to a work order
    List(ListArgs),
}

const MATUSETRANS_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 10),
    ColumnDef::new("itemnum", "ITEM", 12),
    ColumnDef::new("description", "DESCRIPTION", 30),
    ColumnDef::new("quantity", "QTY", 6),
    ColumnDef::new("cost", "COST", 10),
    ColumnDef::new("storeloc", "STORE", 10),
    ColumnDef::new("issuetype", "TYPE", 8),
    ColumnDef::new("date", "DATE", 16),
];

fn matusetrans_row(tx: &MaterialTransaction) -> TableRow {
    TableRow::new(display_opt(tx.matusetransid.as_deref()))
        .cell("id", display_opt(tx.matusetransid.as_deref()))
        .cell("itemnum", display_opt(tx.itemnum.as_deref()))
        .cell("description", display_opt(tx.description.as_deref()))
        .cell("quantity", format_number(tx.quantity))
        .cell("cost", format_number(tx.linecost))
        .cell("storeloc", display_opt(tx.storeloc.as_deref()))
        .cell("issuetype", display_opt(tx.issuetype.as_deref()))
        .cell("date", short_timestamp(tx.transdate.as_deref()))
}

const MATUSETRANS_CONFIG: ResourceConfig<MaterialTransaction> = ResourceConfig {
    kind: ResourceKind::MaterialTransaction,
    columns: MATUSETRANS_COLUMNS,
    to_row: matusetrans_row,
};

pub async fn run_matusetrans(cmd: MatusetransCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        MatusetransCommands::List(args) => {
            run_list_expanded(args, &MATUSETRANS_CONFIG, global).await
        }
    }
}

// =========================================================================
// Planned materials (WPMATERIAL)
// =========================================================================

#[derive(Subcommand, Debug)]
pub enum MaterialCommands {
    /// List planned materials
    List(ListArgs),

    /// Plan a material on a work order
    Add {
        /// Work order id (workorderid)
        workorderid: String,

        /// Item number (prompted if omitted)
        #[arg(long, short = 'i')]
        itemnum: Option<String>,

        /// Storeroom location (prompted if omitted)
        #[arg(long, short = 'l')]
        location: Option<String>,

        /// Unit cost
        #[arg(long, default_value_t = 0.0)]
        unitcost: f64,

        /// Line cost
        #[arg(long, default_value_t = 0.0)]
        linecost: f64,

        /// Reservation type
        #[arg(long, default_value = "AUTOMATIC")]
        restype: String,

        /// Direct issue request
        #[arg(long)]
        directreq: bool,

        /// Storeroom site
        #[arg(long)]
        storelocsite: Option<String>,

        /// Requested by
        #[arg(long)]
        requestby: Option<String>,

        /// Work order description to set alongside the line
        #[arg(long, short = 'd')]
        description: Option<String>,
    },
}

const MATERIAL_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 10),
    ColumnDef::new("itemnum", "ITEM", 12),
    ColumnDef::new("description", "DESCRIPTION", 30),
    ColumnDef::new("quantity", "QTY", 6),
    ColumnDef::new("unitcost", "UNIT", 8),
    ColumnDef::new("cost", "COST", 10),
    ColumnDef::new("location", "STORE", 10),
    ColumnDef::new("restype", "RESERVE", 10),
];

fn material_row(line: &PlannedMaterial) -> TableRow {
    TableRow::new(display_opt(line.wpitemid.as_deref()))
        .cell("id", display_opt(line.wpitemid.as_deref()))
        .cell("itemnum", display_opt(line.itemnum.as_deref()))
        .cell("description", display_opt(line.description.as_deref()))
        .cell("quantity", format_number(line.itemqty))
        .cell("unitcost", format_number(line.unitcost))
        .cell("cost", format_number(line.linecost))
        .cell("location", display_opt(line.location.as_deref()))
        .cell("restype", display_opt(line.restype.as_deref()))
}

const MATERIAL_CONFIG: ResourceConfig<PlannedMaterial> = ResourceConfig {
    kind: ResourceKind::PlannedMaterial,
    columns: MATERIAL_COLUMNS,
    to_row: material_row,
};

pub async fn run_material(cmd: MaterialCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        MaterialCommands::List(args) => run_list_expanded(args, &MATERIAL_CONFIG, global).await,
        MaterialCommands::Add {
            workorderid,
            itemnum,
            location,
            unitcost,
            linecost,
            restype,
            directreq,
            storelocsite,
            requestby,
            description,
        } => {
            let record = NewPlannedMaterial {
                description,
                itemnum: value_or_prompt(itemnum, "Item")?,
                unitcost,
                linecost,
                location: value_or_prompt(location, "Storeroom")?,
                restype,
                directreq,
                storelocsite,
                requestby,
            };
            run_add(&workorderid, record, global).await
        }
    }
}
