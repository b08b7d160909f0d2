//! `mxf activity` command - child activities of a work order

use clap::Subcommand;
use miette::Result;

use crate::cli::helpers::{display_opt, value_or_prompt};
use crate::cli::resource_cmd::{run_add, run_list_expanded, ListArgs, ResourceConfig};
use crate::cli::table::{ColumnDef, TableRow};
use crate::cli::GlobalOpts;
use crate::core::entity::WorkOrderStatus;
use crate::core::resource::ResourceKind;
use crate::entities::{Activity, NewActivity};

#[derive(Subcommand, Debug)]
pub enum ActivityCommands {
    /// List activities
    List(ListArgs),

    /// Add an activity
    Add {
        /// Work order id (workorderid)
        workorderid: String,

        /// Activity description (prompted if omitted)
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Asset number
        #[arg(long)]
        assetnum: Option<String>,

        /// Location
        #[arg(long, short = 'l')]
        location: Option<String>,

        /// Initial status
        #[arg(long)]
        status: Option<String>,
    },
}

const ACTIVITY_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("task", "TASK", 6),
    ColumnDef::new("wonum", "WONUM", 10),
    ColumnDef::new("description", "DESCRIPTION", 40),
    ColumnDef::new("status", "STATUS", 10),
    ColumnDef::new("assetnum", "ASSET", 10),
    ColumnDef::new("location", "LOCATION", 14),
];

fn activity_row(activity: &Activity) -> TableRow {
    TableRow::new(display_opt(activity.workorderid.as_deref()))
        .cell(
            "task",
            activity.taskid.map(|t| t.to_string()).unwrap_or_default(),
        )
        .cell("wonum", display_opt(activity.wonum.as_deref()))
        .cell("description", display_opt(activity.description.as_deref()))
        .cell(
            "status",
            activity
                .status
                .as_ref()
                .map(|s| s.code().to_string())
                .unwrap_or_default(),
        )
        .cell("assetnum", display_opt(activity.assetnum.as_deref()))
        .cell("location", display_opt(activity.location.as_deref()))
}

const ACTIVITY_CONFIG: ResourceConfig<Activity> = ResourceConfig {
    kind: ResourceKind::Activity,
    columns: ACTIVITY_COLUMNS,
    to_row: activity_row,
};

pub async fn run(cmd: ActivityCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ActivityCommands::List(args) => run_list_expanded(args, &ACTIVITY_CONFIG, global).await,
        ActivityCommands::Add {
            workorderid,
            description,
            assetnum,
            location,
            status,
        } => {
            let record = NewActivity {
                description: value_or_prompt(description, "Description")?,
                assetnum,
                location,
                status: status.as_deref().map(WorkOrderStatus::from),
            };
            run_add(&workorderid, record, global).await
        }
    }
}
