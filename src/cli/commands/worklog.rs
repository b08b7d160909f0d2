//! `mxf worklog` command - work log entries on a work order

use clap::Subcommand;
use miette::Result;

use crate::cli::helpers::{display_opt, short_timestamp, value_or_prompt};
use crate::cli::resource_cmd::{run_add, run_list_expanded, ListArgs, ResourceConfig};
use crate::cli::table::{ColumnDef, TableRow};
use crate::cli::GlobalOpts;
use crate::core::resource::ResourceKind;
use crate::entities::{NewWorkLog, WorkLogEntry};

#[derive(Subcommand, Debug)]
pub enum WorklogCommands {
    /// List work log entries
    List(ListArgs),

    /// Add a work log entry
    Add {
        /// Work order id (workorderid)
        workorderid: String,

        /// Entry text (prompted if omitted)
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Log type (e.g. CLIENTNOTE, WORK, UPDATE)
        #[arg(long, short = 't')]
        logtype: Option<String>,

        /// Make the entry visible to the client
        #[arg(long)]
        client_viewable: bool,
    },
}

const WORKLOG_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 10),
    ColumnDef::new("type", "TYPE", 12),
    ColumnDef::new("description", "DESCRIPTION", 50),
    ColumnDef::new("by", "BY", 12),
    ColumnDef::new("date", "DATE", 16),
];

fn worklog_row(entry: &WorkLogEntry) -> TableRow {
    TableRow::new(display_opt(entry.worklogid.as_deref()))
        .cell("id", display_opt(entry.worklogid.as_deref()))
        .cell("type", display_opt(entry.logtype.as_deref()))
        .cell("description", display_opt(entry.description.as_deref()))
        .cell("by", display_opt(entry.createby.as_deref()))
        .cell("date", short_timestamp(entry.createdate.as_deref()))
}

const WORKLOG_CONFIG: ResourceConfig<WorkLogEntry> = ResourceConfig {
    kind: ResourceKind::WorkLog,
    columns: WORKLOG_COLUMNS,
    to_row: worklog_row,
};

pub async fn run(cmd: WorklogCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        WorklogCommands::List(args) => run_list_expanded(args, &WORKLOG_CONFIG, global).await,
        WorklogCommands::Add {
            workorderid,
            description,
            logtype,
            client_viewable,
        } => {
            let entry = NewWorkLog {
                description: value_or_prompt(description, "Entry")?,
                logtype,
                clientviewable: client_viewable,
            };
            run_add(&workorderid, entry, global).await
        }
    }
}
