//! `mxf attach` command - work order attachments

use std::path::PathBuf;

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::context::Context;
use crate::cli::helpers::{display_opt, short_timestamp, value_or_prompt};
use crate::cli::output::{check, effective_format, report_mutation};
use crate::cli::resource_cmd::{output_records, ListArgs, ResourceConfig};
use crate::cli::table::{ColumnDef, TableRow};
use crate::cli::GlobalOpts;
use crate::core::resource::ResourceKind;
use crate::entities::{Attachment, AttachmentUpload};

#[derive(Subcommand, Debug)]
pub enum AttachCommands {
    /// List attachments
    List(ListArgs),

    /// Upload a file
    Upload {
        /// Work order id (workorderid)
        workorderid: String,

        /// File to upload
        file: PathBuf,

        /// Name shown in Maximo (defaults to the file name)
        #[arg(long)]
        name: Option<String>,

        /// Description (prompted if omitted)
        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// Delete an attachment
    Delete {
        /// Work order id (workorderid)
        workorderid: String,

        /// Attachment id as shown by `attach list`
        id: String,
    },
}

const ATTACH_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 10),
    ColumnDef::new("name", "NAME", 30),
    ColumnDef::new("description", "DESCRIPTION", 30),
    ColumnDef::new("type", "TYPE", 12),
    ColumnDef::new("by", "BY", 12),
    ColumnDef::new("created", "CREATED", 16),
];

fn attach_row(att: &Attachment) -> TableRow {
    let id = att.doclink_id().unwrap_or_default();
    TableRow::new(id.clone())
        .cell("id", id)
        .cell("name", display_opt(att.file_name.as_deref()))
        .cell("description", display_opt(att.description.as_deref()))
        .cell("type", display_opt(att.doc_type.as_deref()))
        .cell("by", display_opt(att.created_by.as_deref()))
        .cell("created", short_timestamp(att.created.as_deref()))
}

const ATTACH_CONFIG: ResourceConfig<Attachment> = ResourceConfig {
    kind: ResourceKind::Attachment,
    columns: ATTACH_COLUMNS,
    to_row: attach_row,
};

pub async fn run(cmd: AttachCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        AttachCommands::List(args) => run_list(args, global).await,
        AttachCommands::Upload {
            workorderid,
            file,
            name,
            description,
        } => run_upload(&workorderid, file, name, description, global).await,
        AttachCommands::Delete { workorderid, id } => run_delete(&workorderid, &id, global).await,
    }
}

async fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::load(global)?;
    let format = effective_format(global.output, true);
    let (client, token) = check(ctx.connect(), format)?;

    let items = check(
        client.list_attachments(&token, &args.workorderid).await,
        format,
    )?;
    output_records(items, &args, &ATTACH_CONFIG, format)
}

async fn run_upload(
    workorderid: &str,
    file: PathBuf,
    name: Option<String>,
    description: Option<String>,
    global: &GlobalOpts,
) -> Result<()> {
    let ctx = Context::load(global)?;
    let (client, token) = check(ctx.connect(), global.output)?;

    let name = name.unwrap_or_else(|| {
        file.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    let upload = AttachmentUpload {
        description: value_or_prompt(description, "Description")?,
        name,
        path: file,
    };

    let result = client.upload_attachment(&token, workorderid, &upload).await;
    report_mutation(
        result,
        global.output,
        &format!(
            "Attached {} to work order {}",
            style(&upload.name).cyan(),
            style(workorderid).cyan()
        ),
    )
}

async fn run_delete(workorderid: &str, id: &str, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::load(global)?;
    let (client, token) = check(ctx.connect(), global.output)?;

    let result = client.delete_attachment(&token, workorderid, id).await;
    report_mutation(
        result,
        global.output,
        &format!("Deleted attachment {} from work order {}", id, workorderid),
    )
}
