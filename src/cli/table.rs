//! Tabular list output (table, TSV, CSV, id)

use console::style;
use miette::{IntoDiagnostic, Result};
use std::collections::HashMap;
use std::io;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::helpers::truncate_str;
use crate::cli::OutputFormat;

/// One column of a list
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    /// Key used when filling rows
    pub key: &'static str,
    /// Header text
    pub header: &'static str,
    /// Maximum cell width in table output
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A list row keyed by column
#[derive(Debug, Clone, Default)]
pub struct TableRow {
    pub id: String,
    cells: HashMap<&'static str, String>,
}

impl TableRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cells: HashMap::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.cells.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> &str {
        self.cells.get(key).map(String::as_str).unwrap_or("")
    }
}

/// Renders rows in the tabular output formats
pub struct TableFormatter {
    columns: &'static [ColumnDef],
    name_plural: &'static str,
}

impl TableFormatter {
    pub fn new(columns: &'static [ColumnDef], name_plural: &'static str) -> Self {
        Self {
            columns,
            name_plural,
        }
    }

    /// Print rows in `format`; structured formats are handled by the caller
    pub fn output(&self, rows: &[TableRow], format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Id => {
                for row in rows {
                    println!("{}", row.id);
                }
            }
            OutputFormat::Tsv => {
                let headers: Vec<&str> = self.columns.iter().map(|c| c.header).collect();
                println!("{}", headers.join("\t"));
                for row in rows {
                    let cells: Vec<String> = self
                        .columns
                        .iter()
                        .map(|c| tsv_cell(row.get(c.key)))
                        .collect();
                    println!("{}", cells.join("\t"));
                }
            }
            OutputFormat::Csv => self.write_csv(rows, io::stdout())?,
            _ => {
                println!("{}", self.render_table(rows));
                println!();
                println!(
                    "{} {} found",
                    style(rows.len()).cyan(),
                    self.name_plural
                );
            }
        }
        Ok(())
    }

    /// Aligned table with cells cut to their column width
    pub fn render_table(&self, rows: &[TableRow]) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.columns.iter().map(|c| c.header.to_string()));
        for row in rows {
            builder.push_record(
                self.columns
                    .iter()
                    .map(|c| truncate_str(&single_line(row.get(c.key)), c.width)),
            );
        }
        let mut table = builder.build();
        table.with(Style::sharp());
        table.to_string()
    }

    pub fn write_csv<W: io::Write>(&self, rows: &[TableRow], out: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer
            .write_record(self.columns.iter().map(|c| c.header))
            .into_diagnostic()?;
        for row in rows {
            writer
                .write_record(self.columns.iter().map(|c| row.get(c.key)))
                .into_diagnostic()?;
        }
        writer.flush().into_diagnostic()?;
        Ok(())
    }
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn tsv_cell(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}
