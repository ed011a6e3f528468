//! Output formatters for ordered documents.

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use ordex_core::{EntityDef, FieldType};
use serde_json::Value as Json;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter {
    /// Format ordered documents described by `entity`.
    fn format_rows(&self, entity: &EntityDef, rows: &[Json]) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_rows(&self, entity: &EntityDef, rows: &[Json]) -> String {
        if rows.is_empty() {
            return "No results".to_string();
        }

        let columns = columns(entity);
        let mut table = Table::new();
        table.set_header(columns.iter().map(Cell::new).collect::<Vec<_>>());

        for row in rows {
            let cells: Vec<Cell> = columns
                .iter()
                .map(|column| Cell::new(format_cell(lookup(row, column))))
                .collect();
            table.add_row(cells);
        }

        format!("{}\n{} row(s)", table, rows.len())
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_rows(&self, _entity: &EntityDef, rows: &[Json]) -> String {
        serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
    }
}

/// CSV formatter.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_rows(&self, entity: &EntityDef, rows: &[Json]) -> String {
        let columns = columns(entity);
        let mut output = String::new();

        let header: Vec<String> = columns.iter().map(|c| escape_csv(c)).collect();
        output.push_str(&header.join(","));
        output.push('\n');

        for row in rows {
            let values: Vec<String> = columns
                .iter()
                .map(|column| escape_csv(&format_cell(lookup(row, column))))
                .collect();
            output.push_str(&values.join(","));
            output.push('\n');
        }

        output
    }
}

/// Flattened column names, with embedded entities expanded into dotted paths.
pub fn columns(entity: &EntityDef) -> Vec<String> {
    let mut out = Vec::new();
    collect_columns(entity, "", &mut out);
    out
}

fn collect_columns(entity: &EntityDef, prefix: &str, out: &mut Vec<String>) {
    for field in &entity.fields {
        let name = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{}.{}", prefix, field.name)
        };

        match &field.field_type {
            FieldType::Embedded(nested) | FieldType::OptionalEmbedded(nested) => {
                collect_columns(&nested.load(), &name, out);
            }
            _ => out.push(name),
        }
    }
}

/// Look up a dotted column in a document.
fn lookup<'a>(doc: &'a Json, column: &str) -> Option<&'a Json> {
    column
        .split('.')
        .try_fold(doc, |current, segment| current.as_object()?.get(segment))
}

fn format_cell(value: Option<&Json>) -> String {
    match value {
        None | Some(Json::Null) => "NULL".to_string(),
        Some(Json::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
