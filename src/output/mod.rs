//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod list;
pub mod table;

/// Format a collection of records and print it to stdout
pub fn print_items<T: Tabled + Serialize>(items: &[T], format: OutputFormat) -> Result<()> {
    let output = match format {
        OutputFormat::Table => table::format_table(items),
        OutputFormat::List => list::format_list(items)?,
        OutputFormat::Json => json::format_json(items)?,
    };
    println!("{output}");
    Ok(())
}
