//
//  sysdig-client
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Formatting for the `sysdig` binary. Results are printed either as
//! human-readable tables or as pretty JSON for scripting:
//!
//! - [`table`]: Table formatting utilities using `comfy_table`
//! - [`json`]: JSON serialization utilities using `serde_json`
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: Table or JSON
//! - [`OutputWriter`]: Main entry point for writing formatted output
//! - [`TableOutput`]: Detail view of a single record
//! - [`TableRow`]: One row of a list view
//!
//! ## Example
//!
//! ```rust,ignore
//! use sysdig_client::output::{OutputWriter, OutputFormat};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write_list(&rows, "No teams found.")?;
//! writer.write_success("Dumped 4 notification channels");
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use serde::Serialize;

/// The available output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format with optional color support.
    #[default]
    Table,
    /// Pretty-printed JSON for scripting and automation.
    Json,
}

impl OutputFormat {
    /// Picks the format from the global `--json` flag.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// A unified output writer for records, lists and status messages.
///
/// Color output is detected from the terminal and disabled when output is
/// piped or `NO_COLOR` is set.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a new output writer with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Writes a single record.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value)?,
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a list of records as one table, or as a JSON array.
    ///
    /// An empty list prints `empty` in table mode and `[]` in JSON mode.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T], empty: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(values)?,
            OutputFormat::Table if values.is_empty() => println!("{}", empty),
            OutputFormat::Table => {
                TableBuilder::new()
                    .color(self.color)
                    .headers(T::headers().iter().copied())
                    .rows(values.iter().map(|v| v.row(self.color)))
                    .print();
            }
        }
        Ok(())
    }

    /// Writes a success message to stderr so stdout stays parseable.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("✓").green().bold(), msg);
        } else {
            eprintln!("✓ {}", msg);
        }
    }
}

/// Detail rendering of a single record.
///
/// ```rust,ignore
/// use sysdig_client::output::{TableOutput, print_field, print_header};
///
/// impl TableOutput for TeamDetail {
///     fn print_table(&self, color: bool) {
///         print_header(&self.name);
///         print_field("ID", &self.id.to_string(), color);
///         print_field("Product", &self.product, color);
///     }
/// }
/// ```
pub trait TableOutput {
    /// Renders the record as a labelled section.
    fn print_table(&self, color: bool);
}

/// One row of a list table.
pub trait TableRow {
    /// Column headers, in the same order as [`TableRow::row`].
    fn headers() -> &'static [&'static str];

    /// The cells of this row.
    fn row(&self, color: bool) -> Vec<String>;
}

/// Prints a bold header with an underline.
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a key-value pair. The key is dimmed when color is enabled.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
