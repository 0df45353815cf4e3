//
//  sysdig-client
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Tabular output built on `comfy_table`, with UTF-8 borders and dynamic
//! column widths.
//!
//! ```rust,ignore
//! use sysdig_client::output::TableBuilder;
//!
//! TableBuilder::new()
//!     .headers(["ID", "NAME", "PRODUCT"])
//!     .rows([["1", "Monitor Operations", "SDC"], ["2", "Secure Operations", "SDS"]])
//!     .print();
//! ```

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Creates a new table with UTF-8 borders and dynamic arrangement.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// A builder for constructing formatted tables with a fluent API.
///
/// Headers are cyan when color is enabled. Color support is detected on
/// creation; use [`color`](TableBuilder::color) to override it.
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    /// Sets whether color output is enabled.
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Sets the table headers.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(|s| s.into()).collect();
        if self.color {
            let header_cells: Vec<Cell> = headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect();
            self.table.set_header(header_cells);
        } else {
            self.table.set_header(headers);
        }
        self
    }

    /// Adds multiple rows to the table at once.
    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            let row: Vec<String> = row.into_iter().map(|s| s.into()).collect();
            self.table.add_row(row);
        }
        self
    }

    /// Renders the table with its borders.
    pub fn render(&self) -> String {
        self.table.to_string()
    }

    /// Prints the table to stdout.
    pub fn print(self) {
        println!("{}", self.render());
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a boolean as `Yes`/`No`, green or dimmed when colored.
pub fn format_bool(value: bool, color: bool) -> String {
    if color {
        use console::style;
        if value {
            style("Yes").green().to_string()
        } else {
            style("No").dim().to_string()
        }
    } else if value {
        "Yes".to_string()
    } else {
        "No".to_string()
    }
}

/// Formats a policy severity (0-7) as its level name.
///
/// Levels are red for high, yellow for medium and cyan for low when colored.
pub fn format_severity(severity: i32, color: bool) -> String {
    use console::style;
    let label = match severity {
        0..=3 => "high",
        4..=5 => "medium",
        6 => "low",
        _ => "info",
    };
    if !color {
        return label.to_string();
    }
    match label {
        "high" => style(label).red().bold().to_string(),
        "medium" => style(label).yellow().to_string(),
        "low" => style(label).cyan().to_string(),
        _ => style(label).dim().to_string(),
    }
}

/// Truncates a string to `max_len` characters, ending in `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("équipe sécurité", 9), "équipe...");
    }

    #[test]
    fn test_format_bool_plain() {
        assert_eq!(format_bool(true, false), "Yes");
        assert_eq!(format_bool(false, false), "No");
    }

    #[test]
    fn test_format_severity_plain() {
        assert_eq!(format_severity(0, false), "high");
        assert_eq!(format_severity(3, false), "high");
        assert_eq!(format_severity(5, false), "medium");
        assert_eq!(format_severity(6, false), "low");
        assert_eq!(format_severity(7, false), "info");
    }

    #[test]
    fn test_table_contains_cells() {
        let table = TableBuilder::new()
            .color(false)
            .headers(["ID", "NAME"])
            .rows([["1", "ops"]]);
        let rendered = table.render();
        assert!(rendered.contains("NAME"));
        assert!(rendered.contains("ops"));
    }
}
