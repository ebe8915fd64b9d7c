//
//  github-rest
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Builder over `comfy_table` plus the colour conventions used in list views.
//!
//! ```rust
//! use github_rest::output::TableBuilder;
//!
//! let rendered = TableBuilder::new()
//!     .color(false)
//!     .headers(["#", "Title", "State"])
//!     .row(["1", "Fix login", "open"])
//!     .render();
//! assert!(rendered.contains("Fix login"));
//! ```

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

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

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            let cells: Vec<Cell> = headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect();
            self.table.set_header(cells);
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table
            .add_row(cells.into_iter().map(Into::into).collect::<Vec<String>>());
        self
    }

    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            self.table
                .add_row(row.into_iter().map(Into::into).collect::<Vec<String>>());
        }
        self
    }

    pub fn render(&self) -> String {
        self.table.to_string()
    }

    pub fn print(self) {
        println!("{}", self.table);
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colours a GitHub state or check conclusion.
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;

    match status.to_lowercase().as_str() {
        "open" | "success" | "approved" | "active" => style(status).green().to_string(),
        "merged" | "published" | "latest" => style(status).magenta().to_string(),
        "closed" | "failure" | "error" | "changes_requested" => style(status).red().to_string(),
        "draft" | "pending" | "prerelease" => style(status).yellow().to_string(),
        _ => status.to_string(),
    }
}

pub fn format_bool(value: bool, color: bool) -> String {
    use console::style;

    match (value, color) {
        (true, true) => style("Yes").green().to_string(),
        (false, true) => style("No").dim().to_string(),
        (true, false) => "Yes".to_string(),
        (false, false) => "No".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_formatting() {
        assert_eq!(format_status("open", false), "open");
        assert_eq!(format_bool(true, false), "Yes");
        assert_eq!(format_bool(false, false), "No");
    }

    #[test]
    fn test_render_contains_rows() {
        let rendered = TableBuilder::new()
            .color(false)
            .headers(["Name", "Stars"])
            .rows(vec![vec!["tokio", "25000"], vec!["serde", "8000"]])
            .render();

        assert!(rendered.contains("Name"));
        assert!(rendered.contains("tokio"));
        assert!(rendered.contains("8000"));
    }
}
