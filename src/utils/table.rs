//! Fixed-width table rendering for CLI listings.
//!
//! Widths are measured on the visible text, so cells may carry ANSI colours.

use crate::utils::colors::{GREY, RESET};
use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static ANSI: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok());

/// Terminal columns taken by `s` once colour codes are removed.
/// CJK and other wide characters count double.
fn visible_width(s: &str) -> usize {
    match ANSI.as_ref() {
        Some(re) => UnicodeWidthStr::width(re.replace_all(s, "").as_ref()),
        None => UnicodeWidthStr::width(s),
    }
}

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn pad(cell: &str, width: usize) -> String {
        let fill = width.saturating_sub(visible_width(cell));
        format!("{}{} ", cell, " ".repeat(fill))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        for col in &self.columns {
            out.push_str(&Self::pad(&col.header, col.width));
        }
        out.push('\n');

        let total: usize = self.columns.iter().map(|c| c.width + 1).sum();
        out.push_str(&format!("{GREY}{}{RESET}\n", "-".repeat(total)));

        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&Self::pad(cell, col.width));
            }
            out.push('\n');
        }

        out
    }
}
