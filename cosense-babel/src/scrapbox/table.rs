//! Scrapbox `table:` block conversion
//!
//! `table:<name>` is followed by rows indented with a space or tab (the
//! full-width space does not extend a table). The first row is the header;
//! data rows are padded or truncated to the header's column count.
//!
//! A malformed block is not fatal: the failure is returned to the caller,
//! which logs a warning and passes the block through as plain lines.

use super::lines::split_lines;
use crate::error::ConvertError;
use log::warn;

/// Header prefix that opens a Scrapbox table.
pub const TABLE_PREFIX: &str = "table:";

/// Convert every `table:` block in the content to a Markdown pipe table.
pub fn convert_tables(content: &str) -> String {
    if content.is_empty() {
        return content.to_string();
    }

    let lines = split_lines(content);
    let mut result: Vec<String> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];

        if line.starts_with(TABLE_PREFIX) {
            match process_table_block(&lines, i) {
                Ok((block, next_index)) => {
                    result.extend(block);
                    i = next_index;
                    continue;
                }
                Err(e) => warn!("Failed to process table at line {i}: {e}"),
            }
        }

        result.push(line.clone());
        i += 1;
    }

    result.join("\n")
}

/// Convert one table block starting at `start`.
///
/// Returns the emitted lines and the index of the first unconsumed line.
fn process_table_block(
    lines: &[String],
    start: usize,
) -> Result<(Vec<String>, usize), ConvertError> {
    let header_line = &lines[start];
    let table_name = header_line[TABLE_PREFIX.len()..].trim();

    let mut emitted: Vec<String> = Vec::new();
    if !table_name.is_empty() {
        emitted.push(format!("## {table_name}"));
        emitted.push(String::new());
    }

    let mut rows: Vec<&str> = Vec::new();
    let mut i = start + 1;
    while i < lines.len() && (lines[i].starts_with(' ') || lines[i].starts_with('\t')) {
        let row = lines[i].trim();
        if !row.is_empty() {
            rows.push(row);
        }
        i += 1;
    }

    if let Some((header_row, data_rows)) = rows.split_first() {
        let columns: Vec<&str> = header_row.split_whitespace().collect();
        if columns.is_empty() {
            return Err(ConvertError::Table(
                "No valid columns found in header row".to_string(),
            ));
        }

        emitted.push(format!("| {} |", columns.join(" | ")));
        emitted.push(format!("|{}", "---|".repeat(columns.len())));

        for row in data_rows {
            let mut cells: Vec<&str> = row.split_whitespace().collect();
            cells.resize(columns.len(), "");
            emitted.push(format!("| {} |", cells.join(" | ")));
        }

        emitted.push(String::new());
    }

    Ok((emitted, i))
}
