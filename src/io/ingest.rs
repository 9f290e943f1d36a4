//! CSV terminal-list ingest.
//!
//! A terminal list is the flattened view of a drawing: one row per circular
//! terminal with its id and the attribute it is grouped by.
//!
//! ```text
//! id,group
//! c1,#ff0000
//! c2,#0000ff
//! ```
//!
//! `fill` is accepted in place of `group`. Other columns are ignored. Bad rows
//! are recorded and skipped; a file with no usable rows is an error.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::warn;

use crate::domain::Terminal;
use crate::error::AppError;

const GROUP_COLUMNS: [&str; 2] = ["group", "fill"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

/// Ingest output: terminals in file order + what was skipped.
#[derive(Debug, Clone)]
pub struct IngestedTerminals {
    pub terminals: Vec<Terminal>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load terminals from a CSV file.
pub fn load_terminals(path: &Path) -> Result<IngestedTerminals, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_terminals(file)
}

/// Load terminals from any CSV reader.
pub fn read_terminals<R: Read>(input: R) -> Result<IngestedTerminals, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    if !header_map.contains_key("id") {
        return Err(AppError::new(2, "Missing required column: `id`"));
    }
    let group_column = GROUP_COLUMNS
        .iter()
        .copied()
        .find(|c| header_map.contains_key(*c))
        .ok_or_else(|| AppError::new(2, "Missing required column: `group` (or `fill`)"))?;

    let mut terminals = Vec::new();
    let mut row_errors = Vec::new();
    let mut seen = HashSet::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Line 1 is the header.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map, group_column) {
            Ok(terminal) => {
                if !seen.insert(terminal.id.clone()) {
                    row_errors.push(RowError {
                        line,
                        id: Some(terminal.id),
                        message: "Duplicate terminal id.".to_string(),
                    });
                    continue;
                }
                terminals.push(terminal);
            }
            Err((id, message)) => row_errors.push(RowError { line, id, message }),
        }
    }

    for e in &row_errors {
        warn!("line {}: {} ({})", e.line, e.message, e.id.as_deref().unwrap_or("-"));
    }

    if terminals.is_empty() {
        return Err(AppError::new(3, "No valid terminal rows in CSV."));
    }

    Ok(IngestedTerminals {
        terminals,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports like to prefix the first header with a BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    group_column: &str,
) -> Result<Terminal, (Option<String>, String)> {
    let id = get_required(record, header_map, "id").map_err(|e| (None, e))?;
    let group = get_required(record, header_map, group_column).map_err(|e| (Some(id.to_string()), e))?;
    Ok(Terminal::new(id, group))
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_terminals_in_file_order() {
        let csv = "\u{feff}ID,Fill,cx\nc1,red,10\nc2,blue,20\nc3,red,30\n";
        let out = read_terminals(csv.as_bytes()).unwrap();
        assert_eq!(out.rows_read, 3);
        assert!(out.row_errors.is_empty());
        assert_eq!(
            out.terminals,
            vec![
                Terminal::new("c1", "red"),
                Terminal::new("c2", "blue"),
                Terminal::new("c3", "red"),
            ]
        );
    }

    #[test]
    fn bad_rows_are_reported_and_skipped() {
        let csv = "id,group\nc1,red\n,blue\nc3,\nc1,green\nc4,blue\n";
        let out = read_terminals(csv.as_bytes()).unwrap();
        assert_eq!(out.terminals.len(), 2);

        let lines: Vec<_> = out.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert_eq!(out.row_errors[1].id.as_deref(), Some("c3"));
        assert!(out.row_errors[2].message.contains("Duplicate"));
    }

    #[test]
    fn missing_group_column_is_a_config_error() {
        let err = read_terminals("id,stroke\nc1,red\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn no_usable_rows_is_an_error() {
        let err = read_terminals("id,group\n,red\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
