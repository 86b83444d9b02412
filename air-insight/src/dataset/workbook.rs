//! Spreadsheet dataset sources.
//!
//! Each sheet becomes a JSON array of row objects keyed by the header row,
//! so workbooks feed the same row decoding as JSON documents.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub const SUMMARY_SHEET: &str = "Summary";
pub const HISTORY_SHEET: &str = "HistoryData";

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Whether a path names a spreadsheet rather than a JSON document.
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Read the `Summary` and `HistoryData` sheets into a JSON document.
///
/// `HistoryData` may be absent.
pub fn workbook_to_json(bytes: Vec<u8>) -> Result<Value> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| Error::dataset(format!("Failed to open workbook: {}", e)))?;

    let sheet_names = workbook.sheet_names();
    let mut document = Map::new();

    for name in [SUMMARY_SHEET, HISTORY_SHEET] {
        if !sheet_names.iter().any(|sheet| sheet == name) {
            continue;
        }
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| Error::dataset(format!("Failed to read sheet '{}': {}", name, e)))?;
        document.insert(name.to_string(), Value::Array(sheet_rows(&range)));
    }

    Ok(Value::Object(document))
}

/// Convert a sheet into row objects keyed by the first row.
///
/// Blank rows are skipped and empty cells become `null`.
pub fn sheet_rows(range: &Range<Data>) -> Vec<Value> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let columns: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();

    rows.filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| {
            let fields = columns
                .iter()
                .zip(row)
                .filter(|(column, _)| !column.is_empty())
                .map(|(column, cell)| (column.clone(), cell_value(cell)))
                .collect();
            Value::Object(fields)
        })
        .collect()
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::String(s) if s.trim().is_empty() => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Float(f) => number(*f),
        Data::Int(i) => Value::from(*i),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(dt) => Value::String(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
    }
}

fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sheet(cells: &[&[Data]]) -> Range<Data> {
        let height = cells.len() as u32;
        let width = cells.iter().map(|row| row.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn test_is_workbook() {
        assert!(is_workbook(Path::new("Insight.xlsx")));
        assert!(is_workbook(Path::new("/data/Insight.XLSX")));
        assert!(is_workbook(Path::new("insight.ods")));
        assert!(!is_workbook(Path::new("Insight.json")));
        assert!(!is_workbook(Path::new("Insight")));
    }

    #[test]
    fn test_sheet_rows_keyed_by_header() {
        let range = sheet(&[
            &[text("State"), text("Date"), text("Surface Pressure")],
            &[text("Ohio"), text("2023-01-01"), Data::Float(990.5)],
            &[Data::Empty, Data::Empty, Data::Empty],
            &[text("Iowa"), text("2023-02-01"), Data::Empty],
            &[text("Utah"), text("2023-03-01"), Data::Int(1000)],
        ]);

        assert_eq!(
            sheet_rows(&range),
            vec![
                json!({"State": "Ohio", "Date": "2023-01-01", "Surface Pressure": 990.5}),
                json!({"State": "Iowa", "Date": "2023-02-01", "Surface Pressure": null}),
                json!({"State": "Utah", "Date": "2023-03-01", "Surface Pressure": 1000}),
            ]
        );
    }

    #[test]
    fn test_sheet_rows_header_only() {
        let range = sheet(&[&[text("State"), text("Surface Pressure")]]);
        assert!(sheet_rows(&range).is_empty());
        assert!(sheet_rows(&Range::empty()).is_empty());
    }

    #[test]
    fn test_cell_value_conversions() {
        assert_eq!(cell_value(&Data::Float(f64::NAN)), Value::Null);
        assert_eq!(cell_value(&text("  ")), Value::Null);
        assert_eq!(cell_value(&Data::Bool(true)), json!(true));
        assert_eq!(
            cell_value(&Data::DateTimeIso("2023-06-01T00:00:00".to_string())),
            json!("2023-06-01T00:00:00")
        );
    }

    #[test]
    fn test_workbook_to_json_rejects_non_workbook() {
        let err = workbook_to_json(b"{\"Summary\": []}".to_vec()).unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }
}
