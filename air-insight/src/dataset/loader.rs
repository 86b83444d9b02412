//! Reads the dataset source file into a [`DatasetStore`].
//!
//! The source is either a spreadsheet workbook or a JSON document, each
//! with a `Summary` table and an optional `HistoryData` table. Row keys are
//! the workbook column headers.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::{debug, info};

use crate::dataset::store::DatasetStore;
use crate::dataset::workbook;
use crate::domain::{HistoryRecord, SummaryRecord};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(rename = "Summary")]
    summary: Vec<RawSummaryRow>,
    #[serde(rename = "HistoryData", default)]
    history: Vec<RawHistoryRow>,
}

#[derive(Debug, Deserialize)]
struct RawSummaryRow {
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Surface Pressure")]
    surface_pressure: f64,
    #[serde(rename = "MAX Formaldehyde (molecules/cm^2)")]
    max_formaldehyde: f64,
    #[serde(rename = "MIN Formaldehyde (molecules/cm^2)")]
    min_formaldehyde: f64,
}

#[derive(Debug, Deserialize)]
struct RawHistoryRow {
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Surface Pressure", default)]
    surface_pressure: Option<f64>,
    #[serde(rename = "MAX Formaldehyde (molecules/cm^2)", default)]
    max_formaldehyde: Option<f64>,
    #[serde(rename = "MIN Formaldehyde (molecules/cm^2)", default)]
    min_formaldehyde: Option<f64>,
}

/// Load the dataset from a file.
///
/// `.xlsx`, `.xlsm`, `.xlsb`, `.xls` and `.ods` files are read as workbooks,
/// anything else as JSON. A missing or unreadable file is reported as
/// [`Error::DatasetIo`].
pub async fn load_from_path(path: impl AsRef<Path>) -> Result<DatasetStore> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|source| Error::DatasetIo {
        path: path.to_path_buf(),
        source,
    })?;
    let is_workbook = workbook::is_workbook(path);
    debug!(path = %path.display(), bytes = bytes.len(), is_workbook, "Read dataset source");

    let store = if is_workbook {
        parse_workbook(bytes)?
    } else {
        parse_dataset(&bytes)?
    };
    info!(
        path = %path.display(),
        regions = store.regions().len(),
        history_rows = store.history_len(),
        history_regions = store.history_region_count(),
        "Dataset loaded"
    );
    Ok(store)
}

/// Parse a JSON dataset document.
pub fn parse_dataset(bytes: &[u8]) -> Result<DatasetStore> {
    build_store(serde_json::from_slice(bytes)?)
}

/// Parse a spreadsheet workbook with `Summary` and `HistoryData` sheets.
pub fn parse_workbook(bytes: Vec<u8>) -> Result<DatasetStore> {
    build_store(serde_json::from_value(workbook::workbook_to_json(bytes)?)?)
}

fn build_store(raw: RawDataset) -> Result<DatasetStore> {
    let summary = raw
        .summary
        .into_iter()
        .map(|row| SummaryRecord {
            region: row.state,
            surface_pressure: row.surface_pressure,
            max_formaldehyde: row.max_formaldehyde,
            min_formaldehyde: row.min_formaldehyde,
        })
        .collect();

    let history = raw
        .history
        .into_iter()
        .enumerate()
        .map(|(index, row)| -> Result<HistoryRecord> {
            let date = parse_date(&row.date).ok_or_else(|| {
                Error::dataset(format!(
                    "HistoryData row {}: invalid Date '{}' for {}",
                    index, row.date, row.state
                ))
            })?;
            Ok(HistoryRecord {
                region: row.state,
                date,
                surface_pressure: row.surface_pressure,
                max_formaldehyde: row.max_formaldehyde,
                min_formaldehyde: row.min_formaldehyde,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DatasetStore::new(summary, history))
}

/// Parse a calendar date, accepting plain dates and timestamps.
///
/// Timestamps keep only their date part.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}
