//! API request and response models (DTOs).
//!
//! Field names follow the JSON contract of the air-quality dashboard, so
//! these types are kept separate from the domain records they are built from.

use serde::Serialize;
use serde_json::Value;

use crate::domain::{HistoryRecord, Metric, SummaryRecord, TrendReport};
use crate::service::RegionHistory;

// ============================================================================
// Summary
// ============================================================================

/// Body of `POST /api/state`.
///
/// `state` is kept as raw JSON so that absent, null and other falsy values
/// can all be reported as a missing parameter.
#[derive(Debug, Clone, Default)]
pub struct StateRequest {
    pub state: Option<Value>,
}

impl StateRequest {
    /// Decode a request body, which must be a JSON object.
    ///
    /// Any other JSON value (array, string, number...) is rejected.
    pub fn from_json(body: &[u8]) -> Result<Self, String> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| format!("Failed to decode JSON object: {}", e))?;

        match value {
            Value::Object(mut fields) => Ok(Self {
                state: fields.remove("state"),
            }),
            other => Err(format!(
                "Failed to decode JSON object: expected an object, got {}",
                json_kind(&other)
            )),
        }
    }

    /// Region key to look up, or `None` when the field is missing or falsy.
    ///
    /// A string is used as-is. Any other value is looked up by its
    /// JSON-formatted text, so `true` becomes `"true"` and `[1]` becomes `"[1]"`.
    pub fn region(&self) -> Option<String> {
        match self.state.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::Array(items) if items.is_empty() => None,
            Value::Object(fields) if fields.is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Summary metrics for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResponse {
    pub surface_pressure: f64,
    pub max_formaldehyde: f64,
    pub min_formaldehyde: f64,
}

impl From<&SummaryRecord> for SummaryResponse {
    fn from(record: &SummaryRecord) -> Self {
        Self {
            surface_pressure: record.surface_pressure,
            max_formaldehyde: record.max_formaldehyde,
            min_formaldehyde: record.min_formaldehyde,
        }
    }
}

// ============================================================================
// History
// ============================================================================

/// Parallel series for plotting. Missing observations are plotted as 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySeries {
    pub dates: Vec<String>,
    pub surface_pressure: Vec<f64>,
    pub max_formaldehyde: Vec<f64>,
    pub min_formaldehyde: Vec<f64>,
}

impl HistorySeries {
    pub fn from_records(records: &[HistoryRecord]) -> Self {
        let series = |metric: Metric| -> Vec<f64> {
            records.iter().map(|r| r.value_or_zero(metric)).collect()
        };

        Self {
            dates: records
                .iter()
                .map(|r| r.date.format("%Y-%m-%d").to_string())
                .collect(),
            surface_pressure: series(Metric::SurfacePressure),
            max_formaldehyde: series(Metric::MaxFormaldehyde),
            min_formaldehyde: series(Metric::MinFormaldehyde),
        }
    }
}

/// Response of `GET /api/history/{state}`.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub history: HistorySeries,
    pub trends: TrendReport,
}

impl From<RegionHistory> for HistoryResponse {
    fn from(history: RegionHistory) -> Self {
        Self {
            history: HistorySeries::from_records(&history.records),
            trends: history.trends,
        }
    }
}

// ============================================================================
// Health
// ============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Number of rows in the summary table
    pub regions: usize,
    /// Number of rows in the history table
    pub history_records: usize,
}
