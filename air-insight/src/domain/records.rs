//! Summary and history records as held by the dataset store.

use chrono::NaiveDate;
use serde::Serialize;

/// The numeric metrics recorded per region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    SurfacePressure,
    MaxFormaldehyde,
    MinFormaldehyde,
}

impl Metric {
    /// All metrics, in source column order.
    pub const ALL: [Metric; 3] = [
        Metric::SurfacePressure,
        Metric::MaxFormaldehyde,
        Metric::MinFormaldehyde,
    ];

    /// Column header used by the source tables and as the trend output key.
    pub const fn column_name(self) -> &'static str {
        match self {
            Metric::SurfacePressure => "Surface Pressure",
            Metric::MaxFormaldehyde => "MAX Formaldehyde (molecules/cm^2)",
            Metric::MinFormaldehyde => "MIN Formaldehyde (molecules/cm^2)",
        }
    }
}

/// Current-value snapshot of the metrics for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    pub region: String,
    pub surface_pressure: f64,
    pub max_formaldehyde: f64,
    pub min_formaldehyde: f64,
}

/// One dated observation for a region. Any metric may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub region: String,
    pub date: NaiveDate,
    pub surface_pressure: Option<f64>,
    pub max_formaldehyde: Option<f64>,
    pub min_formaldehyde: Option<f64>,
}

impl HistoryRecord {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::SurfacePressure => self.surface_pressure,
            Metric::MaxFormaldehyde => self.max_formaldehyde,
            Metric::MinFormaldehyde => self.min_formaldehyde,
        }
    }

    /// Metric value with missing observations plotted as zero.
    pub fn value_or_zero(&self, metric: Metric) -> f64 {
        self.value(metric).unwrap_or(0.0)
    }
}
