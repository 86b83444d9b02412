//! Endpoint-to-endpoint trend analysis over a region's history.
//!
//! A trend compares the earliest and latest observed value of a metric.
//! Missing observations are skipped rather than treated as zero, so a metric
//! needs at least two real values to get a trend entry at all.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::domain::records::{HistoryRecord, Metric};
use crate::error::{Error, Result};

/// Payload message reported when a region has too few observations.
pub const INSUFFICIENT_DATA_MESSAGE: &str = "Insufficient data for trend analysis";

/// Minimum number of points needed for a trend.
const MIN_TREND_POINTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    /// Classify a change by its sign.
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            TrendDirection::Increasing
        } else if change < 0.0 {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trend of a single metric between its first and last observed values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTrend {
    pub first_value: f64,
    pub last_value: f64,
    pub change: f64,
    pub change_percent: f64,
    pub trend_direction: TrendDirection,
}

impl MetricTrend {
    /// Build a trend from the observed values in date order.
    ///
    /// Returns `None` when fewer than two values are present.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.len() < MIN_TREND_POINTS {
            return None;
        }
        let first_value = *values.first()?;
        let last_value = *values.last()?;
        let change = last_value - first_value;
        let change_percent = if first_value != 0.0 {
            change / first_value * 100.0
        } else {
            0.0
        };

        Some(Self {
            first_value,
            last_value,
            change,
            change_percent,
            trend_direction: TrendDirection::from_change(change),
        })
    }
}

/// Headline trend derived from max formaldehyde.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityTrend {
    pub direction: TrendDirection,
    pub description: String,
}

impl AirQualityTrend {
    fn from_formaldehyde(trend: &MetricTrend) -> Self {
        Self {
            direction: trend.trend_direction,
            description: format!(
                "Formaldehyde levels are {} by {:.1}%",
                trend.trend_direction,
                trend.change_percent.abs()
            ),
        }
    }
}

/// Per-metric trends. Metrics without enough data are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendSummary {
    #[serde(
        rename = "Surface Pressure",
        skip_serializing_if = "Option::is_none"
    )]
    pub surface_pressure: Option<MetricTrend>,
    #[serde(
        rename = "MAX Formaldehyde (molecules/cm^2)",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_formaldehyde: Option<MetricTrend>,
    #[serde(
        rename = "MIN Formaldehyde (molecules/cm^2)",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_formaldehyde: Option<MetricTrend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_quality_trend: Option<AirQualityTrend>,
}

impl TrendSummary {
    pub fn get(&self, metric: Metric) -> Option<&MetricTrend> {
        match metric {
            Metric::SurfacePressure => self.surface_pressure.as_ref(),
            Metric::MaxFormaldehyde => self.max_formaldehyde.as_ref(),
            Metric::MinFormaldehyde => self.min_formaldehyde.as_ref(),
        }
    }

    fn set(&mut self, metric: Metric, trend: Option<MetricTrend>) {
        match metric {
            Metric::SurfacePressure => self.surface_pressure = trend,
            Metric::MaxFormaldehyde => self.max_formaldehyde = trend,
            Metric::MinFormaldehyde => self.min_formaldehyde = trend,
        }
    }
}

/// Trend section of a history response.
#[derive(Debug, Clone, PartialEq)]
pub enum TrendReport {
    Available(TrendSummary),
    InsufficientData,
}

impl TrendReport {
    /// Analyze date-sorted records, folding the too-few-points case into the report.
    pub fn from_records(records: &[HistoryRecord]) -> Result<Self> {
        match calculate_trends(records) {
            Ok(summary) => Ok(TrendReport::Available(summary)),
            Err(Error::InsufficientData { .. }) => Ok(TrendReport::InsufficientData),
            Err(e) => Err(e),
        }
    }

    pub fn summary(&self) -> Option<&TrendSummary> {
        match self {
            TrendReport::Available(summary) => Some(summary),
            TrendReport::InsufficientData => None,
        }
    }
}

impl Serialize for TrendReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            TrendReport::Available(summary) => summary.serialize(serializer),
            TrendReport::InsufficientData => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", INSUFFICIENT_DATA_MESSAGE)?;
                map.end()
            }
        }
    }
}

/// Compute trends over records already sorted by date.
///
/// Fails with [`Error::InsufficientData`] when fewer than two records are given.
pub fn calculate_trends(records: &[HistoryRecord]) -> Result<TrendSummary> {
    if records.len() < MIN_TREND_POINTS {
        return Err(Error::InsufficientData {
            points: records.len(),
        });
    }

    let mut summary = TrendSummary::default();
    for metric in Metric::ALL {
        let values: Vec<f64> = records.iter().filter_map(|r| r.value(metric)).collect();
        summary.set(metric, MetricTrend::from_values(&values));
    }

    summary.air_quality_trend = summary
        .max_formaldehyde
        .as_ref()
        .map(AirQualityTrend::from_formaldehyde);

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(
        date: (i32, u32, u32),
        surface_pressure: Option<f64>,
        max_formaldehyde: Option<f64>,
        min_formaldehyde: Option<f64>,
    ) -> HistoryRecord {
        HistoryRecord {
            region: "Texas".to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            surface_pressure,
            max_formaldehyde,
            min_formaldehyde,
        }
    }

    #[test]
    fn test_texas_formaldehyde_increase() {
        let records = vec![
            rec((2023, 1, 1), None, Some(10.0), None),
            rec((2023, 6, 1), None, Some(15.0), None),
        ];

        let summary = calculate_trends(&records).unwrap();
        let trend = summary.max_formaldehyde.as_ref().unwrap();
        assert_eq!(trend.first_value, 10.0);
        assert_eq!(trend.last_value, 15.0);
        assert_eq!(trend.change, 5.0);
        assert_eq!(trend.change_percent, 50.0);
        assert_eq!(trend.trend_direction, TrendDirection::Increasing);

        let air = summary.air_quality_trend.as_ref().unwrap();
        assert_eq!(air.direction, TrendDirection::Increasing);
        assert_eq!(air.description, "Formaldehyde levels are increasing by 50.0%");

        // No observations at all for these two.
        assert!(summary.surface_pressure.is_none());
        assert!(summary.min_formaldehyde.is_none());
    }

    #[test]
    fn test_single_record_is_insufficient() {
        let records = vec![rec((2023, 1, 1), Some(1.0), Some(2.0), Some(3.0))];
        let err = calculate_trends(&records).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { points: 1 }));

        let report = TrendReport::from_records(&records).unwrap();
        assert_eq!(report, TrendReport::InsufficientData);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({"error": "Insufficient data for trend analysis"})
        );
    }

    #[test]
    fn test_empty_history_is_insufficient() {
        assert!(matches!(
            calculate_trends(&[]),
            Err(Error::InsufficientData { points: 0 })
        ));
    }

    #[test]
    fn test_zero_first_value_guards_percent() {
        let records = vec![
            rec((2023, 1, 1), Some(0.0), None, None),
            rec((2023, 2, 1), Some(5.0), None, None),
        ];
        let summary = calculate_trends(&records).unwrap();
        let trend = summary.surface_pressure.unwrap();
        assert_eq!(trend.change, 5.0);
        assert_eq!(trend.change_percent, 0.0);
        assert!(trend.change_percent.is_finite());
        assert_eq!(trend.trend_direction, TrendDirection::Increasing);
    }

    #[test]
    fn test_missing_values_are_dropped_not_zeroed() {
        let records = vec![
            rec((2023, 1, 1), None, Some(20.0), Some(4.0)),
            rec((2023, 2, 1), Some(1000.0), None, None),
            rec((2023, 3, 1), None, Some(10.0), None),
        ];
        let summary = calculate_trends(&records).unwrap();

        // Only one surface pressure and one min value: omitted.
        assert!(summary.surface_pressure.is_none());
        assert!(summary.min_formaldehyde.is_none());

        let max = summary.max_formaldehyde.as_ref().unwrap();
        assert_eq!(max.first_value, 20.0);
        assert_eq!(max.last_value, 10.0);
        assert_eq!(max.change_percent, -50.0);
        assert_eq!(max.trend_direction, TrendDirection::Decreasing);
        assert_eq!(
            summary.air_quality_trend.unwrap().description,
            "Formaldehyde levels are decreasing by 50.0%"
        );
    }

    #[test]
    fn test_direction_follows_sign_of_change() {
        let cases = [
            (1.0, 2.0, TrendDirection::Increasing),
            (2.0, 1.0, TrendDirection::Decreasing),
            (3.5, 3.5, TrendDirection::Stable),
            (-4.0, -1.0, TrendDirection::Increasing),
            (0.0, -1.0, TrendDirection::Decreasing),
        ];
        for (first, last, expected) in cases {
            let trend = MetricTrend::from_values(&[first, 99.0, last]).unwrap();
            assert_eq!(trend.trend_direction, expected, "{first} -> {last}");
            assert_eq!(trend.change, last - first);
        }
    }

    #[test]
    fn test_stable_description_formatting() {
        let records = vec![
            rec((2023, 1, 1), None, Some(7.0), None),
            rec((2023, 1, 2), None, Some(7.0), None),
        ];
        let summary = calculate_trends(&records).unwrap();
        assert_eq!(
            summary.air_quality_trend.unwrap().description,
            "Formaldehyde levels are stable by 0.0%"
        );
    }

    #[test]
    fn test_no_air_quality_trend_without_formaldehyde() {
        let records = vec![
            rec((2023, 1, 1), Some(1000.0), None, Some(1.0)),
            rec((2023, 1, 2), Some(1010.0), None, Some(2.0)),
        ];
        let summary = calculate_trends(&records).unwrap();
        assert!(summary.air_quality_trend.is_none());
        assert!(summary.get(Metric::SurfacePressure).is_some());
        assert!(summary.get(Metric::MinFormaldehyde).is_some());
    }

    #[test]
    fn test_summary_serializes_with_column_keys() {
        let records = vec![
            rec((2023, 1, 1), None, Some(10.0), None),
            rec((2023, 6, 1), None, Some(15.0), None),
        ];
        let report = TrendReport::from_records(&records).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        let max = &json["MAX Formaldehyde (molecules/cm^2)"];
        assert_eq!(max["first_value"], 10.0);
        assert_eq!(max["change_percent"], 50.0);
        assert_eq!(max["trend_direction"], "increasing");
        assert_eq!(json["air_quality_trend"]["direction"], "increasing");
        assert!(json.get("Surface Pressure").is_none());
        assert!(json.get("error").is_none());
    }
}
