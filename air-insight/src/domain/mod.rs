//! Domain layer: dataset records and trend analysis.

pub mod records;
pub mod trend;

pub use records::{HistoryRecord, Metric, SummaryRecord};
pub use trend::{
    AirQualityTrend, MetricTrend, TrendDirection, TrendReport, TrendSummary, calculate_trends,
};
