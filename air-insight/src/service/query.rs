//! Stateless lookups backing the HTTP handlers.

use std::sync::Arc;

use tracing::debug;

use crate::dataset::DatasetStore;
use crate::domain::{HistoryRecord, SummaryRecord, TrendReport};
use crate::error::{Error, Result, Table};

/// Name of the request field carrying the region.
pub const REGION_PARAMETER: &str = "state";

/// A region's history in date order together with its trend analysis.
#[derive(Debug, Clone)]
pub struct RegionHistory {
    pub region: String,
    /// Records sorted ascending by date; ties keep stored order.
    pub records: Vec<HistoryRecord>,
    pub trends: TrendReport,
}

/// Query service over an immutable dataset.
#[derive(Debug, Clone)]
pub struct QueryService {
    store: Arc<DatasetStore>,
}

impl QueryService {
    pub fn new(store: Arc<DatasetStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// All known region names in source order.
    pub fn list_regions(&self) -> &[String] {
        self.store.regions()
    }

    /// Summary metrics for one region.
    ///
    /// `None` and the empty string both count as a missing parameter.
    pub fn get_summary(&self, region: Option<&str>) -> Result<&SummaryRecord> {
        let region = match region {
            Some(region) if !region.is_empty() => region,
            _ => return Err(Error::missing_parameter(REGION_PARAMETER)),
        };

        self.store
            .summary(region)
            .ok_or_else(|| Error::not_found(Table::Summary, region))
    }

    /// Date-sorted history and trends for one region.
    pub fn get_history(&self, region: &str) -> Result<RegionHistory> {
        let mut records = self.store.history(region).to_vec();
        if records.is_empty() {
            return Err(Error::not_found(Table::History, region));
        }

        // `sort_by_key` is stable.
        records.sort_by_key(|r| r.date);
        let trends = TrendReport::from_records(&records)?;
        debug!(region, points = records.len(), "Computed region history");

        Ok(RegionHistory {
            region: region.to_string(),
            records,
            trends,
        })
    }
}
