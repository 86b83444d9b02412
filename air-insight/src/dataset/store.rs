//! Immutable, indexed view of the summary and history tables.

use std::collections::HashMap;

use crate::domain::{HistoryRecord, SummaryRecord};

/// Read-only dataset held for the lifetime of the process.
///
/// Indexes are built once on construction so lookups never rescan the tables.
#[derive(Debug, Default)]
pub struct DatasetStore {
    /// Region names in source order, one per summary row.
    regions: Vec<String>,
    summaries: HashMap<String, SummaryRecord>,
    history: HashMap<String, Vec<HistoryRecord>>,
    history_len: usize,
}

impl DatasetStore {
    /// Build the store from the raw tables.
    ///
    /// If a region has more than one summary row, the first one wins for
    /// lookups while the region list still reflects every row.
    pub fn new(summary_rows: Vec<SummaryRecord>, history_rows: Vec<HistoryRecord>) -> Self {
        let mut regions = Vec::with_capacity(summary_rows.len());
        let mut summaries = HashMap::with_capacity(summary_rows.len());
        for row in summary_rows {
            regions.push(row.region.clone());
            summaries.entry(row.region.clone()).or_insert(row);
        }

        let history_len = history_rows.len();
        let mut history: HashMap<String, Vec<HistoryRecord>> = HashMap::new();
        for row in history_rows {
            history.entry(row.region.clone()).or_default().push(row);
        }

        Self {
            regions,
            summaries,
            history,
            history_len,
        }
    }

    /// All region names in source order.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Summary record for an exact, case-sensitive region name.
    pub fn summary(&self, region: &str) -> Option<&SummaryRecord> {
        self.summaries.get(region)
    }

    /// History records for a region in stored order. Empty when unknown.
    pub fn history(&self, region: &str) -> &[HistoryRecord] {
        self.history.get(region).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of rows in the history table.
    pub fn history_len(&self) -> usize {
        self.history_len
    }

    /// Number of regions that have at least one history row.
    pub fn history_region_count(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn summary(region: &str, surface_pressure: f64) -> SummaryRecord {
        SummaryRecord {
            region: region.to_string(),
            surface_pressure,
            max_formaldehyde: 2.0,
            min_formaldehyde: 1.0,
        }
    }

    fn history(region: &str, day: u32) -> HistoryRecord {
        HistoryRecord {
            region: region.to_string(),
            date: NaiveDate::from_ymd_opt(2023, 1, day).unwrap(),
            surface_pressure: None,
            max_formaldehyde: Some(day as f64),
            min_formaldehyde: None,
        }
    }

    #[test]
    fn test_regions_keep_source_order() {
        let store = DatasetStore::new(
            vec![summary("Utah", 1.0), summary("Alabama", 2.0), summary("Ohio", 3.0)],
            vec![],
        );
        assert_eq!(store.regions(), ["Utah", "Alabama", "Ohio"]);
    }

    #[test]
    fn test_summary_lookup_is_exact() {
        let store = DatasetStore::new(vec![summary("Texas", 1013.0)], vec![]);
        assert_eq!(store.summary("Texas").unwrap().surface_pressure, 1013.0);
        assert!(store.summary("texas").is_none());
        assert!(store.summary("").is_none());
    }

    #[test]
    fn test_duplicate_summary_first_row_wins() {
        let store = DatasetStore::new(vec![summary("Texas", 1.0), summary("Texas", 2.0)], vec![]);
        assert_eq!(store.regions().len(), 2);
        assert_eq!(store.summary("Texas").unwrap().surface_pressure, 1.0);
    }

    #[test]
    fn test_history_grouped_in_stored_order() {
        let store = DatasetStore::new(
            vec![],
            vec![history("Texas", 9), history("Ohio", 1), history("Texas", 3)],
        );
        let days: Vec<_> = store
            .history("Texas")
            .iter()
            .map(|r| r.max_formaldehyde.unwrap())
            .collect();
        assert_eq!(days, vec![9.0, 3.0]);
        assert!(store.history("Nevada").is_empty());
        assert_eq!(store.history_len(), 3);
        assert_eq!(store.history_region_count(), 2);
    }

    #[test]
    fn test_empty_store() {
        let store = DatasetStore::default();
        assert!(store.regions().is_empty());
        assert!(store.history("Texas").is_empty());
    }
}
