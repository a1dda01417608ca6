use crate::models::category::CategoryKey;
use crate::models::classify_types::ClassificationResult;
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};

/// The session log keeps only this many of the most recent entries.
pub const LOG_CAPACITY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSeverity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub message: String,
    pub severity: LogSeverity,
}

/// One pie-chart slice: a category that has been seen this session.
#[derive(Debug, Serialize, PartialEq)]
pub struct DistributionSlice {
    pub key: CategoryKey,
    pub name: &'static str,
    pub color: &'static str,
    pub count: u64,
}

/// Running statistics for one user session. Owned by a single session, never
/// shared across users and never persisted; dropped when the session ends.
#[derive(Debug, Serialize)]
pub struct SessionState {
    total_analyses: u64,
    counts_by_category: BTreeMap<CategoryKey, u64>,
    total_co2_saved_kg: f64,
    last_prediction: Option<String>,
    recent_log: VecDeque<LogEntry>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            total_analyses: 0,
            counts_by_category: CategoryKey::ALL.iter().map(|&k| (k, 0)).collect(),
            total_co2_saved_kg: 0.0,
            last_prediction: None,
            recent_log: VecDeque::new(),
        }
    }

    /// Folds one completed classification into the running totals. The only
    /// mutator of the statistics fields; called exactly once per completed
    /// classification, never retried, never rolled back.
    pub fn record_classification(&mut self, result: &ClassificationResult) {
        let info = result.category.info();
        self.total_analyses += 1;
        *self.counts_by_category.entry(result.category).or_insert(0) += 1;
        self.total_co2_saved_kg += info.co2_saving_kg;
        self.last_prediction = Some(info.name.to_string());
    }

    pub fn append_log(&mut self, message: impl Into<String>, severity: LogSeverity) {
        self.recent_log.push_back(LogEntry {
            message: message.into(),
            severity,
        });
        while self.recent_log.len() > LOG_CAPACITY {
            self.recent_log.pop_front();
        }
    }

    pub fn total_analyses(&self) -> u64 {
        self.total_analyses
    }

    pub fn count(&self, key: CategoryKey) -> u64 {
        self.counts_by_category.get(&key).copied().unwrap_or(0)
    }

    pub fn total_co2_saved_kg(&self) -> f64 {
        self.total_co2_saved_kg
    }

    pub fn last_prediction(&self) -> Option<&str> {
        self.last_prediction.as_deref()
    }

    pub fn recent_log(&self) -> impl Iterator<Item = &LogEntry> {
        self.recent_log.iter()
    }

    /// Chart feed: categories seen this session, in table order.
    pub fn distribution(&self) -> Vec<DistributionSlice> {
        CategoryKey::ALL
            .iter()
            .filter_map(|&key| {
                let count = self.count(key);
                if count == 0 {
                    return None;
                }
                let info = key.info();
                Some(DistributionSlice {
                    key,
                    name: info.name,
                    color: info.color,
                    count,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glass_result() -> ClassificationResult {
        ClassificationResult {
            category: CategoryKey::Glass,
            label: "glass".to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn new_session_has_all_categories_at_zero() {
        let session = SessionState::new();
        assert_eq!(session.total_analyses(), 0);
        assert_eq!(session.total_co2_saved_kg(), 0.0);
        assert!(session.last_prediction().is_none());
        for key in CategoryKey::ALL {
            assert_eq!(session.count(key), 0);
        }
    }

    #[test]
    fn recording_accumulates_counts_and_savings() {
        let mut session = SessionState::new();
        for _ in 0..3 {
            session.record_classification(&glass_result());
        }

        assert_eq!(session.total_analyses(), 3);
        assert_eq!(session.count(CategoryKey::Glass), 3);
        assert_eq!(session.count(CategoryKey::Plastic), 0);
        assert!((session.total_co2_saved_kg() - 3.0 * 0.15).abs() < 1e-9);
        assert_eq!(session.last_prediction(), Some("Cam"));
    }

    #[test]
    fn log_keeps_only_the_most_recent_twenty_entries() {
        let mut session = SessionState::new();
        for i in 0..25 {
            session.append_log(format!("mesaj {}", i), LogSeverity::Info);
        }

        let log: Vec<_> = session.recent_log().collect();
        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log[0].message, "mesaj 5");
        assert_eq!(log[19].message, "mesaj 24");
    }

    #[test]
    fn distribution_lists_only_seen_categories_in_table_order() {
        let mut session = SessionState::new();
        session.record_classification(&ClassificationResult {
            category: CategoryKey::Plastic,
            label: "plastic".to_string(),
            confidence: 0.8,
        });
        session.record_classification(&glass_result());
        session.record_classification(&glass_result());

        let slices = session.distribution();
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].key, CategoryKey::Glass);
        assert_eq!(slices[0].count, 2);
        assert_eq!(slices[0].name, "Cam");
        assert_eq!(slices[1].key, CategoryKey::Plastic);
        assert_eq!(slices[1].count, 1);
    }
}
