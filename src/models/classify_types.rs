use crate::models::category::CategoryKey;
use serde::Serialize;

#[derive(Debug, Serialize, Clone)]
pub struct ModelStatus {
    pub downloaded: bool,
    pub loading: bool,
    pub ready: bool,
    pub error: Option<String>,
}

/// Outcome of one forward pass: the resolved category plus the raw
/// (lowercased) model label it came from.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ClassificationResult {
    pub category: CategoryKey,
    pub label: String,
    pub confidence: f32,
}

impl ClassificationResult {
    /// True when the model label was outside the closed category set and the
    /// result was redirected to the trash bin.
    pub fn is_fallback(&self) -> bool {
        CategoryKey::from_label(&self.label).is_none()
    }
}
