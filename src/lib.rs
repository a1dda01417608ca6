pub mod error;
pub mod models;
pub mod services;

pub use error::AppError;
pub use models::category::{CategoryEntry, CategoryKey};
pub use models::classify_types::{ClassificationResult, ModelStatus};
pub use services::analyzer::{Analysis, Analyzer};
pub use services::classifier::model_manager::ModelManager;
pub use services::session::{DistributionSlice, LogEntry, LogSeverity, SessionState};
