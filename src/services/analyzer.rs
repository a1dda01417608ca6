use crate::error::AppError;
use crate::models::category::CategoryEntry;
use crate::models::classify_types::{ClassificationResult, ModelStatus};
use crate::services::classifier::inference;
use crate::services::classifier::model_manager::ModelManager;
use crate::services::session::{LogSeverity, SessionState};
use serde::Serialize;

/// Read-only view of one finished analysis, handed to the display layer.
#[derive(Debug, Serialize)]
pub struct Analysis {
    pub result: ClassificationResult,
    pub category: &'static CategoryEntry,
}

/// One user session: the shared model assets plus that session's running
/// statistics. Drives the upload -> classify -> record pipeline to
/// completion, one synchronous run per interaction.
pub struct Analyzer {
    manager: ModelManager,
    session: SessionState,
}

impl Analyzer {
    pub fn new(manager: ModelManager) -> Self {
        Self {
            manager,
            session: SessionState::new(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn status(&self) -> ModelStatus {
        self.manager.status()
    }

    /// Fetches and loads the classifier assets, recording the outcome in the
    /// session log. On failure the session stays in its cannot-analyze state.
    pub async fn ensure_assets(&mut self) -> Result<(), AppError> {
        match self.manager.ensure_assets().await {
            Ok(()) => {
                self.session
                    .append_log("Model başarıyla yüklendi!", LogSeverity::Success);
                Ok(())
            }
            Err(e) => {
                self.session
                    .append_log("Model yükleme hatası!", LogSeverity::Error);
                Err(e)
            }
        }
    }

    /// Runs one uploaded photo through the full pipeline. Statistics are
    /// updated only when classification completes; every failure leaves the
    /// counters untouched and is reported through the session log.
    pub fn analyze(&mut self, file_name: &str, bytes: &[u8]) -> Result<Analysis, AppError> {
        if !self.manager.is_ready() {
            self.session
                .append_log("Analiz yapılamadı: model yüklü değil", LogSeverity::Error);
            return Err(AppError::ModelUnavailable(
                "model is not loaded".to_string(),
            ));
        }

        let image = match inference::decode_image(bytes) {
            Ok(img) => img,
            Err(e) => {
                self.session.append_log(
                    format!("Fotoğraf yükleme hatası: {}", e),
                    LogSeverity::Error,
                );
                return Err(e);
            }
        };
        self.session.append_log(
            format!("Fotoğraf yüklendi: {}", file_name),
            LogSeverity::Success,
        );

        let result = match self.classify_image(&image) {
            Ok(result) => result,
            Err(e) => {
                self.session
                    .append_log(format!("Analiz hatası: {}", e), LogSeverity::Error);
                return Err(e);
            }
        };

        if result.is_fallback() {
            tracing::debug!(label = %result.label, "label outside category table, using trash");
            self.session.append_log(
                format!(
                    "Bilinmeyen etiket \"{}\", Diğer/Çöp olarak işlendi",
                    result.label
                ),
                LogSeverity::Info,
            );
        }

        let category = result.category.info();
        self.session.record_classification(&result);
        self.session.append_log(
            format!(
                "Analiz: {} (%{:.1})",
                category.name,
                result.confidence * 100.0
            ),
            LogSeverity::Success,
        );

        Ok(Analysis { result, category })
    }

    // Blocking forward pass under the shared model lock.
    fn classify_image(
        &self,
        image: &image::DynamicImage,
    ) -> Result<ClassificationResult, AppError> {
        let tensor = inference::preprocess(image)?;
        let labels = self.manager.get_labels()?;

        let model_lock = self.manager.model();
        let mut guard = model_lock.lock().unwrap();
        let model = guard
            .as_mut()
            .ok_or_else(|| AppError::ModelUnavailable("model is not loaded".to_string()))?;

        inference::classify(model, tensor, &labels)
    }
}
