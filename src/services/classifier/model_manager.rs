use crate::error::AppError;
use crate::models::classify_types::ModelStatus;
use futures::StreamExt;
use ort::session::Session;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const MODEL_URL: &str =
    "https://drive.google.com/uc?export=download&id=1uB24DQqKSCzTKGSjBsyjc7IuBOiCy4pw";
const CLASS_NAMES_URL: &str =
    "https://drive.google.com/uc?export=download&id=1tL43bFPuXYmd4iQ2A8HZZTTq9mno1z1F";
const MODEL_FILE: &str = "garbage_classifier.onnx";
const CLASS_NAMES_FILE: &str = "class_names.txt";

/// Owns the trained classifier and its class-name list. Assets are fetched
/// once, loaded once, and shared read-only with every classification call
/// afterwards.
#[derive(Clone)]
pub struct ModelManager {
    model_dir: PathBuf,
    model: Arc<Mutex<Option<Session>>>,
    labels: Arc<Mutex<Option<Vec<String>>>>,
    loading: Arc<Mutex<bool>>,
    error: Arc<Mutex<Option<String>>>,
}

impl ModelManager {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            model_dir: data_dir.join("models"),
            model: Arc::new(Mutex::new(None)),
            labels: Arc::new(Mutex::new(None)),
            loading: Arc::new(Mutex::new(false)),
            error: Arc::new(Mutex::new(None)),
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(MODEL_FILE)
    }

    pub fn class_names_path(&self) -> PathBuf {
        self.model_dir.join(CLASS_NAMES_FILE)
    }

    pub fn is_downloaded(&self) -> bool {
        self.model_path().exists() && self.class_names_path().exists()
    }

    pub fn is_ready(&self) -> bool {
        self.model.lock().unwrap().is_some()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.lock().unwrap()
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.lock().unwrap().clone()
    }

    pub fn status(&self) -> ModelStatus {
        ModelStatus {
            downloaded: self.is_downloaded(),
            loading: self.is_loading(),
            ready: self.is_ready(),
            error: self.get_error(),
        }
    }

    /// Download-if-missing followed by load-if-not-ready. A failure leaves
    /// the manager not ready; callers skip classification until a later call
    /// succeeds.
    pub async fn ensure_assets(&self) -> Result<(), AppError> {
        if !self.is_downloaded() {
            self.download_assets().await?;
        }
        if !self.is_ready() {
            self.load_assets().await?;
        }
        Ok(())
    }

    pub async fn download_assets(&self) -> Result<(), AppError> {
        std::fs::create_dir_all(&self.model_dir).map_err(|e| {
            AppError::ModelUnavailable(format!("failed to create model directory: {}", e))
        })?;

        let class_names_path = self.class_names_path();
        if !class_names_path.exists() {
            download_file(CLASS_NAMES_URL, &class_names_path).await?;
        }

        let model_path = self.model_path();
        if !model_path.exists() {
            download_file(MODEL_URL, &model_path).await?;
        }

        Ok(())
    }

    pub async fn load_assets(&self) -> Result<(), AppError> {
        *self.loading.lock().unwrap() = true;
        *self.error.lock().unwrap() = None;

        let result = self.do_load_assets().await;

        *self.loading.lock().unwrap() = false;
        if let Err(ref e) = result {
            *self.error.lock().unwrap() = Some(e.message().to_string());
        }

        result
    }

    async fn do_load_assets(&self) -> Result<(), AppError> {
        let class_names_path = self.class_names_path();
        let contents = tokio::fs::read_to_string(&class_names_path)
            .await
            .map_err(|e| {
                AppError::ModelUnavailable(format!(
                    "failed to read class names {}: {}",
                    class_names_path.display(),
                    e
                ))
            })?;

        let labels = parse_class_names(&contents);
        if labels.is_empty() {
            return Err(AppError::ModelUnavailable(format!(
                "no class names found in {}",
                class_names_path.display()
            )));
        }
        *self.labels.lock().unwrap() = Some(labels);

        let model_path = self.model_path();
        let model = tokio::task::spawn_blocking(move || -> Result<Session, AppError> {
            let _ = ort::init().with_name("recycle-assistant").commit();

            let session = Session::builder()
                .map_err(|e| {
                    AppError::ModelUnavailable(format!("failed to create session builder: {}", e))
                })?
                .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)
                .map_err(|e| {
                    AppError::ModelUnavailable(format!("failed to set optimization level: {}", e))
                })?
                .with_intra_threads(4)
                .map_err(|e| {
                    AppError::ModelUnavailable(format!("failed to set intra threads: {}", e))
                })?
                .commit_from_file(model_path)
                .map_err(|e| {
                    AppError::ModelUnavailable(format!("failed to load ONNX model: {}", e))
                })?;

            Ok(session)
        })
        .await
        .map_err(|e| AppError::ModelUnavailable(format!("model loading task failed: {}", e)))??;

        *self.model.lock().unwrap() = Some(model);
        tracing::info!("garbage classifier loaded");

        Ok(())
    }

    pub fn model(&self) -> Arc<Mutex<Option<Session>>> {
        self.model.clone()
    }

    pub fn get_labels(&self) -> Result<Vec<String>, AppError> {
        self.labels
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AppError::ModelUnavailable("class names are not loaded".to_string()))
    }
}

/// Each line is either `<index> <label>` or just `<label>`; labels are
/// lowercased and kept in file order, which must match the model output
/// indices. Duplicate labels are kept as-is.
pub fn parse_class_names(contents: &str) -> Vec<String> {
    let mut names = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let name = match line.split_once(' ') {
            Some((_, rest)) => rest,
            None => line,
        };
        names.push(name.trim().to_lowercase());
    }
    names
}

async fn download_file(url: &str, dest: &Path) -> Result<(), AppError> {
    tracing::info!(url, dest = %dest.display(), "downloading asset");

    let client = reqwest::Client::new();
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(AppError::ModelUnavailable(format!(
            "failed to download {}: HTTP {}",
            url,
            response.status()
        )));
    }

    let total_size = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;
    let mut last_logged = 0;

    let mut file = tokio::fs::File::create(dest).await.map_err(|e| {
        AppError::ModelUnavailable(format!("failed to create file {}: {}", dest.display(), e))
    })?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        downloaded += chunk.len() as u64;
        tokio::io::AsyncWriteExt::write_all(&mut file, &chunk)
            .await
            .map_err(|e| {
                AppError::ModelUnavailable(format!(
                    "failed to write to {}: {}",
                    dest.display(),
                    e
                ))
            })?;

        if total_size > 0 {
            let progress = (downloaded * 100) / total_size;
            if progress >= last_logged + 10 {
                tracing::debug!(progress, "download progress");
                last_logged = progress;
            }
        }
    }

    Ok(())
}
