use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
pub enum AppError {
    /// The upload could not be decoded into an RGB image.
    InvalidImage(String),
    /// Model assets are missing, failed to load, or the model is not ready.
    ModelUnavailable(String),
    /// The forward pass itself failed.
    Inference(String),
}

impl AppError {
    pub fn message(&self) -> &str {
        match self {
            AppError::InvalidImage(m)
            | AppError::ModelUnavailable(m)
            | AppError::Inference(m) => m,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidImage(m) => write!(f, "invalid image: {}", m),
            AppError::ModelUnavailable(m) => write!(f, "model unavailable: {}", m),
            AppError::Inference(m) => write!(f, "inference failed: {}", m),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::ModelUnavailable(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ModelUnavailable(err.to_string())
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::InvalidImage(err.to_string())
    }
}

impl From<ort::Error> for AppError {
    fn from(err: ort::Error) -> Self {
        AppError::Inference(err.to_string())
    }
}
