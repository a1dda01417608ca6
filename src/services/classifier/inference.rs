use crate::error::AppError;
use crate::models::category::CategoryKey;
use crate::models::classify_types::ClassificationResult;
use image::imageops::FilterType;
use image::DynamicImage;
use ndarray::Array4;
use ort::session::Session;
use ort::value::Value;

/// Input edge the garbage classifier expects.
pub const IMG_SIZE: u32 = 224;

// Raw outputs that already sum to 1 (within this tolerance, all values in
// [0, 1]) are treated as probabilities; anything else goes through softmax.
const DISTRIBUTION_TOLERANCE: f32 = 1e-3;

pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, AppError> {
    image::load_from_memory(bytes)
        .map_err(|e| AppError::InvalidImage(format!("failed to decode upload: {}", e)))
}

/// Fixed transform from a decoded image to the model input: 224x224 RGB,
/// channel values scaled to [0, 1], shape (1, 224, 224, 3).
pub fn preprocess(img: &DynamicImage) -> Result<Array4<f32>, AppError> {
    let resized = img.resize_exact(IMG_SIZE, IMG_SIZE, FilterType::Triangle);
    let rgb = resized.to_rgb8();

    // HWC layout straight from the decoder, scaled to [0, 1].
    let data: Vec<f32> = rgb
        .into_raw()
        .into_iter()
        .map(|v| v as f32 / 255.0)
        .collect();

    Array4::from_shape_vec((1, IMG_SIZE as usize, IMG_SIZE as usize, 3), data)
        .map_err(|e| AppError::InvalidImage(format!("failed to shape input tensor: {}", e)))
}

/// Runs one forward pass and returns the raw per-class score vector.
pub fn run_model(model: &mut Session, input: Array4<f32>) -> Result<Vec<f32>, AppError> {
    // Get the input name from the model (assuming single input)
    let input_name = model.inputs()[0].name().to_string();

    let input_tensor = Value::from_array(input)
        .map_err(|e| AppError::Inference(format!("failed to create tensor value: {}", e)))?;

    let outputs = model
        .run(ort::inputs![input_name.as_str() => input_tensor])
        .map_err(|e| AppError::Inference(format!("inference failed: {}", e)))?;

    let output_value = outputs
        .values()
        .next()
        .ok_or_else(|| AppError::Inference("model produced no outputs".to_string()))?;

    let (_, data) = output_value
        .try_extract_tensor::<f32>()
        .map_err(|e| AppError::Inference(format!("failed to extract output tensor: {}", e)))?;

    Ok(data.to_vec())
}

/// Turns a raw score vector into the final category decision. Scores that do
/// not already form a probability distribution are softmax-normalized before
/// the confidence is read; the argmax label is lowercased and looked up in
/// the category table, with anything unknown resolving to the trash bin.
pub fn resolve_scores(
    scores: &[f32],
    labels: &[String],
) -> Result<ClassificationResult, AppError> {
    if scores.is_empty() {
        return Err(AppError::Inference("model output is empty".to_string()));
    }

    let probabilities = normalize_scores(scores);

    let (best_idx, confidence) = probabilities
        .iter()
        .copied()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |best, (i, p)| {
            if p > best.1 {
                (i, p)
            } else {
                best
            }
        });

    let label = labels
        .get(best_idx)
        .cloned()
        .unwrap_or_else(|| format!("class_{}", best_idx))
        .trim()
        .to_lowercase();

    let category = CategoryKey::from_label(&label).unwrap_or(CategoryKey::Trash);

    Ok(ClassificationResult {
        category,
        label,
        confidence,
    })
}

fn normalize_scores(scores: &[f32]) -> Vec<f32> {
    let sum: f32 = scores.iter().sum();
    let in_range = scores.iter().all(|&s| (0.0..=1.0).contains(&s));
    if in_range && (sum - 1.0).abs() <= DISTRIBUTION_TOLERANCE {
        return scores.to_vec();
    }

    // Max-shifted softmax
    let max_score = scores.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let exp_sum: f32 = scores.iter().map(|&s| (s - max_score).exp()).sum();
    scores
        .iter()
        .map(|&s| (s - max_score).exp() / exp_sum)
        .collect()
}

/// Preprocessed tensor in, `ClassificationResult` out. Pure function of the
/// model, tensor and label list; session statistics are the caller's job.
pub fn classify(
    model: &mut Session,
    input: Array4<f32>,
    labels: &[String],
) -> Result<ClassificationResult, AppError> {
    let scores = run_model(model, input)?;
    resolve_scores(&scores, labels)
}
