//! ONNX Runtime classifier — the production `Classifier` implementation.

use std::path::Path;
use std::sync::Mutex;

use image::RgbImage;
use ort::session::Session;

use super::{to_input_tensor, Classifier, ClassifierError, RawPrediction};
use crate::config::IMG_TARGET_SIZE;

/// Pretrained disease classifier running on ONNX Runtime.
///
/// Uses interior mutability (Mutex) because `ort::Session::run` requires
/// `&mut self` but the `Classifier` trait exposes `&self` for ergonomic
/// shared usage across request handlers.
pub struct OnnxClassifier {
    session: Mutex<Session>,
}

impl OnnxClassifier {
    /// Load the ONNX model from disk.
    pub fn load(model_path: &Path) -> Result<Self, ClassifierError> {
        if !model_path.exists() {
            return Err(ClassifierError::ModelNotFound(model_path.to_path_buf()));
        }

        let session = Session::builder()
            .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
            .with_intra_threads(2)
            .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e: ort::Error| ClassifierError::ModelInit(format!("ONNX load failed: {e}")))?;

        tracing::info!("classifier model loaded from {}", model_path.display());

        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, image: &RgbImage) -> Result<RawPrediction, ClassifierError> {
        use ort::value::TensorRef;

        let pixels = to_input_tensor(image);
        let size = IMG_TARGET_SIZE as usize;

        let input = ndarray::Array4::from_shape_vec((1, size, size, 3), pixels)
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;
        let tensor = TensorRef::from_array_view(&input)
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ClassifierError::Inference("session lock poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| ClassifierError::Inference(format!("ONNX inference failed: {e}")))?;

        // Output shape: [1, num_classes] — one softmax row for the single image
        let (shape, scores) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Inference(format!("output extraction: {e}")))?;

        if shape.len() != 2 || shape[0] != 1 {
            return Err(ClassifierError::Inference(format!(
                "unexpected output shape: {shape:?}, expected [1, num_classes]"
            )));
        }

        let (class_index, confidence) = scores
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .ok_or_else(|| ClassifierError::Inference("empty model output".to_string()))?;

        Ok(RawPrediction {
            class_index,
            confidence: *confidence,
        })
    }
}
