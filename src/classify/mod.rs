//! Classifier adapter — image in, (class index, confidence) out.
//!
//! The `Classifier` trait is the seam between the request pipeline and the
//! pretrained model: the production `OnnxClassifier` lives behind the
//! `onnx-model` feature, and `MockClassifier` scripts outputs for tests.

use std::path::PathBuf;

use image::imageops::FilterType;
use image::RgbImage;

use crate::config::IMG_TARGET_SIZE;

pub mod labels;

#[cfg(feature = "onnx-model")]
mod onnx;
#[cfg(feature = "onnx-model")]
pub use onnx::OnnxClassifier;

/// One forward pass worth of output: the arg-max class and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPrediction {
    pub class_index: usize,
    pub confidence: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("model file not found: {0}")]
    ModelNotFound(PathBuf),
    #[error("failed to initialize classifier: {0}")]
    ModelInit(String),
    #[error("inference failed: {0}")]
    Inference(String),
}

/// A pretrained image classifier.
pub trait Classifier: Send + Sync {
    /// Run one forward pass over an RGB image of any size.
    fn predict(&self, image: &RgbImage) -> Result<RawPrediction, ClassifierError>;
}

/// Resize to the model's square input and scale channels to [0, 1].
///
/// The deployed model was trained on square-stretched inputs, so this is a
/// plain resize, not an aspect-preserving fit. Output is NHWC row-major:
/// `IMG_TARGET_SIZE * IMG_TARGET_SIZE * 3` floats.
pub fn to_input_tensor(image: &RgbImage) -> Vec<f32> {
    let resized = image::imageops::resize(
        image,
        IMG_TARGET_SIZE,
        IMG_TARGET_SIZE,
        FilterType::Triangle,
    );
    resized
        .into_raw()
        .iter()
        .map(|&v| v as f32 / 255.0)
        .collect()
}

/// Scripted classifier for testing — always returns the configured output.
pub struct MockClassifier {
    class_index: usize,
    confidence: f32,
    fail: bool,
}

impl MockClassifier {
    pub fn new(class_index: usize, confidence: f32) -> Self {
        Self {
            class_index,
            confidence,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            class_index: 0,
            confidence: 0.0,
            fail: true,
        }
    }
}

impl Classifier for MockClassifier {
    fn predict(&self, _image: &RgbImage) -> Result<RawPrediction, ClassifierError> {
        if self.fail {
            return Err(ClassifierError::Inference("mock inference failure".into()));
        }
        Ok(RawPrediction {
            class_index: self.class_index,
            confidence: self.confidence,
        })
    }
}
