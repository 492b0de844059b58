//! Stand-in classifier used until a real vision service is wired in.
//!
//! Scores an image by mean sample luminance, so a given frame always
//! classifies the same way. Bright frames read as "intruder present".

use crate::image::{CameraImage, ClassifierError, ImageClassifier};

/// A deterministic stub classifier.
#[derive(Debug, Clone, Default)]
pub struct FakeClassifier;

impl FakeClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Pseudo-confidence that the image contains an intruder.
    fn confidence(image: &CameraImage) -> f32 {
        if image.data.is_empty() {
            return 0.0;
        }
        let sum: u64 = image.data.iter().map(|&b| b as u64).sum();
        let mean = sum as f64 / image.data.len() as f64;
        (mean / 255.0) as f32
    }
}

impl ImageClassifier for FakeClassifier {
    fn contains_intruder(
        &self,
        image: &CameraImage,
        confidence_threshold: f32,
    ) -> Result<bool, ClassifierError> {
        if image.data.is_empty() {
            return Err(ClassifierError::EvaluationFailed(
                "empty image".to_string(),
            ));
        }
        Ok(Self::confidence(image) >= confidence_threshold)
    }
}
