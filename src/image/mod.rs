//! Image classification port for the camera feed.
//!
//! The panel treats classification as an opaque boolean-returning function of
//! an image and a confidence threshold. The shipped [`FakeClassifier`] is a
//! stub; no real vision happens anywhere in this crate.

pub mod fake;

pub use fake::FakeClassifier;

use std::path::Path;

/// A raw camera frame.
#[derive(Debug, Clone)]
pub struct CameraImage {
    pub width: u32,
    pub height: u32,
    /// Raw 8-bit samples, row-major
    pub data: Vec<u8>,
}

impl CameraImage {
    /// Create an image from raw samples.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Load an image from a file, treating the file contents as raw samples.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let data =
            std::fs::read(path.as_ref()).map_err(|e| ClassifierError::IoError(e.to_string()))?;
        let len = data.len() as u32;
        Ok(Self::new(len, 1, data))
    }
}

/// Errors raised by a classifier implementation.
#[derive(Debug)]
pub enum ClassifierError {
    /// The image could not be read
    IoError(String),
    /// The image could not be evaluated
    EvaluationFailed(String),
}

impl std::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierError::IoError(e) => write!(f, "IO error: {e}"),
            ClassifierError::EvaluationFailed(e) => write!(f, "Evaluation failed: {e}"),
        }
    }
}

impl std::error::Error for ClassifierError {}

/// The image classification port.
pub trait ImageClassifier {
    /// Judge whether the image contains an intruder, at the given confidence
    /// threshold (0.0 to 1.0).
    fn contains_intruder(
        &self,
        image: &CameraImage,
        confidence_threshold: f32,
    ) -> Result<bool, ClassifierError>;
}
