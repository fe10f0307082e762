use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use crate::features::FeatureVector;

pub mod onnx;

pub use onnx::{OnnxClassifier, load_classifier};

#[derive(Debug, Error)]
pub enum InferenceError {
    /// The feature builder and the loaded artifact disagree on the input shape.
    #[error("feature shape mismatch: classifier expects {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("model execution failed: {0:#}")]
    Model(anyhow::Error),

    #[error("model produced no {0} output")]
    MissingOutput(&'static str),
}

/// A pre-trained binary classifier, opaque to the pipeline.
#[cfg_attr(test, automock)]
pub trait Classifier: Send + Sync {
    /// Number of features the model was trained on.
    fn input_width(&self) -> usize;

    fn predict_class(&self, features: &FeatureVector) -> Result<i64, InferenceError>;

    /// Per-class probabilities aligned with the class labels, or `Ok(None)`
    /// when the model does not produce estimates.
    fn predict_probabilities(
        &self,
        features: &FeatureVector,
    ) -> Result<Option<Vec<f64>>, InferenceError>;

    /// Class and probabilities for one feature vector. Implementations that
    /// can read both from a single model run should override this.
    fn predict(&self, features: &FeatureVector) -> Result<ClassifierOutput, InferenceError> {
        Ok(ClassifierOutput {
            predicted_class: self.predict_class(features)?,
            class_probabilities: self.predict_probabilities(features)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOutput {
    pub predicted_class: i64,
    pub class_probabilities: Option<Vec<f64>>,
}

/// Checks the input shape, then asks the classifier for its class and
/// probabilities.
pub fn classify(
    classifier: &dyn Classifier,
    features: &FeatureVector,
) -> Result<ClassifierOutput, InferenceError> {
    let expected = classifier.input_width();
    if features.len() != expected {
        return Err(InferenceError::ShapeMismatch {
            expected,
            actual: features.len(),
        });
    }

    classifier.predict(features)
}
