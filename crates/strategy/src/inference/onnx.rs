use std::path::Path;
use std::sync::Arc;

use tract_onnx::prelude::*;
use tracing::{error, info, warn};

use super::{Classifier, ClassifierOutput, InferenceError};
use crate::features::FeatureVector;

type RunnableModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// ONNX export of the trained classifier.
///
/// Output 0 holds the predicted label (`i64`). Output 1, when present, holds
/// the class probabilities as a plain `f32[1, n_classes]` tensor, so the
/// export must be made with the zip-map disabled.
pub struct OnnxClassifier {
    plan: RunnableModel,
    input_width: usize,
}

impl OnnxClassifier {
    /// `fallback_width` is only used when the artifact leaves its feature
    /// dimension symbolic or undeclared.
    pub fn load(path: impl AsRef<Path>, fallback_width: usize) -> TractResult<Self> {
        Self::from_model(tract_onnx::onnx().model_for_path(path)?, fallback_width)
    }

    fn from_model(model: InferenceModel, fallback_width: usize) -> TractResult<Self> {
        let input_width = match declared_width(&model) {
            Some(width) => {
                if width != fallback_width {
                    warn!(
                        "Classifier declares {} input features, configured width is {}",
                        width, fallback_width
                    );
                }
                width
            }
            None => fallback_width,
        };

        let plan = model
            .with_input_fact(0, f32::fact([1, input_width]).into())?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { plan, input_width })
    }

    fn run(&self, features: &FeatureVector) -> Result<TVec<TValue>, InferenceError> {
        let tensor: Tensor =
            tract_ndarray::Array2::from_shape_vec((1, features.len()), features.to_f32())
                .map_err(|e| InferenceError::Model(e.into()))?
                .into();

        self.plan
            .run(tvec!(tensor.into()))
            .map_err(InferenceError::Model)
    }
}

/// Last dimension of the first input, when the artifact pins it to a number.
fn declared_width(model: &InferenceModel) -> Option<usize> {
    let fact = model.input_fact(0).ok()?.to_typed_fact().ok()?;
    usize::try_from(fact.shape.last()?.as_i64()?).ok()
}

fn read_label(outputs: &[TValue]) -> Result<i64, InferenceError> {
    let labels = outputs
        .first()
        .ok_or(InferenceError::MissingOutput("label"))?
        .to_array_view::<i64>()
        .map_err(InferenceError::Model)?;

    labels
        .iter()
        .next()
        .copied()
        .ok_or(InferenceError::MissingOutput("label"))
}

fn read_probabilities(outputs: &[TValue]) -> Result<Option<Vec<f64>>, InferenceError> {
    let Some(probabilities) = outputs.get(1) else {
        return Ok(None);
    };

    let view = probabilities
        .to_array_view::<f32>()
        .map_err(InferenceError::Model)?;

    Ok(Some(view.iter().map(|p| *p as f64).collect()))
}

impl Classifier for OnnxClassifier {
    fn input_width(&self) -> usize {
        self.input_width
    }

    fn predict_class(&self, features: &FeatureVector) -> Result<i64, InferenceError> {
        read_label(&self.run(features)?)
    }

    fn predict_probabilities(
        &self,
        features: &FeatureVector,
    ) -> Result<Option<Vec<f64>>, InferenceError> {
        read_probabilities(&self.run(features)?)
    }

    fn predict(&self, features: &FeatureVector) -> Result<ClassifierOutput, InferenceError> {
        let outputs = self.run(features)?;

        Ok(ClassifierOutput {
            predicted_class: read_label(&outputs)?,
            class_probabilities: read_probabilities(&outputs)?,
        })
    }
}

/// Loads the artifact once at startup. A missing or unreadable file leaves
/// the pipeline without a classifier instead of aborting the process.
pub fn load_classifier(model_path: &str, fallback_width: usize) -> Option<Arc<dyn Classifier>> {
    let path = Path::new(model_path);
    if !path.exists() {
        warn!(
            "Classifier not found at {:?}. Signals will be served in degraded mode.",
            path
        );
        return None;
    }

    info!("Loading ONNX classifier from {:?}", path);
    match OnnxClassifier::load(path, fallback_width) {
        Ok(classifier) => {
            info!("Classifier expects {} input features", classifier.input_width);
            Some(Arc::new(classifier))
        }
        Err(e) => {
            error!("Failed to load classifier: {:#}", e);
            None
        }
    }
}
