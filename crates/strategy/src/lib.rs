pub mod features;
pub mod inference;
pub mod interpreter;
pub mod risk;
pub mod services;

pub use features::FeatureVector;
pub use inference::{Classifier, ClassifierOutput, InferenceError, OnnxClassifier, load_classifier};
pub use services::signal_service::SignalService;
