//! Application state — resources loaded once, shared read-only.
//!
//! `AppState` is constructed explicitly at startup and handed to the router
//! behind an `Arc`; nothing here is global or mutable after construction.
//! Two initialization tiers: required resources (model + tables) gate
//! readiness, optional channels (translation, notification) only degrade.

use crate::classify::labels::{ClassIndexTable, LabelTableError};
use crate::classify::ClassifierError;
use crate::config::Config;
use crate::notify::Notifier;
use crate::predict::Predictor;
use crate::recommend::{RecommendationError, RecommendationTable};
use crate::translate::TranslationClient;

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error(transparent)]
    Labels(#[from] LabelTableError),
    #[error(transparent)]
    Recommendations(#[from] RecommendationError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// The required resources: classifier plus both lookup tables.
/// Present only when all three loaded successfully.
pub struct Resources {
    pub predictor: Predictor,
}

impl Resources {
    /// Load everything the prediction pipeline needs. Any failure here
    /// blocks readiness — there is no partially-loaded state.
    pub fn load(config: &Config) -> Result<Self, ResourceError> {
        let labels = ClassIndexTable::load(&config.class_indices_path)?;
        tracing::info!(classes = labels.len(), "class index table loaded");

        let recommendations = RecommendationTable::load(&config.recommendations_path)?;
        tracing::info!(diseases = recommendations.len(), "recommendation table loaded");

        let classifier = load_classifier(config)?;

        Ok(Self {
            predictor: Predictor::new(classifier, labels, recommendations),
        })
    }
}

#[cfg(feature = "onnx-model")]
fn load_classifier(
    config: &Config,
) -> Result<Box<dyn crate::classify::Classifier>, ClassifierError> {
    Ok(Box::new(crate::classify::OnnxClassifier::load(
        &config.model_path,
    )?))
}

#[cfg(not(feature = "onnx-model"))]
fn load_classifier(
    _config: &Config,
) -> Result<Box<dyn crate::classify::Classifier>, ClassifierError> {
    Err(ClassifierError::ModelInit(
        "built without the onnx-model feature".into(),
    ))
}

/// Shared application state. Immutable after construction.
pub struct AppState {
    /// `None` when required resources failed to load — the service then
    /// answers 503 on `/predict` and `/health` instead of crashing.
    pub resources: Option<Resources>,
    pub translator: TranslationClient,
    pub notifier: Notifier,
}

impl AppState {
    /// Build the full state from configuration. Required-resource failures
    /// are logged and leave the state not-ready; optional channels degrade
    /// inside their own constructors.
    pub fn initialize(config: &Config) -> Self {
        let resources = match Resources::load(config) {
            Ok(resources) => Some(resources),
            Err(e) => {
                tracing::error!("failed to load classifier resources: {e}");
                None
            }
        };

        Self {
            resources,
            translator: TranslationClient::new(&config.translate_api_base),
            notifier: Notifier::from_config(config),
        }
    }

    /// Whether classifier, class table, and recommendation table are all loaded.
    pub fn ready(&self) -> bool {
        self.resources.is_some()
    }
}
