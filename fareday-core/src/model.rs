use serde::Deserialize;

use crate::feature_vector::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::{CoreError, CoreResult};

/// Interface for the fitted price regressor.
///
/// Implementations must be deterministic and free of side effects; the
/// best-day search calls `predict` once per candidate purchase date.
pub trait PriceModel: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> CoreResult<f64>;

    /// Get model name/type
    fn name(&self) -> &str;
}

/// Ordinary least-squares regressor exported as coefficients.
#[derive(Debug, Clone)]
pub struct LinearPriceModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

#[derive(Debug, Deserialize)]
struct LinearModelArtifact {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearPriceModel {
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self { coefficients, intercept }
    }

    /// Parse a model artifact, checking its columns against the feature contract.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let artifact: LinearModelArtifact = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidArtifact(e.to_string()))?;

        if artifact.feature_names != FEATURE_NAMES {
            return Err(CoreError::InvalidArtifact(format!(
                "feature names {:?} do not match expected {:?}",
                artifact.feature_names, FEATURE_NAMES
            )));
        }
        let coefficients: [f64; FEATURE_COUNT] = artifact
            .coefficients
            .as_slice()
            .try_into()
            .map_err(|_| {
                CoreError::InvalidArtifact(format!(
                    "expected {} coefficients, got {}",
                    FEATURE_COUNT,
                    artifact.coefficients.len()
                ))
            })?;

        Ok(Self::new(coefficients, artifact.intercept))
    }
}

impl PriceModel for LinearPriceModel {
    fn predict(&self, features: &FeatureVector) -> CoreResult<f64> {
        let x = features.to_array();
        if let Some(pos) = x.iter().position(|v| !v.is_finite()) {
            return Err(CoreError::ModelInference(format!(
                "non-finite input for {}",
                FEATURE_NAMES[pos]
            )));
        }

        let y = self.intercept
            + self
                .coefficients
                .iter()
                .zip(x.iter())
                .map(|(w, v)| w * v)
                .sum::<f64>();

        if !y.is_finite() {
            return Err(CoreError::ModelInference("non-finite prediction".to_string()));
        }
        Ok(y)
    }

    fn name(&self) -> &str {
        "linear"
    }
}
