use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;

use super::features::FeatureMatrix;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// The model was trained on a different column set or order.
    #[error("expected columns {expected:?}, got {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("{0}")]
    Failed(String),
}

/// Win-probability capability: one probability in [0, 1] per input row,
/// in row order, each the offense's chance of winning from that state.
///
/// Loading, caching and persistence are the implementor's business.
pub trait ProbabilityModel {
    fn predict(&self, rows: &FeatureMatrix) -> Result<Vec<f64>, ModelError>;
}

impl<M: ProbabilityModel + ?Sized> ProbabilityModel for &M {
    fn predict(&self, rows: &FeatureMatrix) -> Result<Vec<f64>, ModelError> {
        (**self).predict(rows)
    }
}

impl<M: ProbabilityModel + ?Sized> ProbabilityModel for Box<M> {
    fn predict(&self, rows: &FeatureMatrix) -> Result<Vec<f64>, ModelError> {
        (**self).predict(rows)
    }
}

/// Probabilities already produced by an external scorer for a known batch.
///
/// Used when the real model lives in another process: the projection is
/// exported, scored elsewhere, and the scores are fed back through here so
/// the same translation path applies.
#[derive(Debug)]
pub struct PrecomputedModel {
    probabilities: Vec<f64>,
    calls: AtomicUsize,
}

impl PrecomputedModel {
    pub fn new(probabilities: Vec<f64>) -> Self {
        PrecomputedModel {
            probabilities,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `predict` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl ProbabilityModel for PrecomputedModel {
    fn predict(&self, rows: &FeatureMatrix) -> Result<Vec<f64>, ModelError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if rows.len() != self.probabilities.len() {
            return Err(ModelError::Failed(format!(
                "{} precomputed probabilities for {} rows",
                self.probabilities.len(),
                rows.len()
            )));
        }
        Ok(self.probabilities.clone())
    }
}
