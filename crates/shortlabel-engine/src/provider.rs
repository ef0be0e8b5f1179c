//! Seams to the systems that own feature, interactor and ontology records.
//!
//! The engine never retries anything itself. Bounded retries are applied by
//! wrapping a provider in [`Retrying`].

use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shortlabel_core::{Feature, Interactor};
use tracing::debug;

use crate::error::{RecordKind, RetrievalError};

pub trait FeatureProvider {
    fn feature(&self, id: &str) -> Result<Feature, RetrievalError>;
}

pub trait InteractorProvider {
    fn interactor(&self, id: &str) -> Result<Interactor, RetrievalError>;

    /// The interactor a feature is annotated on.
    fn interactor_for(&self, feature: &Feature) -> Result<Interactor, RetrievalError> {
        self.interactor(&feature.interactor_id)
    }
}

/// Ontology lookups used to expand a root mutation type into its descendants.
pub trait OntologyProvider {
    fn descendants(&self, term: &str) -> Result<Vec<String>, RetrievalError>;
}

/// Features and interactors held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    features: HashMap<String, Feature>,
    interactors: HashMap<String, Interactor>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_feature(&mut self, feature: Feature) {
        self.features.insert(feature.id.clone(), feature);
    }

    pub fn add_interactor(&mut self, interactor: Interactor) {
        self.interactors.insert(interactor.id.clone(), interactor);
    }

    /// Feature ids in sorted order.
    pub fn feature_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.features.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl FeatureProvider for InMemoryProvider {
    fn feature(&self, id: &str) -> Result<Feature, RetrievalError> {
        self.features
            .get(id)
            .cloned()
            .ok_or_else(|| RetrievalError::NotFound {
                kind: RecordKind::Feature,
                id: id.to_string(),
            })
    }
}

impl InteractorProvider for InMemoryProvider {
    fn interactor(&self, id: &str) -> Result<Interactor, RetrievalError> {
        self.interactors
            .get(id)
            .cloned()
            .ok_or_else(|| RetrievalError::NotFound {
                kind: RecordKind::Interactor,
                id: id.to_string(),
            })
    }
}

/// Bounded retries with a linear backoff between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Pause after the first failure; grows by the same step per attempt.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Run `lookup` until it succeeds or the attempts are used up. The
    /// final failure is kept inside [`RetrievalError::Exhausted`].
    pub fn run<T>(
        &self,
        kind: RecordKind,
        id: &str,
        mut lookup: impl FnMut() -> Result<T, RetrievalError>,
    ) -> Result<T, RetrievalError> {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match lookup() {
                Ok(record) => return Ok(record),
                Err(err) if attempt >= attempts => {
                    return Err(RetrievalError::Exhausted {
                        kind,
                        id: id.to_string(),
                        attempts,
                        last: Box::new(err),
                    });
                }
                Err(err) => {
                    let pause = self.delay * attempt;
                    debug!(%kind, id, attempt, %err, ?pause, "lookup failed, retrying");
                    thread::sleep(pause);
                    attempt += 1;
                }
            }
        }
    }
}

/// Applies a [`RetryPolicy`] to every lookup of the wrapped provider.
#[derive(Debug, Clone)]
pub struct Retrying<P> {
    inner: P,
    policy: RetryPolicy,
}

impl<P> Retrying<P> {
    pub fn new(inner: P, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: FeatureProvider> FeatureProvider for Retrying<P> {
    fn feature(&self, id: &str) -> Result<Feature, RetrievalError> {
        self.policy
            .run(RecordKind::Feature, id, || self.inner.feature(id))
    }
}

impl<P: InteractorProvider> InteractorProvider for Retrying<P> {
    fn interactor(&self, id: &str) -> Result<Interactor, RetrievalError> {
        self.policy
            .run(RecordKind::Interactor, id, || self.inner.interactor(id))
    }
}

impl<P: OntologyProvider> OntologyProvider for Retrying<P> {
    fn descendants(&self, term: &str) -> Result<Vec<String>, RetrievalError> {
        self.policy
            .run(RecordKind::OntologyTerm, term, || self.inner.descendants(term))
    }
}
