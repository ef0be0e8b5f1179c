//! JSON feature datasets.
//!
//! ```json
//! {
//!   "interactors": [{"id": "P42858", "interactor_type": "protein", "sequence": "MATLEK"}],
//!   "features": [{
//!     "id": "EBI-9", "interactor_id": "P42858", "mutation_type": "MI:0118",
//!     "ranges": [{"id": "r1", "start": {"value": 5}, "end": {"value": 5},
//!                 "original_sequence": "E", "resulting_sequence": "K"}]
//!   }]
//! }
//! ```
//!
//! Sequences may be left out of the JSON and supplied from a FASTA file with
//! [`Dataset::attach_sequences`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use shortlabel_core::{Feature, Interactor};
use tracing::{debug, warn};

use crate::FormatError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub interactors: Vec<Interactor>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl Dataset {
    pub fn from_interactors(interactors: Vec<Interactor>) -> Self {
        Self {
            interactors,
            features: Vec::new(),
        }
    }

    pub fn interactor(&self, id: &str) -> Option<&Interactor> {
        self.interactors.iter().find(|i| i.id == id)
    }

    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Fill in sequences from `proteins`, adding proteins the dataset does not
    /// list yet. Sequences already present in the dataset are kept.
    pub fn attach_sequences(&mut self, proteins: Vec<Interactor>) {
        for protein in proteins {
            match self.interactors.iter_mut().find(|i| i.id == protein.id) {
                Some(existing) if existing.sequence.is_empty() => {
                    existing.sequence = protein.sequence;
                }
                Some(existing) => {
                    if existing.sequence != protein.sequence {
                        warn!(id = %existing.id, "dataset sequence differs from FASTA, keeping dataset");
                    }
                }
                None => self.interactors.push(protein),
            }
        }
    }

    /// Reject datasets that reuse an interactor or feature id.
    pub fn check_ids(&self) -> Result<(), FormatError> {
        let mut seen = HashSet::new();
        for interactor in &self.interactors {
            if !seen.insert(interactor.id.as_str()) {
                return Err(FormatError::DuplicateId {
                    kind: "interactor",
                    id: interactor.id.clone(),
                });
            }
        }
        seen.clear();
        for feature in &self.features {
            if !seen.insert(feature.id.as_str()) {
                return Err(FormatError::DuplicateId {
                    kind: "feature",
                    id: feature.id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse a JSON dataset. A bare array is read as a list of features.
pub fn parse(content: &str) -> Result<Dataset, FormatError> {
    let dataset = if content.trim_start().starts_with('[') {
        Dataset {
            interactors: Vec::new(),
            features: serde_json::from_str(content)?,
        }
    } else {
        serde_json::from_str(content)?
    };
    dataset.check_ids()?;
    debug!(
        interactors = dataset.interactors.len(),
        features = dataset.features.len(),
        "parsed dataset"
    );
    Ok(dataset)
}
