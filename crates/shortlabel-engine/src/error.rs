use serde::Serialize;
use shortlabel_core::InteractorType;
use thiserror::Error;

/// Which kind of record a collaborator failed to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Feature,
    Interactor,
    OntologyTerm,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Feature => write!(f, "feature"),
            RecordKind::Interactor => write!(f, "interactor"),
            RecordKind::OntologyTerm => write!(f, "ontology term"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum RetrievalError {
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: String },
    #[error("{kind} {id} could not be retrieved after {attempts} attempts: {last}")]
    Exhausted {
        kind: RecordKind,
        id: String,
        attempts: u32,
        /// Failure of the final attempt
        #[source]
        last: Box<RetrievalError>,
    },
    #[error("Backend error: {message}")]
    Backend { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum TypeError {
    #[error("Interactor {interactor_id} is a {found}, expected a protein or peptide")]
    InteractorType {
        interactor_id: String,
        found: InteractorType,
    },
    #[error("Feature {feature_id} has type {mutation_type}, which is not an eligible mutation type")]
    MutationType {
        feature_id: String,
        mutation_type: String,
    },
    #[error("Range {range_id}: resulting sequence is identical to the original sequence")]
    NoChange { range_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum RangeError {
    #[error("Feature {feature_id} has no ranges")]
    NoRanges { feature_id: String },
    #[error("Range {range_id}: start position is 0")]
    StartPositionZero { range_id: String },
    #[error("Range {range_id}: start position {position} is not determinate")]
    StartPositionUndetermined { range_id: String, position: String },
    #[error("Range {range_id}: original sequence is missing")]
    OriginalSequenceMissing { range_id: String },
    #[error("Range {range_id}: resulting sequence is missing")]
    ResultingSequenceMissing { range_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum SequenceError {
    #[error(
        "Range {range_id} ({start}-{end}): declared original sequence {declared} does not match interactor sequence {computed}"
    )]
    OriginalSequenceMismatch {
        range_id: String,
        start: usize,
        end: usize,
        declared: String,
        computed: String,
    },
    #[error("Range {range_id}: resulting sequence {resulting} contains lowercase residues")]
    LowercaseInResultingSequence { range_id: String, resulting: String },
    #[error(
        "Range {range_id}: resulting sequence {resulting} is shorter than original sequence {original}"
    )]
    ResultingSequenceShorter {
        range_id: String,
        original: String,
        resulting: String,
    },
    #[error("Range {range_id}: {count} deletion placeholders in {resulting}, at most {max} allowed")]
    TooManyDeletionPlaceholders {
        range_id: String,
        resulting: String,
        count: usize,
        max: usize,
    },
    #[error("Range {range_id}: deletion placeholders in {resulting} must be contiguous at one end")]
    WrongDeletionPlacement { range_id: String, resulting: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum EncodingError {
    #[error("Range {range_id}: no three-letter code for residue '{residue}'")]
    UnknownResidue { range_id: String, residue: char },
}

/// Why a label could not be generated for a feature.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "category", content = "detail", rename_all = "snake_case")]
pub enum LabelError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err: LabelError = RangeError::StartPositionZero {
            range_id: "r1".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Range r1: start position is 0");

        let err: LabelError = RetrievalError::Exhausted {
            kind: RecordKind::Feature,
            id: "EBI-9".to_string(),
            attempts: 5,
            last: Box::new(RetrievalError::Backend {
                message: "connection reset".to_string(),
            }),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "feature EBI-9 could not be retrieved after 5 attempts: Backend error: connection reset"
        );
    }

    #[test]
    fn test_error_serializes_with_category() {
        let err: LabelError = TypeError::NoChange {
            range_id: "r1".to_string(),
        }
        .into();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["category"], "type");
        assert_eq!(json["detail"]["error"], "no_change");
        assert_eq!(json["detail"]["range_id"], "r1");
    }

    #[test]
    fn test_exhausted_keeps_last_failure() {
        let err = RetrievalError::Exhausted {
            kind: RecordKind::Interactor,
            id: "P1".to_string(),
            attempts: 2,
            last: Box::new(RetrievalError::NotFound {
                kind: RecordKind::Interactor,
                id: "P1".to_string(),
            }),
        };
        let source = std::error::Error::source(&err).map(|e| e.to_string());
        assert_eq!(source.as_deref(), Some("interactor P1 not found"));

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error"], "exhausted");
        assert_eq!(json["last"]["error"], "not_found");
    }
}
