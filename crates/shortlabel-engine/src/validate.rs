use serde::Serialize;
use shortlabel_core::FeatureRange;

use crate::error::{LabelError, RangeError, SequenceError, TypeError};

/// A range whose declared residues are consistent with the interactor sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedRange {
    pub range_id: String,
    /// 1-based, inclusive
    pub start: usize,
    /// 1-based, inclusive
    pub end: usize,
    pub original: String,
    pub resulting: String,
}

impl ValidatedRange {
    pub fn is_single_residue(&self) -> bool {
        self.start == self.end
    }
}

/// Check a range against the full interactor sequence.
///
/// Checks run in a fixed order and the first failure is returned.
pub fn validate(range: &FeatureRange, sequence: &str) -> Result<ValidatedRange, LabelError> {
    let range_id = range.id.clone();

    if range.start.value == 0 {
        return Err(RangeError::StartPositionZero { range_id }.into());
    }
    if !range.start.is_determinate() {
        return Err(RangeError::StartPositionUndetermined {
            range_id,
            position: range.start.to_string(),
        }
        .into());
    }

    let original = range
        .original_sequence
        .as_deref()
        .ok_or_else(|| RangeError::OriginalSequenceMissing {
            range_id: range_id.clone(),
        })?;
    let resulting = range
        .resulting_sequence
        .as_deref()
        .ok_or_else(|| RangeError::ResultingSequenceMissing {
            range_id: range_id.clone(),
        })?;

    let start = range.start.value;
    let end = range.end.value;
    let computed = residues_at(sequence, start, end);
    if end < start || end > sequence.len() || computed != original {
        return Err(SequenceError::OriginalSequenceMismatch {
            range_id,
            start,
            end,
            declared: original.to_string(),
            computed: computed.to_string(),
        }
        .into());
    }

    if resulting.chars().any(char::is_lowercase) {
        return Err(SequenceError::LowercaseInResultingSequence {
            range_id,
            resulting: resulting.to_string(),
        }
        .into());
    }

    // An empty resulting sequence deletes the whole range.
    if !resulting.is_empty() && resulting.chars().count() < original.chars().count() {
        return Err(SequenceError::ResultingSequenceShorter {
            range_id,
            original: original.to_string(),
            resulting: resulting.to_string(),
        }
        .into());
    }

    if original == resulting {
        return Err(TypeError::NoChange { range_id }.into());
    }

    Ok(ValidatedRange {
        range_id,
        start,
        end,
        original: original.to_string(),
        resulting: resulting.to_string(),
    })
}

/// Whatever part of `[start, end]` lies inside the sequence.
fn residues_at(sequence: &str, start: usize, end: usize) -> &str {
    let from = (start - 1).min(sequence.len());
    let to = end.clamp(from, sequence.len());
    sequence.get(from..to).unwrap_or("")
}
