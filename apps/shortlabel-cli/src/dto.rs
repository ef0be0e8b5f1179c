//! Flat, JSON-friendly records printed by the CLI.

use serde::Serialize;
use shortlabel_core::notation::{ParsedEdit, ParsedFragment};
use shortlabel_engine::{Label, LabelError};

#[derive(Debug, Clone, Serialize)]
pub struct LabelResultDto {
    pub feature_id: String,
    pub label: Option<String>,
    pub error: Option<String>,
}

impl LabelResultDto {
    pub fn new(feature_id: &str, result: &Result<Label, LabelError>) -> Self {
        match result {
            Ok(label) => Self {
                feature_id: feature_id.to_string(),
                label: Some(label.to_string()),
                error: None,
            },
            Err(error) => Self {
                feature_id: feature_id.to_string(),
                label: None,
                error: Some(error.to_string()),
            },
        }
    }

    /// `feature<TAB>label` or `feature<TAB>error: message`
    pub fn to_line(&self) -> String {
        match (&self.label, &self.error) {
            (Some(label), _) => format!("{}\t{}", self.feature_id, label),
            (None, Some(error)) => format!("{}\terror: {}", self.feature_id, error),
            (None, None) => self.feature_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FragmentDto {
    pub start: usize,
    pub end: usize,
    pub start_residue: char,
    pub end_residue: char,
    pub change: &'static str,
    pub residues: Option<String>,
    pub count: Option<usize>,
}

impl From<&ParsedFragment> for FragmentDto {
    fn from(fragment: &ParsedFragment) -> Self {
        let (change, residues, count) = match &fragment.edit {
            ParsedEdit::Residues(r) => ("residues", Some(r.clone()), None),
            ParsedEdit::Deletion => ("deletion", None, None),
            ParsedEdit::DeletionInsertion(r) => ("deletion_insertion", Some(r.clone()), None),
            ParsedEdit::Repeat(n) => ("repeat", None, Some(*n)),
        };
        Self {
            start: fragment.start,
            end: fragment.end,
            start_residue: fragment.start_residue,
            end_residue: fragment.end_residue,
            change,
            residues,
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortlabel_engine::{RangeError, LabelFragment};

    #[test]
    fn test_result_lines() {
        let ok = Ok(Label::assemble(vec![LabelFragment {
            range_id: "r1".to_string(),
            text: "Gly6Asp".to_string(),
        }]));
        assert_eq!(LabelResultDto::new("EBI-1", &ok).to_line(), "EBI-1\tGly6Asp");

        let err: Result<Label, LabelError> = Err(RangeError::NoRanges {
            feature_id: "EBI-2".to_string(),
        }
        .into());
        assert!(LabelResultDto::new("EBI-2", &err)
            .to_line()
            .starts_with("EBI-2\terror: "));
    }
}
