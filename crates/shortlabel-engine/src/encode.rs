use serde::Serialize;
use shortlabel_core::amino_acid::{encode_sequence, is_placeholder, three_letter_code};

use crate::classify::Classification;
use crate::error::{EncodingError, LabelError};
use crate::validate::ValidatedRange;

/// Rendered text for one range, e.g. `Ala1_Leu2delinsValLeu`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelFragment {
    pub range_id: String,
    pub text: String,
}

impl std::fmt::Display for LabelFragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// The full short label of a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    text: String,
    fragments: Vec<LabelFragment>,
}

impl Label {
    /// Join fragments with `;`, bracketing the result when there is more than one.
    pub fn assemble(fragments: Vec<LabelFragment>) -> Self {
        let joined = fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(";");
        let text = if fragments.len() > 1 {
            format!("[{joined}]")
        } else {
            joined
        };
        Self { text, fragments }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn fragments(&self) -> &[LabelFragment] {
        &self.fragments
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render one classified range.
pub fn encode(
    range: &ValidatedRange,
    classification: &Classification,
) -> Result<LabelFragment, LabelError> {
    let mut text = position(range)?;

    match classification {
        Classification::Substitution
        | Classification::PolyRepeat {
            single_residue: false,
            ..
        } => text.push_str(&residues(range, &range.resulting)?),
        Classification::PolyRepeat {
            repeat_unit,
            single_residue: true,
        } => text.push_str(&format!("[{repeat_unit}]")),
        Classification::Insertion { inserted, .. } => text.push_str(&residues(range, inserted)?),
        Classification::Deletion => text.push_str("del"),
        Classification::DeletionInsertion => {
            let kept: String = range.resulting.chars().filter(|c| !is_placeholder(*c)).collect();
            text.push_str("delins");
            text.push_str(&residues(range, &kept)?);
        }
    }

    Ok(LabelFragment {
        range_id: range.range_id.clone(),
        text,
    })
}

/// `Gly5` for a single residue, `Ala1_Leu2` for a span.
fn position(range: &ValidatedRange) -> Result<String, LabelError> {
    let (first, last) = match (range.original.chars().next(), range.original.chars().last()) {
        (Some(first), Some(last)) => (first, last),
        // validated ranges always cover at least one residue
        _ => return Err(unknown(range, '?')),
    };

    let mut text = format!("{}{}", code(range, first)?, range.start);
    if !range.is_single_residue() {
        text.push_str(&format!("_{}{}", code(range, last)?, range.end));
    }
    Ok(text)
}

fn code(range: &ValidatedRange, residue: char) -> Result<&'static str, LabelError> {
    three_letter_code(residue).ok_or_else(|| unknown(range, residue))
}

fn residues(range: &ValidatedRange, seq: &str) -> Result<String, LabelError> {
    encode_sequence(seq).map_err(|residue| unknown(range, residue))
}

fn unknown(range: &ValidatedRange, residue: char) -> LabelError {
    EncodingError::UnknownResidue {
        range_id: range.range_id.clone(),
        residue,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn range(start: usize, end: usize, original: &str, resulting: &str) -> ValidatedRange {
        ValidatedRange {
            range_id: format!("r{start}"),
            start,
            end,
            original: original.to_string(),
            resulting: resulting.to_string(),
        }
    }

    fn text(r: &ValidatedRange, c: Classification) -> String {
        encode(r, &c).unwrap().text
    }

    #[test]
    fn test_substitution() {
        assert_eq!(text(&range(5, 5, "G", "D"), Classification::Substitution), "Gly5Asp");
        assert_eq!(text(&range(3, 3, "R", "*"), Classification::Substitution), "Arg3Ter");
    }

    #[test]
    fn test_single_residue_repeat() {
        let c = Classification::PolyRepeat {
            repeat_unit: 6,
            single_residue: true,
        };
        assert_eq!(text(&range(10, 10, "Q", "QQQQQQ"), c), "Gln10[6]");
    }

    #[test]
    fn test_multi_residue_repeat() {
        let c = Classification::PolyRepeat {
            repeat_unit: 2,
            single_residue: false,
        };
        assert_eq!(text(&range(3, 4, "PG", "PGPG"), c), "Pro3_Gly4ProGlyProGly");
    }

    #[test]
    fn test_deletion() {
        assert_eq!(text(&range(5, 5, "G", ""), Classification::Deletion), "Gly5del");
        assert_eq!(
            text(&range(5, 7, "GQQ", "..."), Classification::Deletion),
            "Gly5_Gln7del"
        );
    }

    #[test]
    fn test_delins() {
        assert_eq!(
            text(&range(1, 2, "AL", "VL"), Classification::DeletionInsertion),
            "Ala1_Leu2delinsValLeu"
        );
        assert_eq!(
            text(&range(5, 7, "GQQ", "G.."), Classification::DeletionInsertion),
            "Gly5_Gln7delinsGly"
        );
    }

    #[test]
    fn test_insertion() {
        let c = Classification::Insertion {
            inserted: "GG".to_string(),
            needs_manual_curation: false,
        };
        assert_eq!(text(&range(4, 5, "LA", "LGGA"), c), "Leu4_Ala5GlyGly");
    }

    #[test]
    fn test_edge_insertion_renders_like_substitution() {
        let r = range(28, 28, "G", "GW");
        let c = crate::classify::classify(&r).unwrap();
        assert!(c.needs_manual_curation());
        assert_eq!(
            text(&r, c),
            text(&range(28, 28, "G", "W"), Classification::Substitution)
        );
    }

    #[test]
    fn test_unknown_residue() {
        let err = encode(&range(5, 5, "G", "J"), &Classification::Substitution).unwrap_err();
        assert_eq!(
            err,
            LabelError::Encoding(EncodingError::UnknownResidue {
                range_id: "r5".to_string(),
                residue: 'J'
            })
        );
    }

    #[test]
    fn test_assemble() {
        let one = Label::assemble(vec![LabelFragment {
            range_id: "r1".to_string(),
            text: "Gly5Asp".to_string(),
        }]);
        assert_eq!(one.as_str(), "Gly5Asp");

        let two = Label::assemble(vec![
            LabelFragment {
                range_id: "r1".to_string(),
                text: "Lys2Arg".to_string(),
            },
            LabelFragment {
                range_id: "r2".to_string(),
                text: "Gly5Asp".to_string(),
            },
        ]);
        assert_eq!(two.to_string(), "[Lys2Arg;Gly5Asp]");
        assert_eq!(two.fragments().len(), 2);
    }
}
