use serde::Serialize;
use shortlabel_core::amino_acid::{is_placeholder, DELETION_PLACEHOLDER};

use crate::error::{LabelError, SequenceError};
use crate::validate::ValidatedRange;

/// Curators must resolve deletions marked with more placeholders than this.
pub const MAX_DELETION_PLACEHOLDERS: usize = 3;

/// Mutation category of a validated range. Exactly one applies per range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    Substitution,
    Deletion,
    DeletionInsertion,
    /// Residues added to the range. Only the inserted residues follow the
    /// position, so an insertion at either end of a range renders exactly like
    /// a substitution of that range (`G` to `GW` at 28 and `G` to `W` both give
    /// `Gly28Trp`). Such insertions are always flagged for manual curation.
    Insertion {
        inserted: String,
        needs_manual_curation: bool,
    },
    PolyRepeat {
        /// Total length for single-residue repeats, number of copies otherwise
        repeat_unit: usize,
        single_residue: bool,
    },
}

impl Classification {
    pub fn name(&self) -> &'static str {
        match self {
            Classification::Substitution => "substitution",
            Classification::Deletion => "deletion",
            Classification::DeletionInsertion => "deletion-insertion",
            Classification::Insertion { .. } => "insertion",
            Classification::PolyRepeat { .. } => "poly-repeat",
        }
    }

    /// True when the range grows the protein.
    pub fn is_increase(&self) -> bool {
        matches!(
            self,
            Classification::Insertion { .. } | Classification::PolyRepeat { .. }
        )
    }

    pub fn needs_manual_curation(&self) -> bool {
        matches!(
            self,
            Classification::Insertion {
                needs_manual_curation: true,
                ..
            }
        )
    }
}

/// Decide the mutation category of a validated range.
///
/// Deletion placeholders are resolved first; residue-only changes are then
/// tested as poly-repeat, substitution, insertion and finally delins.
pub fn classify(range: &ValidatedRange) -> Result<Classification, LabelError> {
    if range.resulting.is_empty() {
        return Ok(Classification::Deletion);
    }

    if range.resulting.contains(DELETION_PLACEHOLDER) {
        check_placeholders(range)?;
        let remaining = range.resulting.chars().any(|c| !is_placeholder(c));
        return Ok(if remaining {
            Classification::DeletionInsertion
        } else {
            Classification::Deletion
        });
    }

    let original: Vec<char> = range.original.chars().collect();
    let resulting: Vec<char> = range.resulting.chars().collect();

    if let Some(repeat) = poly_repeat(&range.original, &range.resulting) {
        return Ok(repeat);
    }

    if range.is_single_residue() && original.len() == resulting.len() {
        return Ok(Classification::Substitution);
    }

    if let Some(insertion) = insertion(&original, &resulting) {
        return Ok(insertion);
    }

    Ok(Classification::DeletionInsertion)
}

fn check_placeholders(range: &ValidatedRange) -> Result<(), LabelError> {
    let resulting = &range.resulting;
    let count = resulting.chars().filter(|c| is_placeholder(*c)).count();

    if count > MAX_DELETION_PLACEHOLDERS {
        return Err(SequenceError::TooManyDeletionPlaceholders {
            range_id: range.range_id.clone(),
            resulting: resulting.clone(),
            count,
            max: MAX_DELETION_PLACEHOLDERS,
        }
        .into());
    }

    // All placeholders must sit in one run touching either end.
    let leading = resulting.len() - resulting.trim_start_matches(DELETION_PLACEHOLDER).len();
    let trailing = resulting.len() - resulting.trim_end_matches(DELETION_PLACEHOLDER).len();
    if leading != count && trailing != count {
        return Err(SequenceError::WrongDeletionPlacement {
            range_id: range.range_id.clone(),
            resulting: resulting.clone(),
        }
        .into());
    }

    Ok(())
}

fn poly_repeat(original: &str, resulting: &str) -> Option<Classification> {
    let n = original.chars().count();
    let m = resulting.chars().count();
    if n == 0 || m <= n || !resulting.contains(original) {
        return None;
    }

    if let Some(residue) = single_residue(original) {
        if resulting.chars().all(|c| c == residue) {
            return Some(Classification::PolyRepeat {
                repeat_unit: m,
                single_residue: true,
            });
        }
    }

    if m % n == 0 && resulting == original.repeat(m / n) {
        return Some(Classification::PolyRepeat {
            repeat_unit: m / n,
            single_residue: false,
        });
    }

    None
}

fn single_residue(seq: &str) -> Option<char> {
    let first = seq.chars().next()?;
    seq.chars().all(|c| c == first).then_some(first)
}

fn insertion(original: &[char], resulting: &[char]) -> Option<Classification> {
    let n = original.len();
    let m = resulting.len();
    if m <= n {
        return None;
    }

    let prefix = original
        .iter()
        .zip(resulting)
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = original
        .iter()
        .rev()
        .zip(resulting.iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    // Some original residue was changed, not just moved apart.
    if prefix + suffix < n {
        return None;
    }

    // Place the insertion as far towards the C-terminus as possible.
    let inserted: String = resulting[prefix..prefix + (m - n)].iter().collect();
    let unique_split = prefix + suffix == n;
    let flanked = prefix > 0 && prefix < n;

    Some(Classification::Insertion {
        inserted,
        needs_manual_curation: !(unique_split && flanked),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: usize, end: usize, original: &str, resulting: &str) -> ValidatedRange {
        ValidatedRange {
            range_id: "r1".to_string(),
            start,
            end,
            original: original.to_string(),
            resulting: resulting.to_string(),
        }
    }

    fn kind(start: usize, end: usize, original: &str, resulting: &str) -> Classification {
        classify(&range(start, end, original, resulting)).unwrap()
    }

    #[test]
    fn test_single_residue_poly_repeat() {
        assert_eq!(
            kind(10, 10, "Q", "QQQQQQ"),
            Classification::PolyRepeat {
                repeat_unit: 6,
                single_residue: true
            }
        );
        // Homopolymer tract that does not grow by whole copies of the original
        assert_eq!(
            kind(10, 11, "QQ", "QQQQQ"),
            Classification::PolyRepeat {
                repeat_unit: 5,
                single_residue: true
            }
        );
    }

    #[test]
    fn test_multi_residue_poly_repeat() {
        assert_eq!(
            kind(3, 4, "PG", "PGPGPG"),
            Classification::PolyRepeat {
                repeat_unit: 3,
                single_residue: false
            }
        );
    }

    #[test]
    fn test_rotated_repeat_is_not_poly_repeat() {
        let c = kind(3, 4, "AG", "GAGA");
        assert!(!matches!(c, Classification::PolyRepeat { .. }));
    }

    #[test]
    fn test_substitution() {
        assert_eq!(kind(5, 5, "G", "D"), Classification::Substitution);
    }

    #[test]
    fn test_two_residue_change_is_delins() {
        assert_eq!(kind(1, 2, "AL", "VL"), Classification::DeletionInsertion);
    }

    #[test]
    fn test_flanked_insertion() {
        assert_eq!(
            kind(4, 5, "LA", "LGGA"),
            Classification::Insertion {
                inserted: "GG".to_string(),
                needs_manual_curation: false
            }
        );
    }

    #[test]
    fn test_ambiguous_insertion_needs_curation() {
        // The extra A could go before or after the original A
        let c = kind(4, 6, "LAK", "LAAK");
        assert_eq!(
            c,
            Classification::Insertion {
                inserted: "A".to_string(),
                needs_manual_curation: true
            }
        );
        assert!(c.needs_manual_curation());
    }

    #[test]
    fn test_edge_insertion_needs_curation() {
        let c = kind(4, 4, "L", "LW");
        assert_eq!(
            c,
            Classification::Insertion {
                inserted: "W".to_string(),
                needs_manual_curation: true
            }
        );
        assert_eq!(
            kind(4, 5, "LA", "LAAK"),
            Classification::Insertion {
                inserted: "AK".to_string(),
                needs_manual_curation: true
            }
        );
    }

    #[test]
    fn test_growing_change_is_delins() {
        assert_eq!(kind(4, 5, "LA", "VWA"), Classification::DeletionInsertion);
    }

    #[test]
    fn test_empty_resulting_is_deletion() {
        assert_eq!(kind(5, 5, "G", ""), Classification::Deletion);
        assert_eq!(kind(5, 9, "GQQRS", ""), Classification::Deletion);
    }

    #[test]
    fn test_placeholder_deletion() {
        assert_eq!(kind(5, 5, "G", "."), Classification::Deletion);
        assert_eq!(kind(5, 7, "GQQ", "..."), Classification::Deletion);
        assert_eq!(kind(5, 7, "GQQ", "G.."), Classification::DeletionInsertion);
        assert_eq!(kind(5, 7, "GQQ", "..Q"), Classification::DeletionInsertion);
    }

    #[test]
    fn test_too_many_placeholders() {
        let err = classify(&range(5, 8, "GQQR", "....")).unwrap_err();
        assert!(matches!(
            err,
            LabelError::Sequence(SequenceError::TooManyDeletionPlaceholders { count: 4, .. })
        ));
    }

    #[test]
    fn test_wrong_placeholder_placement() {
        for resulting in ["G.Q", ".Q.", "G..Q"] {
            let original = "GQQR".get(..resulting.len()).unwrap();
            let err = classify(&range(5, 4 + resulting.len(), original, resulting)).unwrap_err();
            assert!(
                matches!(
                    err,
                    LabelError::Sequence(SequenceError::WrongDeletionPlacement { .. })
                ),
                "{resulting} should be rejected"
            );
        }
    }

    #[test]
    fn test_classification_flags() {
        assert!(Classification::PolyRepeat {
            repeat_unit: 2,
            single_residue: false
        }
        .is_increase());
        assert!(!Classification::Substitution.is_increase());
        assert!(!Classification::Deletion.needs_manual_curation());
        assert_eq!(Classification::DeletionInsertion.name(), "deletion-insertion");
    }
}
