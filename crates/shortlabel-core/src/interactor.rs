use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractorType {
    Protein,
    Peptide,
    NucleicAcid,
    SmallMolecule,
    Complex,
    #[serde(other)]
    Other,
}

impl InteractorType {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "protein" => InteractorType::Protein,
            "peptide" => InteractorType::Peptide,
            "nucleic acid" | "nucleic_acid" | "dna" | "rna" => InteractorType::NucleicAcid,
            "small molecule" | "small_molecule" => InteractorType::SmallMolecule,
            "complex" => InteractorType::Complex,
            _ => InteractorType::Other,
        }
    }

    /// Only polypeptides carry an amino-acid sequence that labels can refer to.
    pub fn is_polypeptide(&self) -> bool {
        matches!(self, InteractorType::Protein | InteractorType::Peptide)
    }
}

impl std::fmt::Display for InteractorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InteractorType::Protein => write!(f, "protein"),
            InteractorType::Peptide => write!(f, "peptide"),
            InteractorType::NucleicAcid => write!(f, "nucleic acid"),
            InteractorType::SmallMolecule => write!(f, "small molecule"),
            InteractorType::Complex => write!(f, "complex"),
            InteractorType::Other => write!(f, "other"),
        }
    }
}

/// The molecule a feature is annotated on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interactor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub interactor_type: InteractorType,
    #[serde(default, deserialize_with = "uppercase_sequence")]
    pub sequence: String,
}

/// Residues are compared case-sensitively, so every loaded sequence is
/// uppercased the same way [`Interactor::new`] does.
fn uppercase_sequence<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|seq| seq.to_uppercase())
}

impl Interactor {
    pub fn new(
        id: impl Into<String>,
        interactor_type: InteractorType,
        sequence: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            interactor_type,
            sequence: sequence.into().to_uppercase(),
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Residues between 1-based inclusive positions `start` and `end`.
    ///
    /// Returns `None` when the span is inverted or runs past the sequence.
    pub fn residues(&self, start: usize, end: usize) -> Option<&str> {
        if start == 0 || end < start {
            return None;
        }
        self.sequence.get(start - 1..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_interactor() {
        let p = Interactor::new("EBI-1", InteractorType::Protein, "mkvl");
        assert_eq!(p.sequence, "MKVL");
        assert_eq!(p.len(), 4);
        assert!(p.interactor_type.is_polypeptide());
    }

    #[test]
    fn test_deserialized_sequence_uppercased() {
        let p: Interactor = serde_json::from_str(
            r#"{"id": "EBI-1", "interactor_type": "protein", "sequence": "mkvLag"}"#,
        )
        .unwrap();
        assert_eq!(p.sequence, "MKVLAG");
        assert_eq!(p.residues(2, 2), Some("K"));

        let bare: Interactor =
            serde_json::from_str(r#"{"id": "EBI-2", "interactor_type": "peptide"}"#).unwrap();
        assert!(bare.is_empty());
    }

    #[test]
    fn test_residues() {
        let p = Interactor::new("EBI-1", InteractorType::Protein, "MKVLAG");
        assert_eq!(p.residues(1, 1), Some("M"));
        assert_eq!(p.residues(2, 4), Some("KVL"));
        assert_eq!(p.residues(5, 6), Some("AG"));
        assert_eq!(p.residues(5, 7), None);
        assert_eq!(p.residues(0, 2), None);
        assert_eq!(p.residues(4, 3), None);
    }

    #[test]
    fn test_type_from_name() {
        assert_eq!(InteractorType::from_name("Protein"), InteractorType::Protein);
        assert_eq!(InteractorType::from_name("peptide"), InteractorType::Peptide);
        assert_eq!(InteractorType::from_name("dna"), InteractorType::NucleicAcid);
        assert_eq!(InteractorType::from_name("lipid"), InteractorType::Other);
        assert!(!InteractorType::SmallMolecule.is_polypeptide());
    }
}
