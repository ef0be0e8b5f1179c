pub mod dataset;
pub mod detect;
pub mod fasta;

pub use dataset::Dataset;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Fasta,
    Json,
    Unknown,
}

/// Load a dataset from either a FASTA protein file or a JSON dataset,
/// based on the detected format.
pub fn parse_file(content: &str) -> Result<Dataset, FormatError> {
    match detect::detect_format(content) {
        FileFormat::Fasta => Ok(Dataset::from_interactors(fasta::parse(content)?)),
        FileFormat::Json => dataset::parse(content),
        FileFormat::Unknown => Err(FormatError::InvalidFormat(
            "Unsupported or unrecognized file format".to_string(),
        )),
    }
}
