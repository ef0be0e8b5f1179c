use shortlabel_core::{Interactor, InteractorType};
use tracing::debug;

use crate::FormatError;

/// Split a header into accession and display name.
///
/// UniProt headers (`sp|P42858|HD_HUMAN Huntingtin ...`) yield the accession
/// and entry name; anything else yields the first word and the rest of the line.
fn parse_header(header: &str) -> (String, String) {
    let mut parts = header.splitn(2, char::is_whitespace);
    let token = parts.next().unwrap_or_default();
    let rest = parts.next().map(str::trim).unwrap_or_default();

    let fields: Vec<&str> = token.split('|').collect();
    match fields.as_slice() {
        [db, accession, entry, ..] if matches!(*db, "sp" | "tr") => {
            (accession.to_string(), entry.to_string())
        }
        _ => (token.to_string(), rest.to_string()),
    }
}

fn finish(
    proteins: &mut Vec<Interactor>,
    header: Option<(String, String)>,
    residues: &mut String,
) {
    if let Some((id, name)) = header {
        if residues.is_empty() {
            debug!(%id, "skipping FASTA record without residues");
            return;
        }
        let mut protein =
            Interactor::new(id, InteractorType::Protein, std::mem::take(residues));
        protein.name = name;
        proteins.push(protein);
    }
}

/// Parse a protein FASTA string into interactors
pub fn parse(input: &str) -> Result<Vec<Interactor>, FormatError> {
    let mut proteins = Vec::new();
    let mut header: Option<(String, String)> = None;
    let mut residues = String::new();

    for line in input.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('>') {
            finish(&mut proteins, header.take(), &mut residues);
            residues.clear();
            let (id, name) = parse_header(rest);
            header = (!id.is_empty()).then_some((id, name));
        } else {
            // Stop codons and gap characters are not residues
            residues.extend(
                trimmed
                    .chars()
                    .filter(|c| c.is_ascii_alphabetic())
                    .map(|c| c.to_ascii_uppercase()),
            );
        }
    }
    finish(&mut proteins, header, &mut residues);

    if proteins.is_empty() {
        return Err(FormatError::InvalidFormat(
            "No sequences found in FASTA input".to_string(),
        ));
    }

    Ok(proteins)
}

/// Serialize interactors to FASTA format
pub fn serialize(proteins: &[Interactor]) -> String {
    let mut out = String::new();

    for protein in proteins {
        out.push('>');
        out.push_str(&protein.id);
        if !protein.name.is_empty() {
            out.push(' ');
            out.push_str(&protein.name);
        }
        out.push('\n');

        // 60 residues per line, as UniProt writes them
        for chunk in protein.sequence.as_bytes().chunks(60) {
            out.push_str(&String::from_utf8_lossy(chunk));
            out.push('\n');
        }
    }

    out
}
