use anyhow::{Context, Result};
use shortlabel_core::notation::parse_label;

use crate::dto::FragmentDto;

/// Print the fragments of a short label as JSON.
pub fn run(label: &str) -> Result<()> {
    let fragments = parse_label(label)?;
    let dtos: Vec<FragmentDto> = fragments.iter().map(FragmentDto::from).collect();
    let json = serde_json::to_string_pretty(&dtos).context("Failed to serialize fragments")?;
    println!("{json}");
    Ok(())
}
