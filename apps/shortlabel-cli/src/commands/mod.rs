pub mod label;
pub mod parse;
pub mod store;

use std::convert::Infallible;
use std::fs;
use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use shortlabel_engine::eligibility::cached_or_init;
use shortlabel_engine::{
    EventSink, FeatureProvider, GeneratorConfig, InteractorProvider, Label, LabelError,
    ShortLabelGenerator, TracingSink,
};
use shortlabel_formats::{dataset, fasta, Dataset};
use tracing::info;

use crate::dto::LabelResultDto;
use crate::sink::JsonLinesSink;

/// Read a JSON feature dataset, filling in sequences from an optional FASTA file.
fn read_dataset(features: &Path, proteins: Option<&Path>) -> Result<Dataset> {
    let content = fs::read_to_string(features)
        .with_context(|| format!("Failed to read {}", features.display()))?;
    let mut dataset = dataset::parse(&content)
        .with_context(|| format!("Failed to parse {}", features.display()))?;

    if let Some(path) = proteins {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let proteins =
            fasta::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
        dataset.attach_sequences(proteins);
    }
    Ok(dataset)
}

fn generator(config: &GeneratorConfig) -> Result<ShortLabelGenerator> {
    let eligibility = cached_or_init(|| Ok::<_, Infallible>(config.eligibility_set()))?;
    Ok(ShortLabelGenerator::new(eligibility.clone()))
}

/// Label each feature in turn, reporting either JSON event lines or one
/// result line per feature on stdout.
fn label_features(
    generator: &ShortLabelGenerator,
    ids: &[String],
    features: &dyn FeatureProvider,
    interactors: &dyn InteractorProvider,
    json_events: bool,
) -> Vec<(String, Result<Label, LabelError>)> {
    let sink: Box<dyn EventSink> = if json_events {
        Box::new(JsonLinesSink::new(io::stdout()))
    } else {
        Box::new(TracingSink)
    };

    let mut results = Vec::with_capacity(ids.len());
    for id in ids {
        let result = generator.generate_by_id(id, features, interactors, sink.as_ref());
        if !json_events {
            println!("{}", LabelResultDto::new(id, &result).to_line());
        }
        results.push((id.clone(), result));
    }

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    info!(
        labelled = results.len() - failed,
        failed, "finished labelling features"
    );
    results
}

/// Fail the command when any feature could not be labelled.
fn check_results(results: &[(String, Result<Label, LabelError>)]) -> Result<()> {
    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    if failed > 0 {
        bail!("{} of {} features could not be labelled", failed, results.len());
    }
    Ok(())
}
