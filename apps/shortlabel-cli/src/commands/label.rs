use std::path::Path;

use anyhow::Result;
use shortlabel_engine::{GeneratorConfig, InMemoryProvider, Retrying};

/// Label every feature of a JSON dataset held in memory.
pub fn run(
    config: &GeneratorConfig,
    proteins: Option<&Path>,
    features: &Path,
    json_events: bool,
) -> Result<()> {
    let dataset = super::read_dataset(features, proteins)?;

    let mut provider = InMemoryProvider::new();
    for interactor in dataset.interactors {
        provider.add_interactor(interactor);
    }
    for feature in dataset.features {
        provider.add_feature(feature);
    }
    let ids = provider.feature_ids();
    let provider = Retrying::new(provider, config.retry_policy());

    let generator = super::generator(config)?;
    let results = super::label_features(&generator, &ids, &provider, &provider, json_events);
    super::check_results(&results)
}
