use std::path::Path;

use anyhow::{Context, Result};
use shortlabel_engine::{GeneratorConfig, Retrying};
use shortlabel_store::SqliteStore;
use tracing::info;

fn open(db: &Path) -> Result<SqliteStore> {
    SqliteStore::open(db).with_context(|| format!("Failed to open store {}", db.display()))
}

/// Copy a dataset into the SQLite store, replacing records with the same ids.
pub fn import(db: &Path, features: &Path, proteins: Option<&Path>) -> Result<()> {
    let dataset = super::read_dataset(features, proteins)?;
    let store = open(db)?;

    for interactor in &dataset.interactors {
        store.insert_interactor(interactor)?;
    }
    for feature in &dataset.features {
        store.insert_feature(feature)?;
    }
    info!(
        interactors = dataset.interactors.len(),
        features = dataset.features.len(),
        db = %db.display(),
        "imported dataset"
    );
    Ok(())
}

/// Label stored features. Labels are reported, never written back.
pub fn label(
    config: &GeneratorConfig,
    db: &Path,
    feature: Option<&str>,
    json_events: bool,
) -> Result<()> {
    let store = Retrying::new(open(db)?, config.retry_policy());
    let ids = match feature {
        Some(id) => vec![id.to_string()],
        None => store.inner().feature_ids()?,
    };

    let generator = super::generator(config)?;
    let results = super::label_features(&generator, &ids, &store, &store, json_events);
    super::check_results(&results)
}
