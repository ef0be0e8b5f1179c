use std::path::Path;

use rusqlite::Connection;
use shortlabel_core::{Feature, Interactor};
use shortlabel_engine::{FeatureProvider, InteractorProvider, RecordKind, RetrievalError};
use tracing::{debug, info};

use crate::db;
use crate::StoreError;

/// Feature and interactor records kept in a SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        db::init_db(&conn)?;
        info!(path = %path.display(), "opened feature store");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        db::init_db(&conn)?;
        Ok(Self { conn })
    }

    pub fn insert_interactor(&self, interactor: &Interactor) -> Result<(), StoreError> {
        db::insert_interactor(&self.conn, interactor)?;
        debug!(id = %interactor.id, "stored interactor");
        Ok(())
    }

    pub fn insert_feature(&self, feature: &Feature) -> Result<(), StoreError> {
        db::insert_feature(&self.conn, feature)?;
        debug!(id = %feature.id, ranges = feature.ranges.len(), "stored feature");
        Ok(())
    }

    pub fn feature_ids(&self) -> Result<Vec<String>, StoreError> {
        Ok(db::feature_ids(&self.conn)?)
    }
}

fn backend(err: rusqlite::Error) -> RetrievalError {
    RetrievalError::Backend {
        message: err.to_string(),
    }
}

impl FeatureProvider for SqliteStore {
    fn feature(&self, id: &str) -> Result<Feature, RetrievalError> {
        db::get_feature(&self.conn, id)
            .map_err(backend)?
            .ok_or_else(|| RetrievalError::NotFound {
                kind: RecordKind::Feature,
                id: id.to_string(),
            })
    }
}

impl InteractorProvider for SqliteStore {
    fn interactor(&self, id: &str) -> Result<Interactor, RetrievalError> {
        db::get_interactor(&self.conn, id)
            .map_err(backend)?
            .ok_or_else(|| RetrievalError::NotFound {
                kind: RecordKind::Interactor,
                id: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortlabel_core::{FeatureRange, InteractorType};
    use shortlabel_engine::{
        CollectingSink, EligibilitySet, RetryPolicy, Retrying, ShortLabelGenerator,
    };

    fn store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .insert_interactor(&Interactor::new("EBI-p1", InteractorType::Protein, "MKVLAGQQ"))
            .unwrap();
        store
            .insert_feature(
                &Feature::new("EBI-f1", "EBI-p1", "MI:0118")
                    .with_range(FeatureRange::new("r1", 6, 6, "G", "D")),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_provider_lookups() {
        let store = store();
        let feature = store.feature("EBI-f1").unwrap();
        assert_eq!(store.interactor_for(&feature).unwrap().sequence, "MKVLAGQQ");
        assert_eq!(
            store.feature("EBI-f2").unwrap_err(),
            RetrievalError::NotFound {
                kind: RecordKind::Feature,
                id: "EBI-f2".to_string()
            }
        );
    }

    #[test]
    fn test_generate_from_store() {
        let store = Retrying::new(store(), RetryPolicy::new(2));
        let generator = ShortLabelGenerator::new(EligibilitySet::new(["MI:0118"]));
        let sink = CollectingSink::new();

        let label = generator
            .generate_by_id("EBI-f1", &store, &store, &sink)
            .unwrap();
        assert_eq!(label.as_str(), "Gly6Asp");
        assert!(store.feature("EBI-f1").unwrap().short_label.is_none());
    }

    #[test]
    fn test_lowercase_sequence_labels_like_uppercase() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO interactors (id, interactor_type, sequence) VALUES ('EBI-p2', 'protein', 'mkvlag')",
                [],
            )
            .unwrap();
        store
            .insert_feature(
                &Feature::new("EBI-f2", "EBI-p2", "MI:0118")
                    .with_range(FeatureRange::new("r1", 2, 2, "K", "R")),
            )
            .unwrap();
        let generator = ShortLabelGenerator::new(EligibilitySet::new(["MI:0118"]));
        let label = generator
            .generate_by_id("EBI-f2", &store, &store, &CollectingSink::new())
            .unwrap();
        assert_eq!(label.as_str(), "Lys2Arg");
    }
}
