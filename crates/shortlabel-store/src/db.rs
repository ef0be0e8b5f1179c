use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result as SqlResult};
use shortlabel_core::{Feature, FeatureRange, Interactor, InteractorType, Position, PositionStatus};

/// Create the interactor, feature and range tables if they do not exist.
pub fn init_db(conn: &Connection) -> SqlResult<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
        CREATE TABLE IF NOT EXISTS interactors (
            id               TEXT PRIMARY KEY,
            name             TEXT NOT NULL DEFAULT '',
            interactor_type  TEXT NOT NULL,
            sequence         TEXT NOT NULL DEFAULT ''
        );
        CREATE TABLE IF NOT EXISTS features (
            id               TEXT PRIMARY KEY,
            interactor_id    TEXT NOT NULL,
            mutation_type    TEXT NOT NULL,
            short_label      TEXT
        );
        CREATE TABLE IF NOT EXISTS feature_ranges (
            feature_id          TEXT NOT NULL REFERENCES features(id) ON DELETE CASCADE,
            ordinal             INTEGER NOT NULL,
            id                  TEXT NOT NULL,
            start_pos           INTEGER NOT NULL,
            start_status        TEXT NOT NULL,
            end_pos             INTEGER NOT NULL,
            end_status          TEXT NOT NULL,
            original_sequence   TEXT,
            resulting_sequence  TEXT,
            PRIMARY KEY (feature_id, ordinal)
        );
        CREATE INDEX IF NOT EXISTS idx_features_interactor ON features(interactor_id);",
    )
}

// Statuses are stored as their JSON string form, e.g. `"fuzzy"`.
fn status_to_text(status: PositionStatus) -> SqlResult<String> {
    serde_json::to_string(&status).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn status_from_text(idx: usize, text: String) -> SqlResult<PositionStatus> {
    serde_json::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Insert or replace an interactor.
pub fn insert_interactor(conn: &Connection, interactor: &Interactor) -> SqlResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO interactors (id, name, interactor_type, sequence)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            interactor.id,
            interactor.name,
            interactor.interactor_type.to_string(),
            interactor.sequence,
        ],
    )?;
    Ok(())
}

/// Insert or replace a feature together with its ranges.
/// Ranges keep the order they have on the feature.
pub fn insert_feature(conn: &Connection, feature: &Feature) -> SqlResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "DELETE FROM feature_ranges WHERE feature_id = ?1",
        params![feature.id],
    )?;
    tx.execute(
        "INSERT OR REPLACE INTO features (id, interactor_id, mutation_type, short_label)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            feature.id,
            feature.interactor_id,
            feature.mutation_type,
            feature.short_label,
        ],
    )?;
    for (ordinal, range) in feature.ranges.iter().enumerate() {
        tx.execute(
            "INSERT INTO feature_ranges
                (feature_id, ordinal, id, start_pos, start_status, end_pos, end_status,
                 original_sequence, resulting_sequence)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                feature.id,
                ordinal,
                range.id,
                range.start.value,
                status_to_text(range.start.status)?,
                range.end.value,
                status_to_text(range.end.status)?,
                range.original_sequence,
                range.resulting_sequence,
            ],
        )?;
    }
    tx.commit()
}

/// Get a single interactor by ID.
pub fn get_interactor(conn: &Connection, id: &str) -> SqlResult<Option<Interactor>> {
    conn.query_row(
        "SELECT id, name, interactor_type, sequence FROM interactors WHERE id = ?1",
        params![id],
        row_to_interactor,
    )
    .optional()
}

/// Get a single feature by ID, with its ranges.
pub fn get_feature(conn: &Connection, id: &str) -> SqlResult<Option<Feature>> {
    let feature = conn
        .query_row(
            "SELECT id, interactor_id, mutation_type, short_label FROM features WHERE id = ?1",
            params![id],
            |row| {
                Ok(Feature {
                    id: row.get(0)?,
                    interactor_id: row.get(1)?,
                    mutation_type: row.get(2)?,
                    short_label: row.get(3)?,
                    ranges: Vec::new(),
                })
            },
        )
        .optional()?;

    let Some(mut feature) = feature else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT id, start_pos, start_status, end_pos, end_status,
                original_sequence, resulting_sequence
         FROM feature_ranges WHERE feature_id = ?1 ORDER BY ordinal",
    )?;
    let rows = stmt.query_map(params![id], row_to_range)?;
    for row in rows {
        feature.ranges.push(row?);
    }
    Ok(Some(feature))
}

/// All feature IDs, sorted.
pub fn feature_ids(conn: &Connection) -> SqlResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT id FROM features ORDER BY id")?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    let mut ids = Vec::new();
    for row in rows {
        ids.push(row?);
    }
    Ok(ids)
}

fn row_to_interactor(row: &rusqlite::Row) -> SqlResult<Interactor> {
    let mut interactor = Interactor::new(
        row.get::<_, String>(0)?,
        InteractorType::from_name(&row.get::<_, String>(2)?),
        row.get::<_, String>(3)?,
    );
    interactor.name = row.get(1)?;
    Ok(interactor)
}

fn row_to_range(row: &rusqlite::Row) -> SqlResult<FeatureRange> {
    Ok(FeatureRange {
        id: row.get(0)?,
        start: Position::with_status(row.get(1)?, status_from_text(2, row.get(2)?)?),
        end: Position::with_status(row.get(3)?, status_from_text(4, row.get(4)?)?),
        original_sequence: row.get(5)?,
        resulting_sequence: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        conn
    }

    fn feature() -> Feature {
        let mut fuzzy = FeatureRange::new("r2", 9, 9, "K", "A");
        fuzzy.start = Position::with_status(9, PositionStatus::Fuzzy);
        fuzzy.resulting_sequence = None;
        Feature::new("EBI-f1", "EBI-p1", "MI:0118")
            .with_range(FeatureRange::new("r1", 3, 4, "VL", "VLL"))
            .with_range(fuzzy)
    }

    #[test]
    fn test_init_is_idempotent() {
        let conn = test_db();
        init_db(&conn).unwrap();
        assert!(feature_ids(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_interactor_roundtrip() {
        let conn = test_db();
        let mut dna = Interactor::new("EBI-n1", InteractorType::NucleicAcid, "acgt");
        dna.name = "promoter".to_string();
        insert_interactor(&conn, &dna).unwrap();

        let fetched = get_interactor(&conn, "EBI-n1").unwrap().unwrap();
        assert_eq!(fetched.interactor_type, InteractorType::NucleicAcid);
        assert_eq!(fetched.sequence, "ACGT");
        assert_eq!(fetched.name, "promoter");
        assert!(get_interactor(&conn, "EBI-n2").unwrap().is_none());
    }

    #[test]
    fn test_feature_roundtrip_keeps_range_order() {
        let conn = test_db();
        insert_feature(&conn, &feature()).unwrap();

        let fetched = get_feature(&conn, "EBI-f1").unwrap().unwrap();
        assert_eq!(fetched.ranges, feature().ranges);
        assert_eq!(fetched.ranges[1].start.status, PositionStatus::Fuzzy);
        assert!(fetched.short_label.is_none());
    }

    #[test]
    fn test_reinsert_replaces_ranges() {
        let conn = test_db();
        insert_feature(&conn, &feature()).unwrap();
        let mut smaller = feature();
        smaller.ranges.truncate(1);
        insert_feature(&conn, &smaller).unwrap();

        let fetched = get_feature(&conn, "EBI-f1").unwrap().unwrap();
        assert_eq!(fetched.ranges.len(), 1);
        assert_eq!(feature_ids(&conn).unwrap(), vec!["EBI-f1".to_string()]);
    }

    #[test]
    fn test_lowercase_stored_sequence_uppercased() {
        let conn = test_db();
        conn.execute(
            "INSERT INTO interactors (id, interactor_type, sequence) VALUES ('EBI-p1', 'protein', 'mkvlag')",
            [],
        )
        .unwrap();
        let fetched = get_interactor(&conn, "EBI-p1").unwrap().unwrap();
        assert_eq!(fetched.sequence, "MKVLAG");
        assert_eq!(fetched.interactor_type, InteractorType::Protein);
    }
}
