// crates/worldcities-core/src/loader/mod.rs

//! # Snapshot Loader
//!
//! Handles the physical layer (files, compression, bincode) for whole-store
//! snapshots, plus JSON seed import behind the `json` feature.

mod common_io;
#[cfg(feature = "json")]
mod seed_json;

pub use common_io::CompressionMode;

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::store::{Tables, WorldDb};
use bincode::Options;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Bumped whenever the encoded layout of [`Tables`] changes.
pub const SNAPSHOT_VERSION: u16 = 1;

/// Decoding stops past this many bytes, so a corrupt length prefix cannot
/// make us allocate without bound.
const SNAPSHOT_LIMIT: u64 = 256 * 1024 * 1024;

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u16,
    tables: &'a Tables,
}

#[derive(Deserialize)]
struct SnapshotIn {
    version: u16,
    tables: Tables,
}

fn snapshot_options() -> impl Options {
    bincode::DefaultOptions::new().with_limit(SNAPSHOT_LIMIT)
}

impl WorldDb {
    /// Writes the full store to `path`, gzip-compressed when the `compact`
    /// feature is on. An existing file is replaced only after the new one is
    /// completely written.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_snapshot_with(path, CompressionMode::default())
    }

    pub fn save_snapshot_with(
        &self,
        path: impl AsRef<Path>,
        compression: CompressionMode,
    ) -> Result<()> {
        let path = path.as_ref();
        common_io::write_atomic(path, compression, |writer| {
            snapshot_options().serialize_into(
                writer,
                &SnapshotOut {
                    version: SNAPSHOT_VERSION,
                    tables: &self.tables,
                },
            )?;
            Ok(())
        })?;

        let stats = self.stats();
        info!(
            path = %path.display(),
            countries = stats.countries,
            cities = stats.cities,
            "snapshot saved"
        );
        Ok(())
    }

    /// Loads a snapshot written by [`WorldDb::save_snapshot`].
    ///
    /// The decoded tables are re-checked with [`WorldDb::check_integrity`],
    /// so a file with orphan cities or clashing ids is refused with
    /// [`StoreError::Constraint`].
    pub fn load_snapshot(path: impl AsRef<Path>, config: StoreConfig) -> Result<Self> {
        let path = path.as_ref();
        let payload = common_io::read_payload(path)?;
        let db = Self::from_snapshot_bytes(&payload, config)?;

        let stats = db.stats();
        info!(
            path = %path.display(),
            countries = stats.countries,
            cities = stats.cities,
            "snapshot loaded"
        );
        Ok(db)
    }

    /// Decodes an uncompressed snapshot payload.
    pub fn from_snapshot_bytes(data: &[u8], config: StoreConfig) -> Result<Self> {
        let snapshot: SnapshotIn = snapshot_options().deserialize(data)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StoreError::InvalidData(format!(
                "snapshot version {} is not supported (expected {SNAPSHOT_VERSION})",
                snapshot.version
            )));
        }
        WorldDb::from_tables(snapshot.tables, config)
    }

    /// Encodes the store as an uncompressed snapshot payload.
    pub fn to_snapshot_bytes(&self) -> Result<Vec<u8>> {
        Ok(snapshot_options().serialize(&SnapshotOut {
            version: SNAPSHOT_VERSION,
            tables: &self.tables,
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewCity, NewCountry};
    use rust_decimal::Decimal;

    fn encode(tables: &Tables, version: u16) -> Vec<u8> {
        snapshot_options()
            .serialize(&SnapshotOut { version, tables })
            .unwrap()
    }

    fn decode(tables: &Tables) -> Result<WorldDb> {
        WorldDb::from_snapshot_bytes(&encode(tables, SNAPSHOT_VERSION), StoreConfig::default())
    }

    fn tables_with_orphan() -> Tables {
        let mut tables = Tables::default();
        let italy = NewCountry::new("Italy", "IT", "ITA").into_country(1).unwrap();
        let paris = NewCity::new("Paris", Decimal::ZERO, Decimal::ZERO, 2)
            .into_city(1)
            .unwrap();
        tables.countries.insert(1, italy);
        tables.cities.insert(1, paris);
        tables.last_country_id = 1;
        tables.last_city_id = 1;
        tables
    }

    #[test]
    fn orphan_city_in_snapshot_is_a_constraint_error() {
        let bytes = encode(&tables_with_orphan(), SNAPSHOT_VERSION);
        let err = WorldDb::from_snapshot_bytes(&bytes, StoreConfig::default()).unwrap_err();
        assert!(err.is_constraint(), "got {err:?}");
    }

    #[test]
    fn malformed_rows_in_snapshot_are_refused() {
        let mut tables = tables_with_orphan();
        tables.cities.get_mut(&1).unwrap().country_id = 1;
        assert!(decode(&tables).is_ok());

        let mut bad = tables.clone();
        bad.countries.get_mut(&1).unwrap().name = "   ".into();
        let err = decode(&bad).unwrap_err();
        assert!(err.is_validation(), "got {err:?}");

        let mut bad = tables.clone();
        bad.countries.get_mut(&1).unwrap().iso2 = "it1x".into();
        let err = decode(&bad).unwrap_err();
        assert!(err.is_validation(), "got {err:?}");

        // Lower-case codes pass the field rules but are never stored that way.
        let mut bad = tables.clone();
        bad.countries.get_mut(&1).unwrap().iso3 = "ita".into();
        let err = decode(&bad).unwrap_err();
        assert!(err.is_constraint(), "got {err:?}");

        let mut bad = tables.clone();
        bad.cities.get_mut(&1).unwrap().name_ascii = "Zürich".into();
        let err = decode(&bad).unwrap_err();
        assert!(err.is_validation(), "got {err:?}");

        let mut bad = tables;
        let paris = bad.cities.get_mut(&1).unwrap();
        paris.lat = Decimal::from(500);
        paris.lon = Decimal::from(-999);
        let err = decode(&bad).unwrap_err();
        assert!(err.is_validation(), "got {err:?}");
    }

    #[test]
    fn id_beyond_counter_is_a_constraint_error() {
        let mut tables = tables_with_orphan();
        tables.cities.clear();
        tables.last_country_id = 0;
        let bytes = encode(&tables, SNAPSHOT_VERSION);
        let err = WorldDb::from_snapshot_bytes(&bytes, StoreConfig::default()).unwrap_err();
        assert!(err.is_constraint());
    }

    #[test]
    fn unknown_version_is_invalid_data() {
        let bytes = encode(&Tables::default(), SNAPSHOT_VERSION + 1);
        let err = WorldDb::from_snapshot_bytes(&bytes, StoreConfig::default()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidData(_)));
    }
}
