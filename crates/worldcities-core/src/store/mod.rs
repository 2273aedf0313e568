// crates/worldcities-core/src/store/mod.rs

//! # Store
//!
//! [`WorldDb`] holds the two tables and is the only way to change them.
//! Every mutating call validates its input, checks the referential rules
//! against the current tables, and only then writes, so a failed call
//! leaves the store exactly as it was.

mod city;
mod country;

use crate::common::DbStats;
use crate::config::{DeletePolicy, StoreConfig};
use crate::error::{Result, StoreError};
use crate::model::{City, Country, EntityKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw table state. This is exactly what a snapshot file contains.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Tables {
    pub(crate) countries: BTreeMap<u32, Country>,
    pub(crate) cities: BTreeMap<u32, City>,
    /// Highest country id ever handed out. Ids are never reused.
    pub(crate) last_country_id: u32,
    pub(crate) last_city_id: u32,
}

/// In-process country/city store.
#[derive(Clone, Debug, Default)]
pub struct WorldDb {
    pub(crate) tables: Tables,
    pub(crate) config: StoreConfig,
}

/// Outcome of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReport {
    pub kind: EntityKind,
    pub id: u32,
    /// Cities removed along with a country under [`DeletePolicy::Cascade`].
    pub cascaded_cities: Vec<u32>,
}

impl WorldDb {
    /// Empty store with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store with the given settings.
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(WorldDb {
            tables: Tables::default(),
            config,
        })
    }

    pub(crate) fn from_tables(tables: Tables, config: StoreConfig) -> Result<Self> {
        config.validate()?;
        let db = WorldDb { tables, config };
        db.check_integrity()?;
        Ok(db)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn set_delete_policy(&mut self, policy: DeletePolicy) {
        self.config.delete_policy = policy;
    }

    pub fn stats(&self) -> DbStats {
        DbStats {
            countries: self.tables.countries.len(),
            cities: self.tables.cities.len(),
        }
    }

    /// Re-checks every invariant over the whole store: the field rules of
    /// each row, id ranges, code uniqueness and foreign keys.
    ///
    /// Mutations keep these true on their own; this exists for data that
    /// arrives from outside (snapshots, seed files).
    pub fn check_integrity(&self) -> Result<()> {
        let t = &self.tables;

        for (key, country) in &t.countries {
            if *key != country.id {
                return Err(StoreError::Constraint(format!(
                    "country stored under key {key} carries id {}",
                    country.id
                )));
            }
            if country.id == 0 || country.id > t.last_country_id {
                return Err(StoreError::Constraint(format!(
                    "country id {} is outside the assigned range 1..={}",
                    country.id, t.last_country_id
                )));
            }
            country.check()?;
        }
        self.check_codes_unique()?;

        for (key, city) in &t.cities {
            if *key != city.id {
                return Err(StoreError::Constraint(format!(
                    "city stored under key {key} carries id {}",
                    city.id
                )));
            }
            if city.id == 0 || city.id > t.last_city_id {
                return Err(StoreError::Constraint(format!(
                    "city id {} is outside the assigned range 1..={}",
                    city.id, t.last_city_id
                )));
            }
            city.check()?;
            if !t.countries.contains_key(&city.country_id) {
                return Err(StoreError::Constraint(format!(
                    "city {} references missing country {}",
                    city.id, city.country_id
                )));
            }
        }
        Ok(())
    }

    fn check_codes_unique(&self) -> Result<()> {
        let countries: Vec<&Country> = self.tables.countries.values().collect();
        for (i, a) in countries.iter().enumerate() {
            for b in &countries[i + 1..] {
                if let Some(code) = shared_code(a, b) {
                    return Err(StoreError::Constraint(format!(
                        "countries {} and {} share code {code}",
                        a.id, b.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// The id the next insert of `kind` will receive. Nothing is reserved
    /// until the insert commits.
    fn next_id(last: u32, kind: EntityKind) -> Result<u32> {
        last.checked_add(1)
            .ok_or_else(|| StoreError::Constraint(format!("{kind} id space exhausted")))
    }
}

/// The ISO code two countries have in common, if any.
fn shared_code<'c>(a: &'c Country, b: &Country) -> Option<&'c str> {
    if a.iso2.eq_ignore_ascii_case(&b.iso2) {
        Some(&a.iso2)
    } else if a.iso3.eq_ignore_ascii_case(&b.iso3) {
        Some(&a.iso3)
    } else {
        None
    }
}
