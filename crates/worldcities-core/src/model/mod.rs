// crates/worldcities-core/src/model/mod.rs

//! # Data Model
//!
//! Two record kinds with a one-to-many relationship:
//! `Country` (the "one" side) and `City`, which points at its country
//! through `country_id`. A country never owns a list of cities; the
//! back-reference is answered by [`WorldDb::cities_of`](crate::store::WorldDb::cities_of).

pub mod city;
pub mod country;
pub(crate) mod validate;

pub use city::{City, CityPatch, NewCity};
pub use country::{Country, CountryPatch, NewCountry};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which table a record lives in. Used in errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Country,
    City,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Country => f.write_str("country"),
            EntityKind::City => f.write_str("city"),
        }
    }
}
