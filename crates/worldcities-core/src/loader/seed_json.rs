// crates/worldcities-core/src/loader/seed_json.rs
#![cfg(feature = "json")]

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::model::{NewCity, NewCountry};
use crate::store::{Tables, WorldDb};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Seed document:
///
/// ```json
/// {
///   "countries": [{ "id": 1, "name": "Italy", "iso2": "IT", "iso3": "ITA" }],
///   "cities": [{ "id": 1, "name": "Roma", "name_ascii": "Roma",
///                "lat": 41.9, "lon": 12.5, "country_id": 1 }]
/// }
/// ```
///
/// Camel-case keys (`countryId`, `name_ASCII`, `ISO2`, ...) are accepted
/// too, so exports of the web backend load unchanged.
#[derive(Debug, Deserialize)]
struct SeedRaw {
    #[serde(default)]
    countries: Vec<CountryRaw>,
    #[serde(default)]
    cities: Vec<CityRaw>,
}

#[derive(Debug, Deserialize)]
struct CountryRaw {
    id: u32,
    name: String,
    #[serde(alias = "ISO2")]
    iso2: String,
    #[serde(alias = "ISO3")]
    iso3: String,
}

#[derive(Debug, Deserialize)]
struct CityRaw {
    id: u32,
    name: String,
    #[serde(default, alias = "name_ASCII", alias = "nameAscii")]
    name_ascii: String,
    lat: CoordRaw,
    lon: CoordRaw,
    #[serde(alias = "countryId")]
    country_id: u32,
}

/// Coordinates show up both as JSON numbers and as strings.
///
/// JSON numbers pass through `f64` while the document is parsed, so only
/// about 15 significant digits survive. Strings are parsed straight into
/// `Decimal` and are the lossless form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CoordRaw {
    Number(serde_json::Number),
    Text(String),
}

impl CoordRaw {
    fn parse(&self, field: &'static str) -> Result<Decimal> {
        let text = match self {
            CoordRaw::Number(n) => n.to_string(),
            CoordRaw::Text(s) => s.trim().to_string(),
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|e| StoreError::validation(field, format!("{text:?}: {e}")))
    }
}

impl WorldDb {
    /// Builds a store from a JSON seed document, keeping the seed's ids.
    ///
    /// Every record goes through the same field rules as `create_*`, and the
    /// finished store must pass [`WorldDb::check_integrity`]. The id counters
    /// resume after the highest imported id.
    pub fn import_json<R: Read>(reader: R, config: StoreConfig) -> Result<Self> {
        let seed: SeedRaw = serde_json::from_reader(reader)?;
        let mut tables = Tables::default();

        for raw in seed.countries {
            check_seed_id("country id", raw.id)?;
            let country = NewCountry::new(raw.name, raw.iso2, raw.iso3).into_country(raw.id)?;
            if tables.countries.insert(raw.id, country).is_some() {
                return Err(StoreError::Constraint(format!(
                    "duplicate country id {} in seed",
                    raw.id
                )));
            }
            tables.last_country_id = tables.last_country_id.max(raw.id);
        }

        for raw in seed.cities {
            check_seed_id("city id", raw.id)?;
            let city = NewCity {
                name: raw.name,
                name_ascii: raw.name_ascii,
                lat: raw.lat.parse("lat")?,
                lon: raw.lon.parse("lon")?,
                country_id: raw.country_id,
            }
            .into_city(raw.id)?;
            if tables.cities.insert(raw.id, city).is_some() {
                return Err(StoreError::Constraint(format!(
                    "duplicate city id {} in seed",
                    raw.id
                )));
            }
            tables.last_city_id = tables.last_city_id.max(raw.id);
        }

        let db = WorldDb::from_tables(tables, config)?;
        let stats = db.stats();
        info!(
            countries = stats.countries,
            cities = stats.cities,
            "seed imported"
        );
        Ok(db)
    }

    /// [`WorldDb::import_json`] from a file path.
    pub fn import_json_file(path: impl AsRef<Path>, config: StoreConfig) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::import_json(BufReader::new(file), config)
    }
}

fn check_seed_id(field: &'static str, id: u32) -> Result<()> {
    if id == 0 {
        return Err(StoreError::validation(field, "must be at least 1"));
    }
    Ok(())
}
