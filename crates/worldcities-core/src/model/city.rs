// crates/worldcities-core/src/model/city.rs
use super::validate;
use super::EntityKind;
use crate::error::{Result, StoreError};
use crate::text::fold_key;
use crate::traits::{Entity, NameMatch};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A city row. `country_id` always resolves to a stored [`Country`](super::Country).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub(crate) id: u32,
    pub(crate) name: String,
    pub(crate) name_ascii: String,
    pub(crate) lat: Decimal,
    pub(crate) lon: Decimal,
    pub(crate) country_id: u32,
}

impl City {
    pub fn id(&self) -> u32 {
        self.id
    }

    /// City display name (UTF-8).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// ASCII rendition of the name (e.g. "Sao Paulo" for "São Paulo").
    pub fn name_ascii(&self) -> &str {
        &self.name_ascii
    }

    pub fn lat(&self) -> Decimal {
        self.lat
    }

    pub fn lon(&self) -> Decimal {
        self.lon
    }

    pub fn country_id(&self) -> u32 {
        self.country_id
    }

    /// Folded substring match against both the display and the ASCII name.
    pub fn matches_name(&self, q: &str) -> bool {
        let q = fold_key(q);
        fold_key(&self.name).contains(&q) || fold_key(&self.name_ascii).contains(&q)
    }

    /// Same rules as `create_city`, applied to a row that is already stored.
    pub(crate) fn check(&self) -> Result<()> {
        let canonical = NewCity {
            name: self.name.clone(),
            name_ascii: self.name_ascii.clone(),
            lat: self.lat,
            lon: self.lon,
            country_id: self.country_id,
        }
        .into_city(self.id)?;
        if canonical != *self {
            return Err(StoreError::Constraint(format!(
                "city {} is not stored in canonical form",
                self.id
            )));
        }
        Ok(())
    }
}

/// Payload for [`WorldDb::create_city`](crate::store::WorldDb::create_city).
///
/// An empty `name_ascii` is filled by transliterating `name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCity {
    pub name: String,
    #[serde(default)]
    pub name_ascii: String,
    pub lat: Decimal,
    pub lon: Decimal,
    pub country_id: u32,
}

impl NewCity {
    pub fn new(name: impl Into<String>, lat: Decimal, lon: Decimal, country_id: u32) -> Self {
        NewCity {
            name: name.into(),
            name_ascii: String::new(),
            lat,
            lon,
            country_id,
        }
    }

    pub fn with_ascii(mut self, name_ascii: impl Into<String>) -> Self {
        self.name_ascii = name_ascii.into();
        self
    }

    /// Field checks only; the foreign key is resolved by the store.
    pub(crate) fn into_city(self, id: u32) -> Result<City> {
        let name = validate::required_text("name", &self.name)?;
        let name_ascii = validate::ascii_name(&name, &self.name_ascii)?;
        Ok(City {
            id,
            name,
            name_ascii,
            lat: validate::latitude(self.lat)?,
            lon: validate::longitude(self.lon)?,
            country_id: self.country_id,
        })
    }
}

/// Partial update for a city. `None` leaves the field unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityPatch {
    pub name: Option<String>,
    pub name_ascii: Option<String>,
    pub lat: Option<Decimal>,
    pub lon: Option<Decimal>,
    pub country_id: Option<u32>,
}

impl CityPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name_ascii(mut self, name_ascii: impl Into<String>) -> Self {
        self.name_ascii = Some(name_ascii.into());
        self
    }

    pub fn lat(mut self, lat: Decimal) -> Self {
        self.lat = Some(lat);
        self
    }

    pub fn lon(mut self, lon: Decimal) -> Self {
        self.lon = Some(lon);
        self
    }

    pub fn country_id(mut self, country_id: u32) -> Self {
        self.country_id = Some(country_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.name_ascii.is_none()
            && self.lat.is_none()
            && self.lon.is_none()
            && self.country_id.is_none()
    }

    /// Returns the patched copy of `current`; `current` itself is untouched.
    ///
    /// Renaming a city without a new `name_ascii` re-derives the ASCII form.
    pub(crate) fn apply(self, current: &City) -> Result<City> {
        let mut next = current.clone();
        let renamed = self.name.is_some();
        if let Some(name) = self.name {
            next.name = validate::required_text("name", &name)?;
        }
        match self.name_ascii {
            Some(ascii) => next.name_ascii = validate::ascii_name(&next.name, &ascii)?,
            None if renamed => next.name_ascii = validate::ascii_name(&next.name, "")?,
            None => {}
        }
        if let Some(lat) = self.lat {
            next.lat = validate::latitude(lat)?;
        }
        if let Some(lon) = self.lon {
            next.lon = validate::longitude(lon)?;
        }
        if let Some(country_id) = self.country_id {
            next.country_id = country_id;
        }
        Ok(next)
    }
}

impl Entity for City {
    const KIND: EntityKind = EntityKind::City;

    fn id(&self) -> u32 {
        self.id
    }

    fn sort_name(&self) -> &str {
        &self.name
    }
}

impl NameMatch for City {
    #[inline]
    fn name_str(&self) -> &str {
        self.name()
    }
}
