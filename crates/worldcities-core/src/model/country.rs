// crates/worldcities-core/src/model/country.rs
use super::validate;
use super::EntityKind;
use crate::error::{Result, StoreError};
use crate::traits::{Entity, NameMatch};
use serde::{Deserialize, Serialize};

/// A country row.
///
/// The `id` is assigned by the store on creation and has no setter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub(crate) id: u32,
    pub(crate) name: String,
    pub(crate) iso2: String,
    pub(crate) iso3: String,
}

impl Country {
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Country display name (UTF-8).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// ISO 3166-1 alpha-2 code, upper case (e.g. "IT").
    pub fn iso2(&self) -> &str {
        &self.iso2
    }

    /// ISO 3166-1 alpha-3 code, upper case (e.g. "ITA").
    pub fn iso3(&self) -> &str {
        &self.iso3
    }

    /// True if `code` is this country's ISO2 or ISO3 code, ignoring ASCII case.
    pub fn has_code(&self, code: &str) -> bool {
        self.iso2.eq_ignore_ascii_case(code) || self.iso3.eq_ignore_ascii_case(code)
    }

    /// Runs a stored row back through the create rules. Rows that arrive
    /// from a snapshot must already be in the form `create_country` stores.
    pub(crate) fn check(&self) -> Result<()> {
        let canonical =
            NewCountry::new(&*self.name, &*self.iso2, &*self.iso3).into_country(self.id)?;
        if canonical != *self {
            return Err(StoreError::Constraint(format!(
                "country {} is not stored in canonical form",
                self.id
            )));
        }
        Ok(())
    }
}

/// Payload for [`WorldDb::create_country`](crate::store::WorldDb::create_country).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCountry {
    pub name: String,
    pub iso2: String,
    pub iso3: String,
}

impl NewCountry {
    pub fn new(name: impl Into<String>, iso2: impl Into<String>, iso3: impl Into<String>) -> Self {
        NewCountry {
            name: name.into(),
            iso2: iso2.into(),
            iso3: iso3.into(),
        }
    }

    /// Normalizes and checks every field, producing the row stored under `id`.
    pub(crate) fn into_country(self, id: u32) -> Result<Country> {
        Ok(Country {
            id,
            name: validate::required_text("name", &self.name)?,
            iso2: validate::iso_code("iso2", &self.iso2, 2)?,
            iso3: validate::iso_code("iso3", &self.iso3, 3)?,
        })
    }
}

/// Partial update for a country. `None` leaves the field unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryPatch {
    pub name: Option<String>,
    pub iso2: Option<String>,
    pub iso3: Option<String>,
}

impl CountryPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn iso2(mut self, iso2: impl Into<String>) -> Self {
        self.iso2 = Some(iso2.into());
        self
    }

    pub fn iso3(mut self, iso3: impl Into<String>) -> Self {
        self.iso3 = Some(iso3.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.iso2.is_none() && self.iso3.is_none()
    }

    /// Returns the patched copy of `current`; `current` itself is untouched.
    pub(crate) fn apply(self, current: &Country) -> Result<Country> {
        let mut next = current.clone();
        if let Some(name) = self.name {
            next.name = validate::required_text("name", &name)?;
        }
        if let Some(iso2) = self.iso2 {
            next.iso2 = validate::iso_code("iso2", &iso2, 2)?;
        }
        if let Some(iso3) = self.iso3 {
            next.iso3 = validate::iso_code("iso3", &iso3, 3)?;
        }
        Ok(next)
    }
}

impl Entity for Country {
    const KIND: EntityKind = EntityKind::Country;

    fn id(&self) -> u32 {
        self.id
    }

    fn sort_name(&self) -> &str {
        &self.name
    }
}

impl NameMatch for Country {
    #[inline]
    fn name_str(&self) -> &str {
        self.name()
    }
}
