// crates/worldcities-core/src/store/country.rs
use super::{shared_code, DeleteReport, WorldDb};
use crate::config::DeletePolicy;
use crate::error::{Result, StoreError};
use crate::model::{City, Country, CountryPatch, EntityKind, NewCountry};
use crate::query::{CountryFilter, Listing, Pagination};
use crate::text::fold_key;
use crate::traits::NameMatch;
use tracing::{debug, warn};

impl WorldDb {
    /// Inserts a country and returns the stored row with its new id.
    ///
    /// # Errors
    /// - [`StoreError::Validation`] for a blank name or malformed ISO codes.
    /// - [`StoreError::Constraint`] if another country already uses the
    ///   ISO2 or ISO3 code.
    ///
    /// ```rust
    /// use worldcities_core::{NewCountry, WorldDb};
    ///
    /// let mut db = WorldDb::new();
    /// let italy = db.create_country(NewCountry::new("Italy", "it", "ita")).unwrap();
    /// assert_eq!(italy.id(), 1);
    /// assert_eq!(italy.iso2(), "IT");
    /// ```
    pub fn create_country(&mut self, new: NewCountry) -> Result<Country> {
        let id = Self::next_id(self.tables.last_country_id, EntityKind::Country)?;
        let country = new.into_country(id)?;
        self.ensure_codes_free(&country)?;

        self.tables.last_country_id = id;
        self.tables.countries.insert(id, country.clone());
        debug!(id, iso2 = %country.iso2, "country created");
        Ok(country)
    }

    /// Reads a country by id.
    pub fn country(&self, id: u32) -> Result<&Country> {
        self.tables
            .countries
            .get(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Country, id))
    }

    /// Applies `patch` to country `id` and returns the updated row.
    ///
    /// All fields are checked before anything is written.
    pub fn update_country(&mut self, id: u32, patch: CountryPatch) -> Result<Country> {
        let updated = patch.apply(self.country(id)?)?;
        self.ensure_codes_free(&updated)?;

        self.tables.countries.insert(id, updated.clone());
        debug!(id, "country updated");
        Ok(updated)
    }

    /// Deletes a country using the configured [`DeletePolicy`].
    pub fn delete_country(&mut self, id: u32) -> Result<DeleteReport> {
        self.delete_country_with(id, self.config.delete_policy)
    }

    /// Deletes a country with an explicit policy for its cities.
    ///
    /// Under [`DeletePolicy::Restrict`] a country that still has cities is
    /// left alone and [`StoreError::Constraint`] is returned. Under
    /// [`DeletePolicy::Cascade`] those cities are removed first.
    pub fn delete_country_with(&mut self, id: u32, policy: DeletePolicy) -> Result<DeleteReport> {
        self.country(id)?;

        let dependents: Vec<u32> = self
            .tables
            .cities
            .values()
            .filter(|c| c.country_id == id)
            .map(|c| c.id)
            .collect();

        if !dependents.is_empty() {
            match policy {
                DeletePolicy::Restrict => {
                    warn!(id, cities = dependents.len(), "country delete refused");
                    return Err(StoreError::Constraint(format!(
                        "country {id} is still referenced by {} cities",
                        dependents.len()
                    )));
                }
                DeletePolicy::Cascade => {
                    for city_id in &dependents {
                        self.tables.cities.remove(city_id);
                    }
                }
            }
        }

        self.tables.countries.remove(&id);
        debug!(id, cascaded = dependents.len(), "country deleted");
        Ok(DeleteReport {
            kind: EntityKind::Country,
            id,
            cascaded_cities: dependents,
        })
    }

    /// Countries matching `filter`, paged per `pagination`.
    ///
    /// # Errors
    /// [`StoreError::Validation`] if the page size is zero or above the
    /// configured maximum.
    pub fn list_countries(
        &self,
        filter: &CountryFilter,
        pagination: Pagination,
    ) -> Result<Listing<'_, Country>> {
        pagination.check(self.config.max_page_size)?;
        Ok(Listing::build(
            &self.tables.countries,
            |c| filter.matches(c),
            pagination,
        ))
    }

    /// All countries in id order.
    pub fn countries(&self) -> impl Iterator<Item = &Country> {
        self.tables.countries.values()
    }

    /// Find a country by ISO2 code, case-insensitive (e.g. "IT", "it").
    pub fn find_country_by_iso2(&self, iso2: &str) -> Option<&Country> {
        self.tables
            .countries
            .values()
            .find(|c| c.iso2.eq_ignore_ascii_case(iso2))
    }

    /// Find a country by ISO3 code, case-insensitive (e.g. "ITA", "ita").
    pub fn find_country_by_iso3(&self, iso3: &str) -> Option<&Country> {
        self.tables
            .countries
            .values()
            .find(|c| c.iso3.eq_ignore_ascii_case(iso3))
    }

    /// Find a country by code, trying ISO2 first and then ISO3.
    pub fn find_country_by_code(&self, code: &str) -> Option<&Country> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        self.find_country_by_iso2(code)
            .or_else(|| self.find_country_by_iso3(code))
    }

    /// Find a country by exact name, ignoring case and accents
    /// ("cote d'ivoire" finds "Côte d'Ivoire"). Lowest id wins on ties.
    pub fn find_country_by_name(&self, name: &str) -> Option<&Country> {
        self.tables.countries.values().find(|c| c.is_named(name))
    }

    /// The cities of a country, ordered by folded name then id.
    ///
    /// This is the Country → City back-reference; it is computed from
    /// `City::country_id` on every call.
    pub fn cities_of(&self, country_id: u32) -> Result<Vec<&City>> {
        self.country(country_id)?;
        let mut cities: Vec<(String, &City)> = self
            .tables
            .cities
            .values()
            .filter(|c| c.country_id == country_id)
            .map(|c| (fold_key(&c.name), c))
            .collect();
        cities.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.id.cmp(&b.1.id)));
        Ok(cities.into_iter().map(|(_, c)| c).collect())
    }

    /// Rejects `candidate` if any other country shares one of its codes.
    fn ensure_codes_free(&self, candidate: &Country) -> Result<()> {
        let clash = self
            .tables
            .countries
            .values()
            .filter(|c| c.id != candidate.id)
            .find_map(|c| shared_code(candidate, c).map(|code| (c.id, code.to_string())));

        if let Some((other, code)) = clash {
            warn!(other, %code, "duplicate country code");
            return Err(StoreError::Constraint(format!(
                "code {code} is already used by country {other}"
            )));
        }
        Ok(())
    }
}
