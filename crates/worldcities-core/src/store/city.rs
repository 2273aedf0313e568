// crates/worldcities-core/src/store/city.rs
use super::{DeleteReport, WorldDb};
use crate::error::{Result, StoreError};
use crate::model::{City, CityPatch, EntityKind, NewCity};
use crate::query::{CityFilter, Listing, Pagination};
use tracing::{debug, warn};

impl WorldDb {
    /// Inserts a city and returns the stored row with its new id.
    ///
    /// # Errors
    /// - [`StoreError::Validation`] for a blank name, a non-ASCII
    ///   `name_ascii` or coordinates out of range.
    /// - [`StoreError::Constraint`] if `country_id` names no stored country.
    pub fn create_city(&mut self, new: NewCity) -> Result<City> {
        let id = Self::next_id(self.tables.last_city_id, EntityKind::City)?;
        let city = new.into_city(id)?;
        self.ensure_country_exists(&city)?;

        self.tables.last_city_id = id;
        self.tables.cities.insert(id, city.clone());
        debug!(id, country_id = city.country_id, "city created");
        Ok(city)
    }

    /// Reads a city by id.
    pub fn city(&self, id: u32) -> Result<&City> {
        self.tables
            .cities
            .get(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::City, id))
    }

    /// Applies `patch` to city `id` and returns the updated row.
    ///
    /// A new `country_id` must name a stored country.
    pub fn update_city(&mut self, id: u32, patch: CityPatch) -> Result<City> {
        let updated = patch.apply(self.city(id)?)?;
        self.ensure_country_exists(&updated)?;

        self.tables.cities.insert(id, updated.clone());
        debug!(id, "city updated");
        Ok(updated)
    }

    /// Deletes a city. Nothing references cities, so this only fails when
    /// the id is unknown.
    pub fn delete_city(&mut self, id: u32) -> Result<DeleteReport> {
        self.tables
            .cities
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::City, id))?;
        debug!(id, "city deleted");
        Ok(DeleteReport {
            kind: EntityKind::City,
            id,
            cascaded_cities: Vec::new(),
        })
    }

    /// Cities matching `filter`, paged per `pagination`.
    ///
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use worldcities_core::{CityFilter, NewCity, NewCountry, Pagination, WorldDb};
    ///
    /// let mut db = WorldDb::new();
    /// let it = db.create_country(NewCountry::new("Italy", "IT", "ITA")).unwrap();
    /// for name in ["Roma", "Milano", "Napoli"] {
    ///     db.create_city(NewCity::new(name, Decimal::ZERO, Decimal::ZERO, it.id())).unwrap();
    /// }
    ///
    /// let listing = db.list_cities(&CityFilter::default(), Pagination::new(2)).unwrap();
    /// let sizes: Vec<usize> = listing.pages().map(|p| p.len()).collect();
    /// assert_eq!(sizes, vec![2, 1]);
    /// ```
    pub fn list_cities(
        &self,
        filter: &CityFilter,
        pagination: Pagination,
    ) -> Result<Listing<'_, City>> {
        pagination.check(self.config.max_page_size)?;
        Ok(Listing::build(
            &self.tables.cities,
            |c| filter.matches(c),
            pagination,
        ))
    }

    /// All cities in id order.
    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.tables.cities.values()
    }

    fn ensure_country_exists(&self, city: &City) -> Result<()> {
        if self.tables.countries.contains_key(&city.country_id) {
            return Ok(());
        }
        warn!(city = city.id, country_id = city.country_id, "unknown country");
        Err(StoreError::Constraint(format!(
            "city {} references missing country {}",
            city.id, city.country_id
        )))
    }
}
