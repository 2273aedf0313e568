// crates/worldcities-core/src/query.rs

//! # Listing
//!
//! Filters, sort keys and the paged, restartable [`Listing`] returned by
//! `WorldDb::list_countries` / `WorldDb::list_cities`.

use crate::error::{Result, StoreError};
use crate::model::{City, Country};
use crate::text::fold_key;
use crate::traits::{Entity, NameMatch};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::iter::FusedIterator;

/// Ordering applied before paging. Ties are always broken by id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Folded display name, then id.
    #[default]
    Name,
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page_size: usize,
    pub sort: SortKey,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Pagination {
            page_size,
            sort: SortKey::default(),
        }
    }

    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub(crate) fn check(&self, max_page_size: usize) -> Result<()> {
        if self.page_size == 0 || self.page_size > max_page_size {
            return Err(StoreError::validation(
                "page_size",
                format!("must be within 1..={max_page_size}, got {}", self.page_size),
            ));
        }
        Ok(())
    }
}

/// Criteria for listing countries. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryFilter {
    /// Accent- and case-insensitive substring of the name.
    pub name_contains: Option<String>,
    /// ISO2 or ISO3 code, ASCII case-insensitive.
    pub code: Option<String>,
}

impl CountryFilter {
    pub fn name_contains(mut self, q: impl Into<String>) -> Self {
        self.name_contains = Some(q.into());
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn matches(&self, country: &Country) -> bool {
        let name_ok = self
            .name_contains
            .as_deref()
            .map_or(true, |q| country.name_contains(q));
        let code_ok = self
            .code
            .as_deref()
            .map_or(true, |c| country.has_code(c.trim()));
        name_ok && code_ok
    }
}

/// Criteria for listing cities. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityFilter {
    /// Folded substring of either `name` or `name_ascii`.
    pub name_contains: Option<String>,
    pub country_id: Option<u32>,
}

impl CityFilter {
    pub fn name_contains(mut self, q: impl Into<String>) -> Self {
        self.name_contains = Some(q.into());
        self
    }

    pub fn country_id(mut self, country_id: u32) -> Self {
        self.country_id = Some(country_id);
        self
    }

    pub fn matches(&self, city: &City) -> bool {
        let name_ok = self
            .name_contains
            .as_deref()
            .map_or(true, |q| city.matches_name(q));
        let country_ok = self.country_id.map_or(true, |id| city.country_id() == id);
        name_ok && country_ok
    }
}

/// One page of a [`Listing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<E> {
    /// Zero-based page number.
    pub index: usize,
    pub items: Vec<E>,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<E: Entity> Page<E> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.total_pages
    }

    pub fn ids(&self) -> Vec<u32> {
        self.items.iter().map(Entity::id).collect()
    }
}

/// The result of a `list_*` call.
///
/// The matching ids and their order are fixed when the listing is created.
/// Records are cloned only when a page is produced, and the listing borrows
/// the store, so the store cannot change underneath it. Every call to
/// [`Listing::pages`] starts again from the first page.
#[derive(Debug, Clone)]
pub struct Listing<'a, E> {
    source: &'a BTreeMap<u32, E>,
    ids: Vec<u32>,
    page_size: usize,
}

impl<'a, E: Entity> Listing<'a, E> {
    /// Selects the records matching `keep` and orders them by `pagination.sort`.
    pub(crate) fn build(
        source: &'a BTreeMap<u32, E>,
        keep: impl Fn(&E) -> bool,
        pagination: Pagination,
    ) -> Self {
        let ids = match pagination.sort {
            // BTreeMap iteration is already in id order.
            SortKey::Id => source
                .values()
                .filter(|e| keep(e))
                .map(Entity::id)
                .collect(),
            SortKey::Name => {
                let mut keyed: Vec<(String, u32)> = source
                    .values()
                    .filter(|e| keep(e))
                    .map(|e| (fold_key(e.sort_name()), e.id()))
                    .collect();
                keyed.sort();
                keyed.into_iter().map(|(_, id)| id).collect()
            }
        };
        Listing {
            source,
            ids,
            page_size: pagination.page_size,
        }
    }

    pub fn total(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages; zero when nothing matched.
    pub fn page_count(&self) -> usize {
        self.ids.len().div_ceil(self.page_size)
    }

    /// Matching ids in listing order.
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    /// Fetches page `index`, or `None` past the last page.
    pub fn page(&self, index: usize) -> Option<Page<E>> {
        let start = index.checked_mul(self.page_size)?;
        if start >= self.ids.len() {
            return None;
        }
        let end = (start + self.page_size).min(self.ids.len());
        let items = self.ids[start..end]
            .iter()
            .filter_map(|id| self.source.get(id).cloned())
            .collect();
        Some(Page {
            index,
            items,
            total_items: self.ids.len(),
            total_pages: self.page_count(),
        })
    }

    /// Lazy iterator over all pages, starting at page 0.
    pub fn pages(&self) -> Pages<'_, 'a, E> {
        Pages {
            listing: self,
            next: 0,
        }
    }

    /// Lazy iterator over every record, in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &'a E> + '_ {
        let source = self.source;
        self.ids.iter().filter_map(move |id| source.get(id))
    }
}

/// Iterator returned by [`Listing::pages`].
#[derive(Debug, Clone)]
pub struct Pages<'l, 'a, E> {
    listing: &'l Listing<'a, E>,
    next: usize,
}

impl<E: Entity> Iterator for Pages<'_, '_, E> {
    type Item = Page<E>;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.listing.page(self.next)?;
        self.next += 1;
        Some(page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.listing.page_count().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl<E: Entity> ExactSizeIterator for Pages<'_, '_, E> {}
impl<E: Entity> FusedIterator for Pages<'_, '_, E> {}

impl<'l, 'a, E: Entity> IntoIterator for &'l Listing<'a, E> {
    type Item = Page<E>;
    type IntoIter = Pages<'l, 'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewCountry;

    fn table(names: &[&str]) -> BTreeMap<u32, Country> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let id = i as u32 + 1;
                let code = format!("{}{}", (b'A' + i as u8) as char, 'A');
                let country = NewCountry::new(*name, code.clone(), format!("{code}A"))
                    .into_country(id)
                    .unwrap();
                (id, country)
            })
            .collect()
    }

    #[test]
    fn name_sort_is_folded_with_id_tiebreak() {
        let t = table(&["Österreich", "Italy", "albania", "Italy"]);
        let listing = Listing::build(&t, |_| true, Pagination::new(10));
        assert_eq!(listing.ids(), &[3, 2, 4, 1]);
    }

    #[test]
    fn empty_listing_has_no_pages() {
        let t = table(&["Italy"]);
        let listing = Listing::build(&t, |_| false, Pagination::new(5));
        assert_eq!(listing.page_count(), 0);
        assert!(listing.page(0).is_none());
        assert_eq!(listing.pages().count(), 0);
    }

    #[test]
    fn pages_restart_and_report_size() {
        let t = table(&["A", "B", "C", "D", "E"]);
        let listing = Listing::build(&t, |_| true, Pagination::new(2).sorted_by(SortKey::Id));
        let pages = listing.pages();
        assert_eq!(pages.len(), 3);
        let first: Vec<usize> = listing.pages().map(|p| p.len()).collect();
        let second: Vec<usize> = (&listing).into_iter().map(|p| p.len()).collect();
        assert_eq!(first, vec![2, 2, 1]);
        assert_eq!(first, second);
        assert!(listing.page(2).unwrap().is_last());
    }

    #[test]
    fn pagination_bounds() {
        assert!(Pagination::new(0).check(100).is_err());
        assert!(Pagination::new(101).check(100).is_err());
        assert!(Pagination::new(100).check(100).is_ok());
    }
}
