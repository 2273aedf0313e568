//! worldcities prelude: bring common types and traits into scope.

pub use crate::config::{DeletePolicy, StoreConfig};
pub use crate::error::{Result, StoreError};
pub use crate::model::{City, CityPatch, Country, CountryPatch, EntityKind, NewCity, NewCountry};
pub use crate::query::{CityFilter, CountryFilter, Listing, Page, Pagination, SortKey};
pub use crate::store::{DeleteReport, WorldDb};
pub use crate::text::{equals_folded, fold_key};
pub use crate::traits::{Entity, NameMatch};
pub use crate::DbStats;
