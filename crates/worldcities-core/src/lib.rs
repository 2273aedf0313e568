// crates/worldcities-core/src/lib.rs

//! # worldcities-core
//!
//! Country and city reference data with an in-process store that keeps the
//! relationship between them consistent:
//!
//! - every city points at a stored country,
//! - ids are assigned once and never change or get reused,
//! - a country with cities cannot be deleted unless cascading is chosen.
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use worldcities_core::{NewCity, NewCountry, WorldDb};
//!
//! let mut db = WorldDb::new();
//! let italy = db.create_country(NewCountry::new("Italy", "IT", "ITA"))?;
//! let roma = db.create_city(
//!     NewCity::new("Roma", Decimal::new(419, 1), Decimal::new(125, 1), italy.id()),
//! )?;
//! assert_eq!(db.city(roma.id())?, &roma);
//!
//! let orphan = db.create_city(NewCity::new("Nowhere", Decimal::ZERO, Decimal::ZERO, 999));
//! assert!(orphan.unwrap_err().is_constraint());
//! # Ok::<(), worldcities_core::StoreError>(())
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod prelude;
pub mod query;
pub mod store;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::common::DbStats;
pub use crate::config::{DeletePolicy, StoreConfig};
pub use crate::error::{Result, StoreError};
pub use crate::loader::CompressionMode;
pub use crate::model::{City, CityPatch, Country, CountryPatch, EntityKind, NewCity, NewCountry};
pub use crate::query::{CityFilter, CountryFilter, Listing, Page, Pagination, SortKey};
pub use crate::store::{DeleteReport, WorldDb};
