//! worldcities-cli
//! ===============
//!
//! Command-line interface for the `worldcities-core` country/city store.
//!
//! This crate primarily provides a binary (`worldcities`). The library
//! target only carries this overview.
//!
//! Basic usage:
//!
//! ```text
//! worldcities import seed.json
//! worldcities add-country Italy IT ITA
//! worldcities add-city Roma --country IT --lat 41.9 --lon 12.5
//! worldcities cities --country IT --page-size 20
//! worldcities --cascade delete-country 1
//! ```
//!
//! For programmatic access use [`worldcities-core`] directly.
