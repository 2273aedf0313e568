//! worldcities: facade over [`worldcities_core`].
//!
//! Hosts the `demos/` programs; library users can depend on either crate.

pub use worldcities_core::*;
