// crates/worldcities-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for the store.
///
/// Returned by [`WorldDb::stats`](crate::store::WorldDb::stats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub countries: usize,
    pub cities: usize,
}
