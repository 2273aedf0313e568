// crates/worldcities-core/src/config.rs
use crate::error::{Result, StoreError};
use crate::query::Pagination;
use serde::{Deserialize, Serialize};

/// What happens to a country's cities when the country is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Refuse to delete a country that still has cities.
    #[default]
    Restrict,
    /// Delete the cities together with the country.
    Cascade,
}

/// Runtime settings of a [`WorldDb`](crate::store::WorldDb).
///
/// Missing keys fall back to [`StoreConfig::default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub delete_policy: DeletePolicy,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            delete_policy: DeletePolicy::Restrict,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl StoreConfig {
    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    pub fn with_page_sizes(mut self, default_page_size: usize, max_page_size: usize) -> Self {
        self.default_page_size = default_page_size;
        self.max_page_size = max_page_size;
        self
    }

    /// Pagination using `default_page_size`.
    pub fn default_pagination(&self) -> Pagination {
        Pagination::new(self.default_page_size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_page_size == 0 {
            return Err(StoreError::validation("max_page_size", "must be at least 1"));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(StoreError::validation(
                "default_page_size",
                format!("must be within 1..={}", self.max_page_size),
            ));
        }
        Ok(())
    }

    /// Parses a JSON settings document, e.g. `{"delete_policy": "cascade"}`.
    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: StoreConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
