// crates/worldcities-core/src/traits.rs
use crate::model::EntityKind;
use crate::text::fold_key;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A stored record with a stable identity.
///
/// Both tables of the store hold `Entity` values; the listing machinery in
/// [`crate::query`] is written once against this trait.
pub trait Entity: Clone + std::fmt::Debug + Serialize + DeserializeOwned {
    /// The table this record belongs to.
    const KIND: EntityKind;

    /// Primary key. Assigned on creation, never changed afterwards.
    fn id(&self) -> u32;

    /// Display name used by [`SortKey::Name`](crate::query::SortKey::Name).
    fn sort_name(&self) -> &str;
}

/// Name-based matching helpers for types that expose a canonical display name.
///
/// Comparisons go through [`fold_key`], so they ignore case and accents.
///
/// # Examples
/// ```rust
/// use worldcities_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Łódź").is_named("lodz"));
/// assert!(Place("Zürich").name_contains("zuri"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    #[inline]
    fn is_named(&self, q: &str) -> bool {
        fold_key(self.name_str()) == fold_key(q)
    }

    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        fold_key(self.name_str()).contains(&fold_key(q))
    }
}
