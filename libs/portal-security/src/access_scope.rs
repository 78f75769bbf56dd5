use serde::{Deserialize, Serialize};

use crate::ids::ProfileId;

/// Well-known authorization property names.
///
/// These constants are shared between the predicate builder, the in-memory
/// document check and the ORM condition builder
/// (`ScopableEntity::resolve_property()`), so a property means the same thing
/// on every path.
pub mod properties {
    /// Resource identity property. Typically maps to the primary key column.
    pub const RESOURCE_ID: &str = "id";

    /// Main teacher slot of a class. Maps to the `catequista` column.
    pub const OWNER_PRIMARY: &str = "owner_primary";

    /// Assistant teacher slot of a class. Maps to the `catequista_adj` column.
    pub const OWNER_SECONDARY: &str = "owner_secondary";

    /// Lifecycle status label of a class.
    pub const STATUS: &str = "status";

    /// Foreign key from a student to its class.
    pub const OWNING_ENTITY_ID: &str = "owning_entity_id";
}

/// Visibility decision for one identity, computed fresh per request.
///
/// Never persisted and never cached across requests.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessScope {
    /// The identity does not hold the restricted role; nothing is narrowed.
    Unrestricted,
    /// Narrowed to the records owned by this profile.
    Restricted(ProfileId),
    /// Restricted role without a linked profile: no access at all.
    Denied,
}

impl Default for AccessScope {
    /// Default is deny-all.
    fn default() -> Self {
        Self::Denied
    }
}

impl AccessScope {
    #[inline]
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }

    #[inline]
    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied)
    }
}

/// Predicate operation type for scope filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    /// `property = value`, value bound as a parameter.
    Eq,
}

/// A single comparison on a named row property.
///
/// The property name (e.g. `"owner_primary"`) is an authorization concept.
/// Mapping to DB columns is done by `ScopableEntity::resolve_property()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeFilter {
    property: String,
    op: FilterOp,
    value: String,
}

impl ScopeFilter {
    #[must_use]
    pub fn new(property: impl Into<String>, op: FilterOp, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            op,
            value: value.into(),
        }
    }

    /// Shorthand for an [`FilterOp::Eq`] filter.
    #[must_use]
    pub fn eq(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(property, FilterOp::Eq, value)
    }

    #[inline]
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    #[inline]
    #[must_use]
    pub fn op(&self) -> FilterOp {
        self.op
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    fn matches(&self, row: &(impl ScopableRow + ?Sized)) -> bool {
        match self.op {
            FilterOp::Eq => row.property(&self.property) == Some(self.value.as_str()),
        }
    }
}

/// A composable row filter.
///
/// Rendered into a query condition by the storage layer and evaluated in
/// memory against a loaded document by [`RowPredicate::matches`]. Both paths
/// read the same value, so list filtering and document checks cannot drift.
///
/// | Variant | Storage rendering | In memory |
/// |---------|-------------------|-----------|
/// | `Unconstrained` | no added condition | `true` |
/// | `DenyAll` | `WHERE false` | `false` |
/// | `Filter` | `column = ?` | property equals value |
/// | `AllOf` | AND (empty: true) | all |
/// | `AnyOf` | OR (empty: false) | any |
/// | `Related` | `fk IN (SELECT key FROM target WHERE ..)` | related row matches |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowPredicate {
    Unconstrained,
    DenyAll,
    Filter(ScopeFilter),
    AllOf(Vec<RowPredicate>),
    AnyOf(Vec<RowPredicate>),
    /// The row referenced through the foreign-key property `via` must match.
    Related {
        via: String,
        predicate: Box<RowPredicate>,
    },
}

impl RowPredicate {
    /// `property = value`.
    #[must_use]
    pub fn eq(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Filter(ScopeFilter::eq(property, value))
    }

    #[must_use]
    pub fn related(via: impl Into<String>, predicate: RowPredicate) -> Self {
        Self::Related {
            via: via.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Returns `true` if this predicate adds no constraint.
    #[inline]
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        matches!(self, Self::Unconstrained)
    }

    /// Returns `true` if this predicate matches nothing by construction.
    #[inline]
    #[must_use]
    pub fn is_deny_all(&self) -> bool {
        matches!(self, Self::DenyAll)
    }

    /// Evaluate the predicate against one loaded row.
    ///
    /// Missing properties never match, mirroring SQL `NULL = ?`.
    #[must_use]
    pub fn matches(&self, row: &(impl ScopableRow + ?Sized)) -> bool {
        match self {
            Self::Unconstrained => true,
            Self::DenyAll => false,
            Self::Filter(filter) => filter.matches(row),
            Self::AllOf(parts) => parts.iter().all(|p| p.matches(row)),
            Self::AnyOf(parts) => parts.iter().any(|p| p.matches(row)),
            Self::Related { via, predicate } => row
                .related(via)
                .is_some_and(|target| predicate.matches(target)),
        }
    }
}

/// A loaded row that a [`RowPredicate`] can be evaluated against.
pub trait ScopableRow {
    /// Value of an authorization property, `None` when absent or null.
    fn property(&self, name: &str) -> Option<&str>;

    /// The row referenced through the foreign-key property `via`, if loaded
    /// and present.
    fn related(&self, via: &str) -> Option<&dyn ScopableRow> {
        let _ = via;
        None
    }
}
